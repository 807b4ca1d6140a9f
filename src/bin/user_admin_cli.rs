use std::{env, process};

use user_admin::{
    cli::{
        commands::{self, Command, Invocation},
        output::{self, OutputPreferences},
        App, CliError, TerminalInteraction,
    },
    config::{Config, ConfigManager},
    init,
    transport::{HttpTransport, InMemoryTransport, RecordTransport},
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let invocation = commands::parse_args(env::args().skip(1))?;
    let manager = ConfigManager::new()?;
    let config = manager.load()?;

    output::set_preferences(OutputPreferences {
        color_enabled: config.ui_color_enabled
            && !invocation.no_color
            && env::var_os("NO_COLOR").is_none(),
        plain_mode: false,
    });

    if !invocation.command.needs_transport() {
        return match invocation.command {
            Command::Config => commands::show_config(&manager, &config),
            Command::Version => {
                commands::version();
                Ok(())
            }
            _ => {
                commands::help();
                Ok(())
            }
        };
    }

    if invocation.demo {
        dispatch(InMemoryTransport::demo(), &invocation, &config)
    } else {
        let transport = HttpTransport::new(config.resolve_base_url()?)?;
        tracing::info!(base_url = %transport.base_url(), "using HTTP transport");
        dispatch(transport, &invocation, &config)
    }
}

fn dispatch<T: RecordTransport>(
    transport: T,
    invocation: &Invocation,
    config: &Config,
) -> Result<(), CliError> {
    match &invocation.command {
        Command::Interactive => {
            let mut app = App::new(transport, config.page_size);
            app.run(&mut TerminalInteraction::new());
            Ok(())
        }
        Command::List { page } => commands::list(&transport, *page, config.page_size),
        Command::Get(id) => commands::get(&transport, id),
        Command::Delete(id) => commands::delete(&transport, id),
        Command::Config | Command::Version | Command::Help => Ok(()),
    }
}
