//! Argument parsing and the one-shot (non-interactive) commands.

use crate::cli::{output, ui, CliError};
use crate::config::{Config, ConfigManager, API_URL_ENV};
use crate::domain::RecordId;
use crate::list::RecordListController;
use crate::transport::RecordTransport;
use crate::utils::build_info;

pub const USAGE: &str = "\
Usage: user_admin_cli [--demo] [--no-color] [COMMAND]

Commands:
  (none)            Start the interactive user manager
  list [PAGE]       Print one page of users
  get <ID>          Show a single user
  delete <ID>       Delete a user
  config            Show the active configuration
  version           Show build information
  help              Show this message

Options:
  --demo            Use a seeded in-memory service instead of HTTP
  --no-color        Disable colored output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Interactive,
    List { page: usize },
    Get(RecordId),
    Delete(RecordId),
    Config,
    Version,
    Help,
}

impl Command {
    /// Whether the command talks to the user service.
    pub fn needs_transport(&self) -> bool {
        matches!(
            self,
            Command::Interactive | Command::List { .. } | Command::Get(_) | Command::Delete(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub demo: bool,
    pub no_color: bool,
    pub command: Command,
}

/// Parses everything after the program name.
pub fn parse_args<I, S>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut demo = false;
    let mut no_color = false;
    let mut positional = Vec::new();
    for arg in args.into_iter().map(Into::into) {
        match arg.as_str() {
            "--demo" => demo = true,
            "--no-color" => no_color = true,
            "-h" | "--help" => positional.insert(0, "help".to_string()),
            "-V" | "--version" => positional.insert(0, "version".to_string()),
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option `{flag}`")))
            }
            _ => positional.push(arg.clone()),
        }
    }

    let mut rest = positional.into_iter();
    let command = match rest.next().as_deref() {
        None => Command::Interactive,
        Some("list") => {
            let page = match rest.next() {
                Some(raw) => raw
                    .parse::<usize>()
                    .map_err(|_| CliError::Usage(format!("invalid page number `{raw}`")))?,
                None => 1,
            };
            Command::List { page }
        }
        Some("get") => Command::Get(required_id(rest.next(), "get")?),
        Some("delete") => Command::Delete(required_id(rest.next(), "delete")?),
        Some("config") => Command::Config,
        Some("version") => Command::Version,
        Some("help") => Command::Help,
        Some(other) => return Err(CliError::Usage(format!("unknown command `{other}`"))),
    };

    Ok(Invocation {
        demo,
        no_color,
        command,
    })
}

fn required_id(raw: Option<String>, command: &str) -> Result<RecordId, CliError> {
    raw.filter(|id| !id.trim().is_empty())
        .map(RecordId::new)
        .ok_or_else(|| CliError::Usage(format!("`{command}` needs a user id")))
}

pub fn list<T>(transport: &T, page: usize, page_size: usize) -> Result<(), CliError>
where
    T: RecordTransport + ?Sized,
{
    let result = transport.list();
    let failure = result.as_ref().err().cloned();
    let mut list = RecordListController::new(page_size);
    list.apply_fetch(result);
    if let Some(err) = failure {
        return Err(err.into());
    }

    list.go_to(page);
    if list.is_empty() {
        output::info("No users found.");
        return Ok(());
    }
    output::block(ui::record_table(list.visible_page()).render());
    output::info(format!(
        "Page {} of {} ({} users)",
        list.current_page(),
        list.page_count(),
        list.records().len()
    ));
    Ok(())
}

pub fn get<T>(transport: &T, id: &RecordId) -> Result<(), CliError>
where
    T: RecordTransport + ?Sized,
{
    let record = transport.get(id)?;
    output::block(ui::record_details(&record).render());
    Ok(())
}

pub fn delete<T>(transport: &T, id: &RecordId) -> Result<(), CliError>
where
    T: RecordTransport + ?Sized,
{
    transport.delete(id)?;
    output::success("successfully deleted user");
    Ok(())
}

pub fn show_config(manager: &ConfigManager, config: &Config) -> Result<(), CliError> {
    let url = config.resolve_base_url()?;
    let view = ui::DetailView::new("Configuration")
        .with_field("File", manager.path().display().to_string())
        .with_field("API URL", url.to_string())
        .with_field(
            "URL override",
            std::env::var(API_URL_ENV).unwrap_or_else(|_| "(not set)".into()),
        )
        .with_field("Page size", config.page_size.to_string())
        .with_field("Color", config.ui_color_enabled.to_string());
    output::block(view.render());
    Ok(())
}

pub fn version() {
    for line in build_info::current().lines() {
        println!("{line}");
    }
}

pub fn help() {
    println!("{USAGE}");
}
