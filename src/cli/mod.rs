//! Terminal front end: the interactive app plus one-shot commands.

pub mod app;
pub mod commands;
pub mod interaction;
pub mod output;
pub mod ui;

use thiserror::Error;

use crate::errors::{ClientError, ConfigError};

pub use app::{App, Flow};
pub use commands::{parse_args, Command, Invocation};
pub use interaction::{Interaction, TerminalInteraction};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("{0}\n\nRun `user_admin_cli help` for usage.")]
    Usage(String),
}
