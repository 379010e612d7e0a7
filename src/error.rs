use rustyline::error::ReadlineError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the shell.
pub type Result<T, E = ShellError> = std::result::Result<T, E>;

/// Everything that can go wrong while the shell parses, dispatches or
/// persists. Asking to quit is not an error; see [`crate::Flow::Quit`].
#[derive(Debug, Error)]
pub enum ShellError {
    /// The first token names no registered command.
    #[error("command \"{0}\" unknown")]
    UnknownCommand(String),

    /// A known command was given options or arguments it does not accept.
    #[error("parse error in {command}: {message}")]
    Parse { command: String, message: String },

    /// The handler ran and reported a failure.
    #[error("failure in execution of {command}: {source:#}")]
    Handler {
        command: String,
        #[source]
        source: anyhow::Error,
    },

    /// `set` referenced an option that no registered command declares.
    #[error("unknown option {0}")]
    UnknownOption(String),

    /// A meta-command was called with the wrong number of arguments.
    #[error("{0}")]
    Usage(String),

    /// A command name was registered twice, or shadows a meta-command.
    #[error("command \"{0}\" is already registered")]
    DuplicateCommand(String),

    /// The history file could not be read or written.
    #[error("history file {}: {source}", .path.display())]
    HistoryIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The line editor failed in a way the loop cannot recover from.
    #[error("reading input: {0}")]
    InputRead(#[from] ReadlineError),

    /// Writing to the output sink failed.
    #[error("writing output: {0}")]
    Output(#[from] io::Error),
}
