//! An embeddable interactive command shell.
//!
//! A host program declares its commands as [`argh`] structs implementing
//! [`Command`], registers them with a [`Shell`] and calls [`Shell::start`].
//! The shell reads lines through [`rustyline`], splits them into tokens,
//! routes them to the registered handler and keeps input history in a plain
//! text file between sessions.
//!
//! Besides the registered commands the shell always understands the
//! meta-commands `quit`/`exit`, `set [<name> <value>]` and `unset <name>`.
//! `set` stores session-wide option values that a command falls back on when
//! the option is missing from its command line (see [`Context::option`]).
//! The built-in `list` and `help` commands describe what is registered.

mod builtin;
pub mod command;
mod completion;
pub mod config;
mod dispatch;
pub mod editor;
pub mod error;
pub mod history;
mod io_adapters;
pub mod lexer;
pub mod options;
pub mod registry;
mod shell;

pub use builtin::{Help, List};
pub use command::{Command, CommandFactory, Context, Factory, Invocation, factory};
pub use config::ShellConfig;
pub use dispatch::{Flow, Route};
pub use editor::{LineEditor, RustylineEditor};
pub use error::{Result, ShellError};
pub use io_adapters::MemWriter;
pub use options::GlobalOptions;
pub use registry::Registry;
pub use rustyline::error::ReadlineError;
pub use shell::Shell;
