//! Example host for the shell with a single `hello` command.
//!
//! Interactive:      mycli
//! Non-interactive:  mycli hello --name zerostack

use anyhow::{Context as _, Result, anyhow};
use argh::{ArgsInfo, FromArgs};
use cmdshell::{Command, Context, Shell, ShellConfig, ShellError};
use log::debug;
use std::io::Write;
use std::process::ExitCode;

const NAME: &str = "mycli";
const PROMPT: &str = "mycli> ";

#[derive(FromArgs, ArgsInfo)]
#[argh(help_triggers("-h", "--help"))]
/// greeting message
struct Hello {
    #[argh(option, short = 'n')]
    /// name to greet; falls back to `set name <value>`
    name: Option<String>,
}

impl Command for Hello {
    fn name() -> &'static str {
        "hello"
    }

    fn execute(self, ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
        let name = ctx.option("name", self.name.as_deref());
        if name.is_empty() {
            writeln!(out, "please provide a name using the --name flag or set command")?;
            return Ok(());
        }
        writeln!(out, "Hello {name}")?;
        Ok(())
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("could not start {NAME} :: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let config = ShellConfig::new(
        NAME,
        PROMPT,
        env!("CARGO_PKG_VERSION"),
        ShellConfig::default_history_path(NAME),
        "My CLI",
    );
    let mut shell = Shell::new(config);
    shell.register::<Hello>().context("registering commands")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match shell.start(&args) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(ShellError::InputRead(err)) => Err(anyhow!("terminal unavailable: {err}")),
        Err(err) => {
            // The shell has already printed the problem.
            debug!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
