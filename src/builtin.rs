use crate::command::{Command, Context};
use anyhow::{Result, bail};
use argh::{ArgsInfo, FromArgs};
use std::io::Write;

/// Short descriptions of the meta-commands, shown by `list`.
const META_HELP: [(&str, &str); 4] = [
    ("quit", "leave the shell"),
    ("exit", "leave the shell"),
    ("set", "show global options, or `set <name> <value>` to set one"),
    ("unset", "`unset <name>` removes a global option"),
];

#[derive(FromArgs, ArgsInfo)]
#[argh(help_triggers("-h", "--help"))]
/// list all available commands
pub struct List {}

impl Command for List {
    fn name() -> &'static str {
        "list"
    }

    fn execute(self, ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
        write_listing(ctx, out)
    }
}

#[derive(FromArgs, ArgsInfo)]
#[argh(help_triggers("-h", "--help"))]
/// show usage for a command, or list all commands
pub struct Help {
    #[argh(positional)]
    /// command to describe
    pub command: Option<String>,
}

impl Command for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(self, ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
        let Some(name) = self.command else {
            return write_listing(ctx, out);
        };
        match ctx.registry().get(&name) {
            Some(command) => write!(out, "{}", command.usage())?,
            None => bail!("command \"{name}\" unknown"),
        }
        Ok(())
    }
}

fn write_listing(ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let config = ctx.config();
    writeln!(out, "{} {}", config.name, config.version)?;
    if !config.description.is_empty() {
        writeln!(out, "{}", config.description)?;
    }

    let width = ctx
        .registry()
        .names()
        .chain(META_HELP.iter().map(|(name, _)| *name))
        .map(str::len)
        .max()
        .unwrap_or(0);

    writeln!(out, "\nCommands:")?;
    for command in ctx.registry().iter() {
        writeln!(out, "  {:<width$}  {}", command.name(), command.description())?;
    }
    writeln!(out, "\nShell:")?;
    for (name, description) in META_HELP {
        writeln!(out, "  {name:<width$}  {description}")?;
    }
    Ok(())
}
