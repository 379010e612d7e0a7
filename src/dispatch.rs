//! Routing and dispatch of one tokenized line.

use crate::command::{Context, Invocation};
use crate::error::{Result, ShellError};
use crate::shell::Shell;
use log::debug;
use std::io::Write;

/// Whether the loop should keep going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Where a tokenized line goes. [`Route::of`] checks the cases in declaration
/// order; the first that matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Empty input, or a lone `-h`/`--help` while `list` is the default command.
    Default,
    /// A lone `quit` or `exit`.
    Quit,
    /// `set`, with whatever follows it.
    Set(&'a [String]),
    /// `unset`, with whatever follows it.
    Unset(&'a [String]),
    /// A command name and its arguments.
    Command { name: &'a str, args: &'a [String] },
}

impl<'a> Route<'a> {
    pub fn of(tokens: &'a [String], default_command: Option<&str>) -> Self {
        match tokens {
            [] => Route::Default,
            [flag] if (flag == "-h" || flag == "--help") && default_command == Some("list") => {
                Route::Default
            }
            [word] if word == "quit" || word == "exit" => Route::Quit,
            [first, rest @ ..] if first == "set" => Route::Set(rest),
            [first, rest @ ..] if first == "unset" => Route::Unset(rest),
            [name, args @ ..] => Route::Command {
                name: name.as_str(),
                args,
            },
        }
    }
}

impl Shell {
    /// Run one tokenized line.
    ///
    /// Every problem is written to the output sink before it is returned, so
    /// callers only need the error to classify the outcome. Only
    /// [`Flow::Quit`] asks the caller to stop.
    pub fn dispatch(&mut self, tokens: &[String]) -> Result<Flow> {
        let route = Route::of(tokens, self.config.default_command.as_deref());
        debug!("route {route:?}");
        let result = match route {
            Route::Default => match self.config.default_command.clone() {
                Some(name) => self.run_command(&name, &[]),
                None => Ok(Flow::Continue),
            },
            Route::Quit => Ok(Flow::Quit),
            Route::Set(args) => self.set_command(args).map(|()| Flow::Continue),
            Route::Unset(args) => self.unset_command(args).map(|()| Flow::Continue),
            Route::Command { name, args } => self.run_command(name, args),
        };
        self.out.flush()?;
        result
    }

    fn run_command(&mut self, name: &str, args: &[String]) -> Result<Flow> {
        let Some(command) = self.registry.get(name) else {
            writeln!(self.out, "error: command \"{name}\" unknown")?;
            return Err(ShellError::UnknownCommand(name.to_string()));
        };

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let ctx = Context {
            options: &self.options,
            registry: &self.registry,
            config: &self.config,
        };
        match command.invoke(&args, &ctx, &mut *self.out) {
            Invocation::Ran(Ok(())) => Ok(Flow::Continue),
            Invocation::Ran(Err(source)) => {
                writeln!(self.out, "failure in execution: {source:#}")?;
                Err(ShellError::Handler {
                    command: name.to_string(),
                    source,
                })
            }
            Invocation::Help(usage) => {
                write!(self.out, "{usage}")?;
                Ok(Flow::Continue)
            }
            Invocation::Invalid { message, usage } => {
                writeln!(self.out, "parse error: {message}")?;
                write!(self.out, "{usage}")?;
                Err(ShellError::Parse {
                    command: name.to_string(),
                    message,
                })
            }
        }
    }

    fn set_command(&mut self, args: &[String]) -> Result<()> {
        match args {
            [] => {
                let dump = self.options.dump();
                write!(self.out, "{dump}")?;
                Ok(())
            }
            [name, value] => {
                if let Err(err) = self.options.set(&self.registry, name, value.as_str()) {
                    writeln!(self.out, "error: {err}")?;
                    return Err(err);
                }
                debug!("global option {name}={value}");
                Ok(())
            }
            _ => self.usage_error("usage: set [<name> <value>]"),
        }
    }

    fn unset_command(&mut self, args: &[String]) -> Result<()> {
        match args {
            [name] => {
                if self.options.unset(name).is_some() {
                    debug!("global option {name} unset");
                }
                Ok(())
            }
            _ => self.usage_error("usage: unset <name>"),
        }
    }

    fn usage_error(&mut self, usage: &str) -> Result<()> {
        writeln!(self.out, "error: {usage}")?;
        Err(ShellError::Usage(usage.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[String] = &[];

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_route_decision_table() {
        let list = Some("list");
        let cases: Vec<(Vec<String>, Option<&str>, Route<'_>)> = vec![
            (tokens(&[]), list, Route::Default),
            (tokens(&["--help"]), list, Route::Default),
            (tokens(&["-h"]), list, Route::Default),
            (tokens(&["quit"]), list, Route::Quit),
            (tokens(&["exit"]), list, Route::Quit),
            (tokens(&["set"]), list, Route::Set(NONE)),
            (tokens(&["unset"]), list, Route::Unset(NONE)),
        ];
        for (input, default, expected) in &cases {
            assert_eq!(Route::of(input, *default), *expected, "input {input:?}");
        }
    }

    #[test]
    fn test_route_help_without_list_default_is_a_command() {
        let input = tokens(&["--help"]);
        assert_eq!(
            Route::of(&input, Some("menu")),
            Route::Command {
                name: "--help",
                args: NONE
            }
        );
    }

    #[test]
    fn test_route_quit_with_arguments_is_a_command() {
        let input = tokens(&["quit", "now"]);
        match Route::of(&input, Some("list")) {
            Route::Command { name, args } => {
                assert_eq!(name, "quit");
                assert_eq!(args, &["now".to_string()]);
            }
            other => panic!("unexpected route {other:?}"),
        }
    }

    #[test]
    fn test_route_set_and_unset_keep_arguments() {
        let input = tokens(&["set", "region", "us-east"]);
        assert_eq!(Route::of(&input, None), Route::Set(&input[1..]));

        let input = tokens(&["unset", "region"]);
        assert_eq!(Route::of(&input, None), Route::Unset(&input[1..]));
    }

    #[test]
    fn test_route_command_with_arguments() {
        let input = tokens(&["hello", "--name", "Jane Doe"]);
        assert_eq!(
            Route::of(&input, Some("list")),
            Route::Command {
                name: "hello",
                args: &input[1..]
            }
        );
    }
}
