use crate::config::ShellConfig;
use crate::options::GlobalOptions;
use crate::registry::Registry;
use argh::{ArgsInfo, EarlyExit, FromArgs};
use std::io::Write;
use std::marker::PhantomData;

/// A command the host registers with the shell.
///
/// The argument surface is declared with [`argh`]: `FromArgs` parses a fresh
/// value for every invocation and generates `--help`, while `ArgsInfo` lets
/// the shell learn the option names and description. Because each call gets
/// its own parsed value, nothing from a previous invocation can leak into the
/// next one.
///
/// Options that may fall back to a global value should be declared as
/// `Option<String>` and read through [`Context::option`].
///
/// The shell answers `-h` and `--help` itself. Declare commands with
/// `#[argh(help_triggers("-h", "--help"))]` so that a bare `help` argument
/// reaches the command as an ordinary value.
pub trait Command: Sized + FromArgs + ArgsInfo {
    /// Name the command is invoked by.
    fn name() -> &'static str;

    /// Runs the command. Everything written to `out` ends up on the shell's
    /// output sink; an error is reported to the user and the loop continues.
    fn execute(self, ctx: &Context<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

/// Session state a handler can read while it runs.
pub struct Context<'a> {
    pub(crate) options: &'a GlobalOptions,
    pub(crate) registry: &'a Registry,
    pub(crate) config: &'a ShellConfig,
}

impl<'a> Context<'a> {
    /// Resolve option `name`: the value given on this command line wins, then
    /// the global value from `set`, otherwise the empty string.
    pub fn option(&self, name: &str, provided: Option<&str>) -> String {
        self.options.resolve(name, provided)
    }

    /// The shell-wide option store.
    pub fn globals(&self) -> &'a GlobalOptions {
        self.options
    }

    /// Every registered command.
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// The shell configuration.
    pub fn config(&self) -> &'a ShellConfig {
        self.config
    }
}

/// What happened when a command was handed its arguments.
#[derive(Debug)]
pub enum Invocation {
    /// Arguments parsed and the handler ran.
    Ran(anyhow::Result<()>),
    /// `--help` was requested; holds the usage text.
    Help(String),
    /// Arguments were rejected.
    Invalid { message: String, usage: String },
}

/// Object-safe view of a registered command.
///
/// Implemented for [`Factory<T>`] for every [`Command`]; hosts normally never
/// implement it by hand.
pub trait CommandFactory {
    fn name(&self) -> &'static str;

    /// One-line description taken from the command's doc comment.
    fn description(&self) -> String;

    /// Long option names the command declares, without the leading `--`.
    fn option_names(&self) -> Vec<String>;

    /// Usage text as printed by `<command> --help`.
    fn usage(&self) -> String;

    /// Parse `args` into a fresh command value and run it.
    fn invoke(&self, args: &[&str], ctx: &Context<'_>, out: &mut dyn Write) -> Invocation;
}

/// Zero-sized handle that turns a [`Command`] type into a [`CommandFactory`].
pub struct Factory<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

/// Box up a command type for [`crate::Shell::register_all`].
pub fn factory<T: Command + 'static>() -> Box<dyn CommandFactory> {
    Box::new(Factory::<T>::default())
}

impl<T: Command> CommandFactory for Factory<T> {
    fn name(&self) -> &'static str {
        T::name()
    }

    fn description(&self) -> String {
        let info = T::get_args_info();
        info.description.trim().to_string()
    }

    fn option_names(&self) -> Vec<String> {
        let info = T::get_args_info();
        info.flags
            .iter()
            .filter_map(|flag| flag.long.strip_prefix("--"))
            .map(str::to_string)
            .collect()
    }

    fn usage(&self) -> String {
        match T::from_args(&[T::name()], &["--help"]) {
            Err(EarlyExit { output, .. }) => output,
            Ok(_) => String::new(),
        }
    }

    fn invoke(&self, args: &[&str], ctx: &Context<'_>, out: &mut dyn Write) -> Invocation {
        if wants_help(args) {
            return Invocation::Help(self.usage());
        }
        match T::from_args(&[T::name()], args) {
            Ok(cmd) => Invocation::Ran(cmd.execute(ctx, out)),
            Err(EarlyExit {
                output,
                status: Ok(()),
            }) => Invocation::Help(output),
            Err(EarlyExit {
                output,
                status: Err(()),
            }) => Invocation::Invalid {
                message: output.trim().to_string(),
                usage: self.usage(),
            },
        }
    }
}

/// `-h` or `--help` anywhere before a `--` terminator.
fn wants_help(args: &[&str]) -> bool {
    args.iter()
        .take_while(|arg| **arg != "--")
        .any(|arg| matches!(*arg, "-h" | "--help"))
}
