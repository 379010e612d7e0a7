use crate::builtin::{Help, List};
use crate::command::{Command, CommandFactory, Factory};
use crate::config::ShellConfig;
use crate::dispatch::Flow;
use crate::editor::{LineEditor, RustylineEditor};
use crate::error::Result;
use crate::history::HistoryFile;
use crate::lexer;
use crate::options::GlobalOptions;
use crate::registry::Registry;
use log::{debug, warn};
use rustyline::error::ReadlineError;
use std::io::Write;

/// An embeddable interactive shell.
///
/// The host registers its commands and calls [`Shell::start`]. With arguments
/// the shell runs them as a single command and returns; without, it reads and
/// dispatches lines until the user types `quit` or `exit`, keeping history in
/// the configured file. `list` and `help` are always registered.
///
/// Example
/// ```
/// use cmdshell::{MemWriter, Shell, ShellConfig};
/// let out = MemWriter::new();
/// let config = ShellConfig::new("demo", "demo> ", "0.1.0", "/tmp/.demo_history", "Demo");
/// let mut shell = Shell::new(config).with_output(out.clone());
/// shell.start(&["list".to_string()]).unwrap();
/// assert!(out.contents().starts_with("demo 0.1.0"));
/// ```
pub struct Shell {
    pub(crate) config: ShellConfig,
    pub(crate) registry: Registry,
    pub(crate) options: GlobalOptions,
    pub(crate) out: Box<dyn Write>,
}

impl Shell {
    /// Create a shell writing to standard output.
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            registry: Registry::with_builtins(vec![
                Box::new(Factory::<List>::default()),
                Box::new(Factory::<Help>::default()),
            ]),
            options: GlobalOptions::new(),
            out: Box::new(std::io::stdout()),
        }
    }

    /// Send all shell and command output to `out` instead of stdout.
    pub fn with_output(mut self, out: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    pub fn register<T: Command + 'static>(&mut self) -> Result<()> {
        self.registry.register(Box::new(Factory::<T>::default()))
    }

    pub fn register_all(&mut self, commands: Vec<Box<dyn CommandFactory>>) -> Result<()> {
        self.registry.register_all(commands)
    }

    /// Same as typing `set <name> <value>`, without the output.
    pub fn set_global_option(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.options.set(&self.registry, name, value)
    }

    /// Same as typing `unset <name>`, without the output.
    pub fn unset_global_option(&mut self, name: &str) -> Option<String> {
        self.options.unset(name)
    }

    pub fn global_options(&self) -> &GlobalOptions {
        &self.options
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Tokenize and dispatch one raw line.
    pub fn run_line(&mut self, line: &str) -> Result<Flow> {
        self.dispatch(&lexer::split_into_tokens(line))
    }

    /// Run the shell.
    ///
    /// Non-empty `args` are dispatched once as a command line and the outcome
    /// returned; no prompt is shown and the history file is not touched.
    /// Otherwise an interactive session runs on the terminal until the user
    /// quits.
    pub fn start(&mut self, args: &[String]) -> Result<()> {
        if !args.is_empty() {
            debug!("non-interactive run of {args:?}");
            return self.dispatch(args).map(|_| ());
        }
        let mut editor = RustylineEditor::new(self.registry.completions())?;
        self.run_interactive(&mut editor)
    }

    /// Interactive session on any [`LineEditor`].
    ///
    /// History is loaded before the first prompt and saved after the loop
    /// ends, whichever way it ends. History failures are reported as
    /// warnings and never stop the shell.
    pub fn run_interactive<E: LineEditor>(&mut self, editor: &mut E) -> Result<()> {
        let history = HistoryFile::new(&self.config.history);
        match history.load() {
            Ok(entries) => {
                for entry in &entries {
                    editor.add_history(entry);
                }
            }
            Err(err) => {
                warn!("{err}");
                writeln!(self.out, "warning: could not load history: {err}")?;
            }
        }

        let result = self.read_eval_loop(editor);

        let entries = editor.history();
        if let Err(err) = history.save(entries.iter().map(String::as_str)) {
            warn!("{err}");
            writeln!(self.out, "error writing history file: {err}")?;
        }
        self.out.flush()?;
        result
    }

    fn read_eval_loop<E: LineEditor>(&mut self, editor: &mut E) -> Result<()> {
        loop {
            let line = match editor.read_line(&self.config.prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    writeln!(self.out, "type \"quit\" to quit")?;
                    self.out.flush()?;
                    continue;
                }
                Err(err) => {
                    writeln!(self.out, "quitting on error :: {err}")?;
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match self.run_line(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                // Already reported on the output sink.
                Err(err) => debug!("{line:?}: {err}"),
            }
            editor.add_history(&line);
        }
        Ok(())
    }
}
