use crate::command::CommandFactory;
use crate::completion::Completions;
use crate::error::{Result, ShellError};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Words the dispatcher handles itself; no command may take these names.
pub const META_COMMANDS: [&str; 4] = ["quit", "exit", "set", "unset"];

/// Options every command understands.
const DEFAULT_OPTIONS: [&str; 1] = ["help"];

/// Registered commands keyed by name, plus the derived set of option names
/// that `set` may target.
pub struct Registry {
    commands: BTreeMap<&'static str, Box<dyn CommandFactory>>,
    options: BTreeSet<String>,
    completions: Rc<RefCell<Completions>>,
}

impl Registry {
    pub fn new() -> Self {
        let mut registry = Self {
            commands: BTreeMap::new(),
            options: BTreeSet::new(),
            completions: Rc::default(),
        };
        registry.refresh();
        registry
    }

    /// Registry pre-filled with the shell's own commands, whose names are
    /// known not to collide.
    pub(crate) fn with_builtins(builtins: Vec<Box<dyn CommandFactory>>) -> Self {
        let mut registry = Self::new();
        for command in builtins {
            registry.commands.insert(command.name(), command);
        }
        registry.refresh();
        registry
    }

    /// Add one command. Fails with [`ShellError::DuplicateCommand`] when the
    /// name is taken or is a meta-command; the registry is unchanged then.
    pub fn register(&mut self, command: Box<dyn CommandFactory>) -> Result<()> {
        self.insert(command)?;
        self.refresh();
        Ok(())
    }

    /// Add several commands, stopping at the first collision. Commands before
    /// the collision stay registered.
    pub fn register_all(&mut self, commands: Vec<Box<dyn CommandFactory>>) -> Result<()> {
        let result = commands.into_iter().try_for_each(|command| self.insert(command));
        self.refresh();
        result
    }

    /// Looks up a command by its exact name.
    pub fn get(&self, name: &str) -> Option<&(dyn CommandFactory + 'static)> {
        self.commands.get(name).map(|command| command.as_ref())
    }

    /// Commands sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn CommandFactory + 'static)> {
        self.commands.values().map(|command| command.as_ref())
    }

    /// Command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn knows_option(&self, name: &str) -> bool {
        self.options.contains(name)
    }

    /// Names accepted by `set` and `unset`.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(String::as_str)
    }

    /// Number of registered commands, builtins included.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Completion data shared with the line editor. It is refreshed in place
    /// whenever commands are registered.
    pub(crate) fn completions(&self) -> Rc<RefCell<Completions>> {
        Rc::clone(&self.completions)
    }

    fn insert(&mut self, command: Box<dyn CommandFactory>) -> Result<()> {
        let name = command.name();
        if META_COMMANDS.contains(&name) || self.commands.contains_key(name) {
            return Err(ShellError::DuplicateCommand(name.to_string()));
        }
        log::debug!("registered command {name}");
        self.commands.insert(name, command);
        Ok(())
    }

    fn refresh(&mut self) {
        let flags: BTreeMap<String, Vec<String>> = self
            .commands
            .iter()
            .map(|(name, command)| (name.to_string(), command.option_names()))
            .collect();

        self.options = DEFAULT_OPTIONS
            .iter()
            .map(|name| name.to_string())
            .chain(flags.values().flatten().cloned())
            .collect();

        let mut commands: Vec<String> = self
            .commands
            .keys()
            .chain(META_COMMANDS.iter())
            .map(|name| name.to_string())
            .collect();
        commands.sort();

        self.completions.borrow_mut().update(
            commands,
            flags,
            self.options.iter().cloned().collect(),
        );
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
