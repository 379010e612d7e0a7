use crate::error::{Result, ShellError};
use crate::registry::Registry;
use std::collections::BTreeMap;

/// Session-wide option values managed by the `set` and `unset` meta-commands.
///
/// Commands consult the store as a fallback when an option is missing from the
/// command line. Values live until they are unset or the shell exits; they are
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    values: BTreeMap<String, String>,
}

impl GlobalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    ///
    /// Only options declared by some registered command (or a default option
    /// such as `help`) can be set; anything else fails with
    /// [`ShellError::UnknownOption`] and leaves the store untouched.
    pub fn set(&mut self, registry: &Registry, name: &str, value: impl Into<String>) -> Result<()> {
        if !registry.knows_option(name) {
            return Err(ShellError::UnknownOption(name.to_string()));
        }
        self.values.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Remove `name`, returning its previous value. Unsetting an option that
    /// was never set does nothing.
    pub fn unset(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// The stored value for `name`, if one was set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Three-tier lookup: the value provided on the command line, then the
    /// global value, then the empty string.
    pub fn resolve(&self, name: &str, provided: Option<&str>) -> String {
        provided
            .or_else(|| self.get(name))
            .unwrap_or_default()
            .to_string()
    }

    /// `name=value` lines sorted by name.
    pub fn dump(&self) -> String {
        self.values
            .iter()
            .map(|(name, value)| format!("{name}={value}\n"))
            .collect()
    }

    /// Stored options sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no option is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
