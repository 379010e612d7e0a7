use std::path::PathBuf;

/// Startup parameters supplied by the host program.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Shell name, shown by `list`.
    pub name: String,
    /// Prompt printed before every interactive read.
    pub prompt: String,
    pub version: String,
    /// Plain-text history file, one entry per line.
    pub history: PathBuf,
    pub description: String,
    /// Command run for empty input. `list` also answers a bare `--help`.
    pub default_command: Option<String>,
}

impl ShellConfig {
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        version: impl Into<String>,
        history: impl Into<PathBuf>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            version: version.into(),
            history: history.into(),
            description: description.into(),
            default_command: Some("list".to_string()),
        }
    }

    pub fn with_default_command(mut self, command: Option<&str>) -> Self {
        self.default_command = command.map(str::to_string);
        self
    }

    /// `$HOME/.<name>_history`, or the working directory when there is no
    /// home directory.
    pub fn default_history_path(name: &str) -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(format!(".{name}_history"))
    }
}
