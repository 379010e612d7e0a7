use std::collections::BTreeMap;

/// Candidate lists for tab completion, rebuilt by the registry.
#[derive(Debug, Default)]
pub(crate) struct Completions {
    commands: Vec<String>,
    flags: BTreeMap<String, Vec<String>>,
    options: Vec<String>,
}

impl Completions {
    pub(crate) fn update(
        &mut self,
        commands: Vec<String>,
        flags: BTreeMap<String, Vec<String>>,
        options: Vec<String>,
    ) {
        self.commands = commands;
        self.flags = flags;
        self.options = options;
    }

    /// Complete the word ending at byte offset `pos`. Returns where the word
    /// starts and the sorted candidates for it.
    ///
    /// The first word completes to command names, the first argument of
    /// `set`/`unset` to option names, and a word starting with `-` to the long
    /// flags of the command being typed.
    pub(crate) fn complete(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let head = &line[..pos];
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let word = &head[start..];
        let previous: Vec<&str> = head[..start].split_whitespace().collect();

        let mut candidates: Vec<String> = match previous.as_slice() {
            [] => {
                let prefix = word.to_lowercase();
                filter(&self.commands, &prefix)
            }
            ["set" | "unset"] => filter(&self.options, word),
            [command, ..] if word.starts_with('-') => match self.flags.get(*command) {
                Some(flags) => {
                    let flags: Vec<String> = flags.iter().map(|name| format!("--{name}")).collect();
                    filter(&flags, word)
                }
                None => Vec::new(),
            },
            _ => Vec::new(),
        };
        candidates.sort();
        (start, candidates)
    }
}

fn filter(items: &[String], prefix: &str) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.starts_with(prefix))
        .cloned()
        .collect()
}
