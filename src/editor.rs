//! The seam between the read-eval loop and the terminal.

use crate::completion::Completions;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Editor, Helper};
use std::cell::RefCell;
use std::rc::Rc;

/// What the loop needs from a line editor.
///
/// Ctrl-C must come back as [`ReadlineError::Interrupted`]; any other error
/// ends the session.
pub trait LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError>;

    /// Append one entry to the in-memory history.
    fn add_history(&mut self, line: &str);

    /// The whole in-memory history, oldest first.
    fn history(&self) -> Vec<String>;
}

/// [`LineEditor`] backed by a rustyline [`Editor`] with tab completion of
/// command names, flags and global option names.
pub struct RustylineEditor {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl RustylineEditor {
    pub(crate) fn new(completions: Rc<RefCell<Completions>>) -> Result<Self, ReadlineError> {
        let config = Config::builder()
            .auto_add_history(false)
            .history_ignore_dups(false)?
            .completion_type(CompletionType::List)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(ShellHelper { completions }));
        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        self.editor.readline(prompt)
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            log::warn!("failed to add history entry: {e}");
        }
    }

    fn history(&self) -> Vec<String> {
        self.editor.history().iter().cloned().collect()
    }
}

struct ShellHelper {
    completions: Rc<RefCell<Completions>>,
}

impl Helper for ShellHelper {}

impl Highlighter for ShellHelper {}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        Ok(self.completions.borrow().complete(line, pos))
    }
}
