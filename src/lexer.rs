//! Splits a raw input line into argument tokens.
//!
//! A token is either a run of non-whitespace characters or the text between a
//! pair of matching single or double quotes. Quotes are stripped and there is
//! no escaping. A quoted span glued to surrounding text stays part of the same
//! token, so `--name="Jane Doe"` is one token. An unterminated quote swallows
//! the rest of the line instead of failing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Start,
    ReadingWord,
    ReadingSingleQuote,
    ReadingDoubleQuote,
}

struct LexingFSM {
    input: Vec<char>,
    pos: usize,
    state: LexingState,
    buffer: String,
    tokens: Vec<String>,
}

impl LexingFSM {
    fn new(line: &str) -> Self {
        LexingFSM {
            input: line.chars().collect(),
            pos: 0,
            state: LexingState::Start,
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    fn make_tokens(mut self) -> Vec<String> {
        while let Some(ch) = self.read_char() {
            match self.state {
                LexingState::Start => self.handle_start(ch),
                LexingState::ReadingWord => self.handle_word(ch),
                LexingState::ReadingSingleQuote => self.handle_quote(ch, '\''),
                LexingState::ReadingDoubleQuote => self.handle_quote(ch, '"'),
            }
        }

        // Unterminated quotes keep whatever they collected.
        if self.state != LexingState::Start {
            self.finish_token();
        }
        // A line of nothing but empty quotes is blank.
        if self.tokens.iter().all(String::is_empty) {
            self.tokens.clear();
        }
        self.tokens
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn handle_start(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => {}
            '\'' => self.state = LexingState::ReadingSingleQuote,
            '"' => self.state = LexingState::ReadingDoubleQuote,
            c => {
                self.buffer.push(c);
                self.state = LexingState::ReadingWord;
            }
        }
    }

    fn handle_word(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => {
                self.finish_token();
                self.state = LexingState::Start;
            }
            '\'' => self.state = LexingState::ReadingSingleQuote,
            '"' => self.state = LexingState::ReadingDoubleQuote,
            c => self.buffer.push(c),
        }
    }

    fn handle_quote(&mut self, ch: char, quote: char) {
        if ch == quote {
            self.state = LexingState::ReadingWord;
        } else {
            self.buffer.push(ch);
        }
    }

    fn finish_token(&mut self) {
        self.tokens.push(std::mem::take(&mut self.buffer));
    }
}

/// Tokenize one input line.
///
/// Blank input yields no tokens, and so does a line whose tokens are all
/// empty after quote stripping. Otherwise an explicit `""` is kept as an
/// empty token.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    LexingFSM::new(line).make_tokens()
}
