//! Modal, restartable tokenizer: raw text in, typed tokens out.
//!
//! Lexing never fails. A character no rule accepts becomes a `BAD_CHARACTER`
//! token and the stream continues, so concatenating every token's text
//! reproduces the input exactly. Whitespace and comments are ordinary
//! tokens. The stream is finite and ends in a zero width `EOF`.

mod cursor;

use cursor::{Cursor, EOF_CHAR};
pub use lgc_syntax::SyntaxKind;
use text_size::{TextRange, TextSize};

/// A single token: kind plus the exact range it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

/// Lexer mode, selecting the active token alphabet.
///
/// `{` enters `Literal`, `${` and `#{` enter `Ref`, `}` steps back out, and
/// a newline always resets to `Default`. The mode is the tokenizer's only
/// state, which is what makes mid-text restarts possible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Default,
    Literal,
    Ref,
}

pub struct Tokenizer<'text> {
    text: &'text str,
    cursor: Cursor<'text>,
    offset: TextSize,
    mode: Mode,
    peeked: Option<Token>,
}

impl<'text> Tokenizer<'text> {
    pub fn new(text: &'text str) -> Self {
        Self::resume(text, Mode::default())
    }

    /// Starts lexing `text` as the suffix of a larger document, in the given
    /// mode. Token ranges are relative to `text`.
    pub fn resume(text: &'text str, mode: Mode) -> Self {
        Self { text, cursor: Cursor::new(text), offset: TextSize::new(0), mode, peeked: None }
    }

    /// The mode after the most recently lexed token. Captured at a token
    /// boundary, it is all [`Self::resume`] needs to continue from there.
    /// A pending [`Self::peek`] has already advanced it past the peeked
    /// token.
    pub fn state(&self) -> Mode {
        self.mode
    }

    pub fn peek(&mut self) -> Token {
        if let Some(token) = self.peeked {
            return token;
        }
        let token = self.lex();
        self.peeked = Some(token);
        token
    }

    pub fn next_token(&mut self) -> Token {
        self.peeked.take().unwrap_or_else(|| self.lex())
    }

    fn lex(&mut self) -> Token {
        self.cursor.reset_pos_within_token();
        if self.cursor.len() == TextSize::new(0) {
            return Token { kind: SyntaxKind::EOF, range: TextRange::empty(self.offset) };
        }

        let kind = match self.mode {
            Mode::Default => self.default_token(),
            Mode::Literal => self.literal_token(),
            Mode::Ref => self.ref_token(),
        };

        let range = TextRange::at(self.offset, self.cursor.pos_within_token());
        self.offset = range.end();
        Token { kind, range }
    }

    fn default_token(&mut self) -> SyntaxKind {
        match self.cursor.advance() {
            '\n' => SyntaxKind::NEWLINE,
            '\r' if self.cursor.peek() == '\n' => {
                self.cursor.advance();
                SyntaxKind::NEWLINE
            }
            ' ' | '\t' => {
                self.cursor.advance_while(|c| matches!(c, ' ' | '\t'));
                SyntaxKind::WHITESPACE
            }
            '/' if self.cursor.peek() == '/' => {
                self.cursor.advance_while(|c| !matches!(c, '\n' | '\r'));
                SyntaxKind::COMMENT
            }
            '=' => SyntaxKind::EQUALS,
            '#' => SyntaxKind::HASH,
            '{' => {
                self.mode = Mode::Literal;
                SyntaxKind::OPEN_BRACE
            }
            '}' => SyntaxKind::CLOSE_BRACE,
            c if is_word_char(c) => self.word(),
            _ => SyntaxKind::BAD_CHARACTER,
        }
    }

    fn literal_token(&mut self) -> SyntaxKind {
        match self.cursor.advance() {
            '\n' => {
                self.mode = Mode::Default;
                SyntaxKind::NEWLINE
            }
            '\r' if self.cursor.peek() == '\n' => {
                self.cursor.advance();
                self.mode = Mode::Default;
                SyntaxKind::NEWLINE
            }
            '\r' => SyntaxKind::BAD_CHARACTER,
            '}' => {
                self.mode = Mode::Default;
                SyntaxKind::CLOSE_BRACE
            }
            '\\' => {
                // The escaped character is part of the token, except at a
                // line end where the backslash stands alone.
                if !matches!(self.cursor.peek(), '\n' | '\r' | EOF_CHAR) {
                    self.cursor.advance();
                }
                SyntaxKind::ESCAPE
            }
            '$' if self.cursor.peek() == '{' => {
                self.cursor.advance();
                self.mode = Mode::Ref;
                SyntaxKind::ARG_REF_START
            }
            '#' if self.cursor.peek() == '{' => {
                self.cursor.advance();
                self.mode = Mode::Ref;
                SyntaxKind::MESSAGE_REF_START
            }
            _ => self.chunk(),
        }
    }

    fn ref_token(&mut self) -> SyntaxKind {
        match self.cursor.advance() {
            '\n' => {
                self.mode = Mode::Default;
                SyntaxKind::NEWLINE
            }
            '\r' if self.cursor.peek() == '\n' => {
                self.cursor.advance();
                self.mode = Mode::Default;
                SyntaxKind::NEWLINE
            }
            ' ' | '\t' => {
                self.cursor.advance_while(|c| matches!(c, ' ' | '\t'));
                SyntaxKind::WHITESPACE
            }
            '}' => {
                self.mode = Mode::Literal;
                SyntaxKind::CLOSE_BRACE
            }
            c if is_word_char(c) => self.word(),
            _ => SyntaxKind::BAD_CHARACTER,
        }
    }

    fn word(&mut self) -> SyntaxKind {
        self.cursor.advance_while(is_word_char);
        let range = TextRange::at(self.offset, self.cursor.pos_within_token());
        if is_number(&self.text[range]) { SyntaxKind::NUMBER } else { SyntaxKind::IDENTIFIER }
    }

    /// Literal text, stopping before `\`, `}`, a line end, or a `${`/`#{`
    /// opener. A lone `#` or `$` is ordinary text.
    fn chunk(&mut self) -> SyntaxKind {
        loop {
            match self.cursor.peek() {
                EOF_CHAR | '\\' | '}' | '\n' | '\r' => break,
                '$' | '#' if self.cursor.second() == '{' => break,
                _ => {
                    self.cursor.advance();
                }
            }
        }
        SyntaxKind::LITERAL_CHUNK
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn is_number(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    digits(int) && frac.is_none_or(digits)
}
