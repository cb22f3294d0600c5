//! Scanner (tokenizer) for integer expressions
//!
//! Pulls characters from any [`BufRead`] one at a time and hands classified
//! [`Token`]s to the parser on demand. There is no separate tokenize pass:
//! the parser calls [`Scanner::next_token`] and, when a token does not fit
//! the rule it is in, [`Scanner::backup`] to leave it for the caller above.

use super::ast::Position;
use std::fmt;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::trace;

/// Token classes produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    EndOfInput,
    Illegal,
    /// Reserved; no identifier syntax is scanned yet.
    Identifier,
    IntegerLiteral,

    // Infix operators
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
}

/// A token together with the text it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::Illegal => write!(f, "illegal character '{}'", self.lexeme),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntegerLiteral => write!(f, "integer literal {}", self.lexeme),
            TokenKind::Add | TokenKind::Subtract | TokenKind::Multiply | TokenKind::Divide => {
                write!(f, "'{}'", self.lexeme)
            }
        }
    }
}

/// Scanner error type
///
/// End of input is not an error; it is reported as [`TokenKind::EndOfInput`].
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Read error at {position}: {source}")]
    Io { source: io::Error, position: Position },
}

impl ScanError {
    pub fn position(&self) -> Position {
        match self {
            ScanError::Io { position, .. } => *position,
        }
    }
}

/// Pull-based scanner over a character stream
pub struct Scanner<R> {
    reader: R,
    line: usize,
    column: usize,
    /// One character of pushback, used to end digit runs.
    pending_char: Option<char>,
    /// The most recently returned token, kept so `backup` can replay it.
    last: Option<Token>,
    lookahead: Option<Token>,
    at_end: bool,
}

impl<R: BufRead> Scanner<R> {
    /// Create a scanner positioned at line 1, before the first column.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 1,
            column: 0,
            pending_char: None,
            last: None,
            lookahead: None,
            at_end: false,
        }
    }

    /// Return the next token, replaying a backed-up token first if there is one.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => {
                let token = self.scan_token()?;
                trace!(
                    kind = ?token.kind,
                    lexeme = %token.lexeme,
                    line = token.position.line,
                    column = token.position.column,
                    "scanned token"
                );
                token
            }
        };
        self.last = Some(token.clone());
        Ok(token)
    }

    /// Push the most recently returned token back onto the stream.
    ///
    /// Only one token of lookahead is kept; calling this twice in a row
    /// without an intervening `next_token` has no further effect.
    pub fn backup(&mut self) {
        if let Some(token) = self.last.take() {
            self.lookahead = Some(token);
        }
    }

    /// Current cursor position
    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn scan_token(&mut self) -> Result<Token, ScanError> {
        if self.at_end {
            return Ok(self.end_of_input());
        }

        loop {
            let Some(ch) = self.read_char()? else {
                self.at_end = true;
                return Ok(self.end_of_input());
            };
            let position = self.position();

            let kind = match ch {
                '\n' => {
                    self.new_line();
                    continue;
                }
                c if c.is_whitespace() => continue,
                '0'..='9' => return self.integer_literal(ch, position),
                '+' => TokenKind::Add,
                '-' => TokenKind::Subtract,
                '*' => TokenKind::Multiply,
                '/' => TokenKind::Divide,
                _ => TokenKind::Illegal,
            };
            return Ok(Token::new(kind, ch.to_string(), position));
        }
    }

    /// Greedily consume a run of ASCII digits.
    fn integer_literal(
        &mut self,
        first_digit: char,
        position: Position,
    ) -> Result<Token, ScanError> {
        let mut lexeme = String::new();
        lexeme.push(first_digit);

        while let Some(ch) = self.read_char()? {
            if ch.is_ascii_digit() {
                lexeme.push(ch);
            } else {
                self.unread_char(ch);
                break;
            }
        }

        Ok(Token::new(TokenKind::IntegerLiteral, lexeme, position))
    }

    /// End of input sits one column past the last character read.
    fn end_of_input(&self) -> Token {
        let position = Position::new(self.line, self.column + 1);
        Token::new(TokenKind::EndOfInput, "", position)
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.column = 0;
    }

    fn read_char(&mut self) -> Result<Option<char>, ScanError> {
        let ch = match self.pending_char.take() {
            Some(ch) => Some(ch),
            None => self.decode_char()?,
        };
        if ch.is_some() {
            self.column += 1;
        }
        Ok(ch)
    }

    fn unread_char(&mut self, ch: char) {
        debug_assert!(self.pending_char.is_none(), "one character of pushback");
        self.pending_char = Some(ch);
        self.column -= 1;
    }

    /// Decode one UTF-8 character from the reader.
    fn decode_char(&mut self) -> Result<Option<char>, ScanError> {
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };

        let width = utf8_width(lead).ok_or_else(|| self.invalid_utf8())?;
        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            *slot = self.read_byte()?.ok_or_else(|| self.invalid_utf8())?;
        }

        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| self.invalid_utf8())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, ScanError> {
        let position = self.position();
        loop {
            let byte = match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => buf[0],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(ScanError::Io { source, position }),
            };
            self.reader.consume(1);
            return Ok(Some(byte));
        }
    }

    fn invalid_utf8(&self) -> ScanError {
        ScanError::Io {
            source: io::Error::new(
                io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            ),
            position: self.position(),
        }
    }
}

/// Encoded length of a UTF-8 sequence from its lead byte.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
