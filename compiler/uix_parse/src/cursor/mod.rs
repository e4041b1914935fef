//! Character cursor shared by both grammars.

use uix_ir::Span;

use crate::SyntaxError;

pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Cursor { text, pos: 0 }
    }

    #[inline]
    pub(crate) fn offset(&self) -> u32 {
        u32::try_from(self.pos).unwrap_or(u32::MAX)
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Whether only whitespace remains.
    pub(crate) fn rest_is_whitespace(&self) -> bool {
        self.text[self.pos..].chars().all(char::is_whitespace)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `c` if it is next.
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume `s` if the remaining text starts with it.
    pub(crate) fn eat_str(&mut self, s: &str) -> bool {
        if self.text[self.pos..].starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Span from `start` to the current position.
    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.offset())
    }

    /// Span of the next character, or a point span at end of text.
    pub(crate) fn next_span(&self) -> Span {
        let len = self.peek().map_or(0, char::len_utf8);
        Span::from_range(self.pos..self.pos + len)
    }

    pub(crate) fn expect(&mut self, c: char, context: &str) -> Result<(), SyntaxError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("expected `{c}` {context}")))
        }
    }

    /// Error at the next character, naming what was found.
    #[cold]
    pub(crate) fn unexpected(&self, expected: &str) -> SyntaxError {
        let found = match self.peek() {
            Some(c) => format!("found `{c}`"),
            None => "found end of path".to_string(),
        };
        SyntaxError::new(format!("{expected}, {found}"), self.next_span())
    }

    pub(crate) fn ident(&mut self) -> Option<String> {
        if !self.peek().is_some_and(is_ident_start) {
            return None;
        }
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        Some(self.text[start..self.pos].to_string())
    }

    pub(crate) fn expect_ident(&mut self, what: &str) -> Result<String, SyntaxError> {
        self.ident()
            .ok_or_else(|| self.unexpected(&format!("expected {what}")))
    }

    /// Type name, optionally namespace-prefixed (`vm:Person`).
    pub(crate) fn type_name(&mut self) -> Result<String, SyntaxError> {
        let mut name = self.expect_ident("type name")?;
        if self.peek() == Some(':') {
            self.bump();
            let local = self.expect_ident("type name after namespace prefix")?;
            name.push(':');
            name.push_str(&local);
        }
        Ok(name)
    }
}
