//! Comment- and string-aware cursor over CSS text.
//!
//! The scanner knows just enough CSS lexing to find structure: comments,
//! quoted strings, unquoted `url(...)` bodies, backslash escapes and `()`/`[]`
//! nesting. Everything else is opaque text.

use anyhow::{Result, bail};

/// A piece of raw text: either literal text or the inside of a `/*...*/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Comment(&'a str),
}

pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn starts_with(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume whitespace and return it.
    pub fn skip_whitespace(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    /// Consume a `/*...*/` at the cursor and return its inner text.
    pub fn skip_comment(&mut self) -> Result<&'a str> {
        debug_assert!(self.starts_with("/*"));
        let start = self.pos;
        let body = start + 2;
        match self.src[body..].find("*/") {
            Some(len) => {
                self.pos = body + len + 2;
                Ok(&self.src[body..body + len])
            }
            None => {
                let (line, col) = line_col(self.src, start);
                bail!("Unclosed comment at {}:{}", line, col)
            }
        }
    }

    /// Consume a quoted string at the cursor. An unclosed string runs to the
    /// end of input.
    pub fn skip_string(&mut self) {
        let Some(quote) = self.bump() else {
            return;
        };
        while let Some(c) = self.bump() {
            if c == '\\' {
                self.bump();
            } else if c == quote {
                return;
            }
        }
    }

    /// End offset of an unquoted `url(...)` at the cursor. Its body is opaque:
    /// `/*` inside it does not open a comment. `None` for quoted or unclosed
    /// urls and for functions merely ending in `url`.
    pub fn url_end(&self) -> Option<usize> {
        if !matches!(self.peek(), Some('u' | 'U')) {
            return None;
        }
        let rest = self.rest();
        if !rest.get(..4)?.eq_ignore_ascii_case("url(") {
            return None;
        }
        let ident_before = self.src[..self.pos]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_');
        if ident_before {
            return None;
        }

        let body = &rest[4..];
        if body.trim_start().starts_with(['"', '\'']) {
            return None;
        }
        let mut escaped = false;
        for (i, c) in body.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                ')' => return Some(self.pos + 4 + i + 1),
                _ => {}
            }
        }
        None
    }

    /// Advance to the first top-level occurrence of any char in `stops`,
    /// skipping comments, strings, unquoted urls, escapes and bracketed
    /// groups. Returns the stop char found, or `None` at end of input.
    pub fn scan_until(&mut self, stops: &[char]) -> Result<Option<char>> {
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            if depth == 0 && stops.contains(&c) {
                return Ok(Some(c));
            }
            if let Some(end) = self.url_end() {
                self.pos = end;
                continue;
            }
            match c {
                '/' if self.starts_with("/*") => {
                    self.skip_comment()?;
                }
                '"' | '\'' => self.skip_string(),
                '\\' => {
                    self.bump();
                    self.bump();
                }
                '(' | '[' => {
                    depth += 1;
                    self.bump();
                }
                ')' | ']' => {
                    depth = depth.saturating_sub(1);
                    self.bump();
                }
                _ => {
                    self.bump();
                }
            }
        }
        Ok(None)
    }
}

/// Split raw text into text and comment segments.
///
/// Comment markers inside quoted strings are text. An unterminated comment is
/// kept as text.
pub fn split_comments(raw: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut scanner = Scanner::new(raw);
    let mut text_start = 0;

    while let Some(c) = scanner.peek() {
        if let Some(end) = scanner.url_end() {
            scanner.set_pos(end);
            continue;
        }
        match c {
            '/' if scanner.starts_with("/*") => {
                let start = scanner.pos();
                let Ok(text) = scanner.skip_comment() else {
                    break;
                };
                if text_start < start {
                    segments.push(Segment::Text(&raw[text_start..start]));
                }
                segments.push(Segment::Comment(text));
                text_start = scanner.pos();
            }
            '"' | '\'' => scanner.skip_string(),
            '\\' => {
                scanner.bump();
                scanner.bump();
            }
            _ => {
                scanner.bump();
            }
        }
    }

    if text_start < raw.len() {
        segments.push(Segment::Text(&raw[text_start..]));
    }
    segments
}

/// Whether raw text holds at least one comment.
pub fn contains_comment(raw: &str) -> bool {
    raw.contains("/*")
        && split_comments(raw)
            .iter()
            .any(|segment| matches!(segment, Segment::Comment(_)))
}

/// 1-based line and column of a byte offset.
pub fn line_col(src: &str, offset: usize) -> (usize, usize) {
    let before = &src[..offset.min(src.len())];
    let line = before.matches('\n').count() + 1;
    let col = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, col)
}
