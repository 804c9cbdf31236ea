//! Static `require` scanner.
//!
//! A byte-level state machine that walks Lua source once, tracking string and
//! comment boundaries, and extracts the literal argument of every `require`
//! found in ordinary code. It never builds tokens or an AST.
//!
//! ```text
//!             ' or "                        matching unescaped quote
//!   Normal ───────────────▶ In*QuoteString ─────────────────────────▶ Normal
//!     │  [=*[                                  ]=*] (same level)
//!     ├───────────────▶ InLongBracketString ──────────────────────▶ Normal
//!     │  --[=*[                                ]=*] (same level)
//!     ├───────────────▶ InBlockComment ───────────────────────────▶ Normal
//!     │  --                                    \n
//!     └───────────────▶ InLineComment ────────────────────────────▶ Normal
//! ```
//!
//! A `require` whose argument is anything but a string literal, or whose
//! literal is followed by `..`, cannot be resolved without running the code
//! and fails the scan.

use std::path::Path;

use memchr::{memchr, memchr2};

use crate::error::{Construct, DiscoveryError, DynamicReason, Result};

const REQUIRE_KEYWORD: &[u8] = b"require";

/// One statically determined `require` found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Raw literal content; escape sequences are kept as written.
    pub specifier: String,
    /// 1-based line of the `require` keyword.
    pub line: usize,
}

impl Reference {
    pub fn new(specifier: impl Into<String>, line: usize) -> Self {
        Self {
            specifier: specifier.into(),
            line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InSingleQuoteString { opened_at: usize },
    InDoubleQuoteString { opened_at: usize },
    InLongBracketString { level: usize, opened_at: usize },
    InLineComment,
    InBlockComment { level: usize, opened_at: usize },
}

/// Extract every static `require` from `text`, in source order.
///
/// `file` is only used for diagnostics.
pub fn scan_references(text: &str, file: &Path) -> Result<Vec<Reference>> {
    Scanner::new(text, file).scan()
}

/// Single-use scanner over one source text.
pub struct Scanner<'a> {
    src: &'a [u8],
    file: &'a Path,
    pos: usize,
    line: usize,
    state: ScanState,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, file: &'a Path) -> Self {
        Self {
            src: text.as_bytes(),
            file,
            pos: 0,
            line: 1,
            state: ScanState::Normal,
        }
    }

    /// Run the scan to the end of input.
    pub fn scan(mut self) -> Result<Vec<Reference>> {
        let mut references = Vec::new();

        while self.pos < self.src.len() {
            match self.state {
                ScanState::Normal => {
                    if let Some(reference) = self.step_normal()? {
                        references.push(reference);
                    }
                }
                ScanState::InSingleQuoteString { .. } => self.step_short_string(b'\''),
                ScanState::InDoubleQuoteString { .. } => self.step_short_string(b'"'),
                ScanState::InLongBracketString { level, .. }
                | ScanState::InBlockComment { level, .. } => self.step_long_bracket(level),
                ScanState::InLineComment => self.step_line_comment(),
            }
        }

        let unterminated = match self.state {
            ScanState::Normal | ScanState::InLineComment => None,
            ScanState::InSingleQuoteString { opened_at }
            | ScanState::InDoubleQuoteString { opened_at } => {
                Some((opened_at, Construct::ShortString))
            }
            ScanState::InLongBracketString { opened_at, .. } => {
                Some((opened_at, Construct::LongString))
            }
            ScanState::InBlockComment { opened_at, .. } => {
                Some((opened_at, Construct::BlockComment))
            }
        };

        match unterminated {
            Some((line, construct)) => Err(self.malformed(line, construct)),
            None => Ok(references),
        }
    }

    fn step_normal(&mut self) -> Result<Option<Reference>> {
        match self.src[self.pos] {
            b'-' if self.byte_at(self.pos + 1) == Some(b'-') => {
                if let Some(level) = self.opening_level(self.pos + 2) {
                    self.state = ScanState::InBlockComment {
                        level,
                        opened_at: self.line,
                    };
                    self.pos += 2 + level + 2;
                } else {
                    self.state = ScanState::InLineComment;
                    self.pos += 2;
                }
            }
            b'\'' => {
                self.state = ScanState::InSingleQuoteString {
                    opened_at: self.line,
                };
                self.pos += 1;
            }
            b'"' => {
                self.state = ScanState::InDoubleQuoteString {
                    opened_at: self.line,
                };
                self.pos += 1;
            }
            b'[' => match self.opening_level(self.pos) {
                Some(level) => {
                    self.state = ScanState::InLongBracketString {
                        level,
                        opened_at: self.line,
                    };
                    self.pos += level + 2;
                }
                None => self.pos += 1,
            },
            b'r' if self.at_keyword() => return self.read_reference().map(Some),
            _ => self.advance(),
        }
        Ok(None)
    }

    fn step_short_string(&mut self, quote: u8) {
        let byte = self.src[self.pos];
        if byte == b'\\' {
            // The escaped byte can never close the string.
            self.advance();
            if self.pos < self.src.len() {
                self.advance();
            }
        } else if byte == quote {
            self.state = ScanState::Normal;
            self.pos += 1;
        } else {
            self.advance();
        }
    }

    fn step_long_bracket(&mut self, level: usize) {
        if self.closing_level(self.pos) == Some(level) {
            self.state = ScanState::Normal;
            self.pos += level + 2;
        } else {
            self.advance();
        }
    }

    fn step_line_comment(&mut self) {
        // The newline itself is consumed in Normal so it is counted once.
        match memchr(b'\n', &self.src[self.pos..]) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.src.len(),
        }
        self.state = ScanState::Normal;
    }

    /// `require` at `pos` that is neither part of a longer identifier nor a
    /// member access (`obj.require`, `obj:require`).
    fn at_keyword(&self) -> bool {
        if !self.src[self.pos..].starts_with(REQUIRE_KEYWORD) {
            return false;
        }

        if let Some(prev) = self.pos.checked_sub(1).map(|i| self.src[i]) {
            if is_identifier_byte(prev) || prev == b'.' || prev == b':' {
                return false;
            }
        }

        match self.byte_at(self.pos + REQUIRE_KEYWORD.len()) {
            Some(next) => !is_identifier_byte(next),
            None => true,
        }
    }

    fn read_reference(&mut self) -> Result<Reference> {
        let start = self.pos;
        let start_line = self.line;

        self.pos += REQUIRE_KEYWORD.len();
        self.skip_whitespace();
        if self.byte_at(self.pos) == Some(b'(') {
            self.pos += 1;
            self.skip_whitespace();
        }

        let specifier = match self.byte_at(self.pos) {
            Some(quote @ (b'\'' | b'"')) => self.read_quoted(quote)?,
            Some(b'[') => match self.opening_level(self.pos) {
                Some(level) => self.read_long(level)?,
                None => {
                    return Err(self.dynamic(start, start_line, DynamicReason::NonLiteralArgument));
                }
            },
            _ => return Err(self.dynamic(start, start_line, DynamicReason::NonLiteralArgument)),
        };

        if self.followed_by_concatenation() {
            return Err(self.dynamic(start, start_line, DynamicReason::Concatenation));
        }

        Ok(Reference::new(specifier, start_line))
    }

    fn read_quoted(&mut self, quote: u8) -> Result<String> {
        let opened_at = self.line;
        self.pos += 1;
        let content_start = self.pos;

        while self.pos < self.src.len() {
            let byte = self.src[self.pos];
            if byte == b'\\' {
                self.advance();
                if self.pos < self.src.len() {
                    self.advance();
                }
            } else if byte == quote {
                let content = self.slice(content_start, self.pos);
                self.pos += 1;
                return Ok(content);
            } else {
                self.advance();
            }
        }

        Err(self.malformed(opened_at, Construct::ShortString))
    }

    fn read_long(&mut self, level: usize) -> Result<String> {
        let opened_at = self.line;
        self.pos += level + 2;
        let content_start = self.pos;

        while self.pos < self.src.len() {
            if self.closing_level(self.pos) == Some(level) {
                let content = self.slice(content_start, self.pos);
                self.pos += level + 2;
                return Ok(content);
            }
            self.advance();
        }

        Err(self.malformed(opened_at, Construct::LongString))
    }

    /// Lookahead only: position and line are left untouched.
    fn followed_by_concatenation(&self) -> bool {
        let rest = &self.src[self.pos..];
        let skip = rest
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(rest.len());
        rest[skip..].starts_with(b"..")
    }

    /// Level of a long-bracket opener `[=*[` at `at`, if there is one.
    fn opening_level(&self, at: usize) -> Option<usize> {
        self.bracket_level(at, b'[')
    }

    /// Level of a long-bracket closer `]=*]` at `at`, if there is one.
    fn closing_level(&self, at: usize) -> Option<usize> {
        self.bracket_level(at, b']')
    }

    fn bracket_level(&self, at: usize, bracket: u8) -> Option<usize> {
        if self.byte_at(at) != Some(bracket) {
            return None;
        }
        let level = self.src[at + 1..].iter().take_while(|&&b| b == b'=').count();
        (self.byte_at(at + 1 + level) == Some(bracket)).then_some(level)
    }

    fn skip_whitespace(&mut self) {
        while self.byte_at(self.pos).is_some_and(|b| b.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn advance(&mut self) {
        if self.src[self.pos] == b'\n' {
            self.line += 1;
        }
        self.pos += 1;
    }

    fn byte_at(&self, at: usize) -> Option<u8> {
        self.src.get(at).copied()
    }

    fn slice(&self, from: usize, to: usize) -> String {
        String::from_utf8_lossy(&self.src[from..to]).into_owned()
    }

    fn dynamic(&self, start: usize, line: usize, reason: DynamicReason) -> DiscoveryError {
        let from = self.pos.min(self.src.len());
        let end = memchr2(b'\n', b';', &self.src[from..])
            .map(|offset| from + offset)
            .unwrap_or(self.src.len());
        let snippet = String::from_utf8_lossy(&self.src[start..end])
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        DiscoveryError::UnresolvableReference {
            file: self.file.to_path_buf(),
            line,
            snippet,
            reason,
        }
    }

    fn malformed(&self, line: usize, construct: Construct) -> DiscoveryError {
        DiscoveryError::MalformedSource {
            file: self.file.to_path_buf(),
            line,
            construct,
        }
    }
}

/// Bytes that may continue an identifier. Non-ASCII bytes count, so a
/// `require` glued to a multi-byte name is not treated as the keyword.
fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte >= 0x80
}
