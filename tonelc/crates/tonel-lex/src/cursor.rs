//! Character cursor for traversing Smalltalk source text.
//!
//! Tracks byte position plus 1-based line/column, handling UTF-8 without
//! panicking on multi-byte characters. Used by both the Bracket Scanner and
//! the Smalltalk Lexer.

/// A cursor for traversing source text one character at a time.
///
/// # Examples
///
/// ```
/// use tonel_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("a b");
/// assert_eq!(cursor.current_char(), 'a');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), ' ');
/// ```
#[derive(Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self { source, position: 0, line: 1, column: 1 }
    }

    /// Creates a cursor positioned at a given byte offset, with the
    /// line/column that offset corresponds to. Used when the Smalltalk
    /// Lexer is handed a method body fragment that begins partway through
    /// a larger file.
    pub fn with_start(source: &'a str, start_line: u32, start_column: u32) -> Self {
        Self { source, position: 0, line: start_line, column: start_column }
    }

    /// The character at the cursor, or `'\0'` at end of input.
    #[inline]
    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    /// The character `offset` bytes ahead of the cursor.
    #[inline]
    pub fn char_at(&self, offset: usize) -> char {
        let pos = self.position + offset;
        if pos >= self.source.len() {
            return '\0';
        }
        let b = self.source.as_bytes()[pos];
        if b < 128 {
            return b as char;
        }
        self.source[pos..].chars().next().unwrap_or('\0')
    }

    /// The character `offset` *characters* ahead (not bytes). Used for
    /// short, rare lookaheads; prefer [`Self::char_at`] in hot paths.
    pub fn peek_char(&self, offset: usize) -> char {
        self.source[self.position..].chars().nth(offset).unwrap_or('\0')
    }

    /// Advances past the current character, updating line/column.
    #[inline]
    pub fn advance(&mut self) {
        if self.position >= self.source.len() {
            return;
        }
        let b = self.source.as_bytes()[self.position];
        if b < 128 {
            self.position += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            return;
        }
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Advances `count` characters.
    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    /// True once every character has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Consumes `expected` if it is the current character.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips ASCII/Unicode whitespace. Does not skip comments.
    pub fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    /// Current 1-based line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current 1-based column.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Current byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The substring from `start` (a prior `position()`) up to the current
    /// position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Everything from the cursor to the end of the source.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// The whole source buffer, regardless of cursor position.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Snapshots cursor state for later restoration, used by lookaheads
    /// that must not permanently consume input (e.g. the Smalltalk Lexer's
    /// temporaries-declaration lookahead).
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot { position: self.position, line: self.line, column: self.column }
    }

    /// Restores a previously taken snapshot.
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

/// Saved cursor state, restorable via [`Cursor::restore`].
#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    pub position: usize,
    pub line: u32,
    pub column: u32,
}
