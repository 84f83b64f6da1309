//! Core lexer implementation: the `Lexer` struct, its dispatch table, and
//! the array/paren-frame bookkeeping `COMMA` classification needs.

use tonel_util::{Diagnostic, ErrorKind, SourceFile, Span, TonelError, TonelResult};

use super::pipe::PipeStack;
use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Tokenizes a Smalltalk method body (or any standalone Smalltalk
/// expression sequence) into a lazy stream of [`Token`]s.
///
/// A `Lexer` is handed text that has already had its enclosing `[`/`]`
/// stripped by the Bracket Scanner — the outermost method body has no
/// wrapping bracket tokens of its own, which is why [`PipeStack::new`]
/// pre-pushes one level representing it.
pub struct Lexer<'a> {
    pub(super) cursor: Cursor<'a>,
    pub(super) pipe_stack: PipeStack,
    /// One entry per currently-open `(` or `#(`; `true` if that nesting
    /// level is inside literal-array context. Per the Design Notes' open
    /// question, a bare `(` nested anywhere inside `#(...)` is itself a
    /// nested literal array at any depth, so opening a plain `(` while
    /// already inside array context propagates that context inward.
    pub(super) array_frames: Vec<bool>,
    /// One entry per currently-open `[` or `#[`; `true` for `#[` (a byte
    /// array literal, which has no pipe-stack level of its own). Lets the
    /// matching `]` know whether to pop a pipe-stack level.
    bracket_frames: Vec<bool>,
    pub(super) prev_token_kind: Option<TokenKind>,
    pub(super) token_start: usize,
    pub(super) token_start_line: u32,
    pub(super) token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`, which must already be LF-normalized
    /// (normalization happens once, at file-ingestion time, not per
    /// method body).
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            pipe_stack: PipeStack::new(),
            array_frames: Vec::new(),
            bracket_frames: Vec::new(),
            prev_token_kind: None,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Like [`Self::new`], but the cursor starts at the given absolute
    /// line/column. Used when lexing a method body fragment that begins
    /// partway through a larger Tonel file.
    pub fn with_start(source: &'a str, start_line: u32, start_column: u32) -> Self {
        Self {
            cursor: Cursor::with_start(source, start_line, start_column),
            pipe_stack: PipeStack::new(),
            array_frames: Vec::new(),
            bracket_frames: Vec::new(),
            prev_token_kind: None,
            token_start: 0,
            token_start_line: start_line,
            token_start_column: start_column,
        }
    }

    /// Tokenizes the entire input, stopping at the first lexical error.
    /// The returned vector always ends with an `Eof` token on success.
    pub fn tokenize(source: &'a str) -> TonelResult<Vec<Token>> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Returns the next token, or an `Eof` token at end of input.
    pub fn next_token(&mut self) -> TonelResult<Token> {
        self.skip_whitespace_and_comments()?;

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        let token = if self.cursor.is_at_end() {
            self.make_token(TokenKind::Eof, "", self.token_start)
        } else {
            self.dispatch()?
        };

        match token.kind {
            TokenKind::ColonParam => self.pipe_stack.note_colon_param(),
            // `[` already marked its enclosing level executable in `dispatch`,
            // before pushing the block's own level; applying it again here
            // would wrongly mark the newly-pushed level instead.
            TokenKind::Pipe | TokenKind::Eof | TokenKind::LBracket => {},
            _ => self.pipe_stack.note_executable(),
        }
        self.prev_token_kind = Some(token.kind);
        Ok(token)
    }

    fn dispatch(&mut self) -> TonelResult<Token> {
        let c = self.cursor.current_char();
        match c {
            '\'' => self.lex_string(),
            '$' => self.lex_char(),
            '#' => self.lex_hash(),
            ':' => self.lex_colon(),
            '.' => {
                self.cursor.advance();
                Ok(self.make_token(TokenKind::Period, ".", self.token_start))
            },
            ';' => {
                self.cursor.advance();
                Ok(self.make_token(TokenKind::Semicolon, ";", self.token_start))
            },
            ',' if self.in_array() => {
                self.cursor.advance();
                Ok(self.make_token(TokenKind::Comma, ",", self.token_start))
            },
            '(' => {
                self.push_array_frame(self.in_array());
                self.cursor.advance();
                Ok(self.make_token(TokenKind::LParen, "(", self.token_start))
            },
            ')' => {
                self.pop_array_frame();
                self.cursor.advance();
                Ok(self.make_token(TokenKind::RParen, ")", self.token_start))
            },
            '[' => {
                // A block literal is itself executable at the *enclosing*
                // level, so mark that level before pushing the block's own
                // (still-empty) level — otherwise the new level starts out
                // already `executable_seen`, and a leading `[ | t | ... ]`
                // temporaries declaration is misclassified as BinarySelector.
                self.pipe_stack.note_executable();
                self.pipe_stack.push_level();
                self.bracket_frames.push(false);
                self.cursor.advance();
                Ok(self.make_token(TokenKind::LBracket, "[", self.token_start))
            },
            ']' => {
                // Only a `[` (not `#[`) pushed a pipe-stack level to undo.
                let is_byte_array = self.bracket_frames.pop().unwrap_or(false);
                if !is_byte_array {
                    self.pipe_stack.pop_level();
                }
                self.cursor.advance();
                Ok(self.make_token(TokenKind::RBracket, "]", self.token_start))
            },
            '{' => {
                self.cursor.advance();
                Ok(self.make_token(TokenKind::LBrace, "{", self.token_start))
            },
            '}' => {
                self.cursor.advance();
                Ok(self.make_token(TokenKind::RBrace, "}", self.token_start))
            },
            '^' => {
                self.cursor.advance();
                Ok(self.make_token(TokenKind::Return, "^", self.token_start))
            },
            '|' => self.lex_pipe(),
            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            '+' | '-' if self.expects_operand() && self.cursor.peek_char(1).is_ascii_digit() => {
                self.cursor.advance();
                self.lex_number()
            },
            c if is_binary_char(c) => self.lex_binary_selector(),
            other => Err(self.error(ErrorKind::InvalidCharacter, format!("unexpected character '{other}'"))),
        }
    }

    fn lex_pipe(&mut self) -> TonelResult<Token> {
        self.cursor.advance();
        let after_pipe = self.cursor.clone();
        let kind = self.pipe_stack.classify_pipe(|| temps_open_lookahead(&after_pipe));
        let text = self.cursor.slice_from(self.token_start).to_string();
        Ok(self.make_token(kind, text, self.token_start))
    }

    /// True if the current lexer position is one where a Smalltalk
    /// literal's leading `+`/`-` sign is unambiguous: either the start of
    /// input, or the previous token cannot itself have produced a value
    /// to apply a binary operator to.
    pub(super) fn expects_operand(&self) -> bool {
        match self.prev_token_kind {
            None => true,
            Some(k) => matches!(
                k,
                TokenKind::Assign
                    | TokenKind::Return
                    | TokenKind::Period
                    | TokenKind::Semicolon
                    | TokenKind::Comma
                    | TokenKind::Pipe
                    | TokenKind::LParen
                    | TokenKind::LBracket
                    | TokenKind::LBrace
                    | TokenKind::HashLParen
                    | TokenKind::HashLBracket
                    | TokenKind::Keyword
                    | TokenKind::BinarySelector
                    | TokenKind::ColonParam
                    | TokenKind::Lt
                    | TokenKind::Gt
            ),
        }
    }

    pub(super) fn in_array(&self) -> bool {
        self.array_frames.last().copied().unwrap_or(false)
    }

    pub(super) fn push_array_frame(&mut self, is_array: bool) {
        self.array_frames.push(is_array);
    }

    pub(super) fn pop_array_frame(&mut self) {
        self.array_frames.pop();
    }

    /// Records a `#[` byte-array opening, so its matching `]` knows not to
    /// pop a pipe-stack level.
    pub(super) fn push_byte_array_bracket_frame(&mut self) {
        self.bracket_frames.push(true);
    }

    pub(super) fn make_token(&self, kind: TokenKind, text: impl Into<String>, start: usize) -> Token {
        Token::new(kind, text, self.token_start_line, self.token_start_column, start, self.cursor.position())
    }

    /// Builds a structured error located at the token currently being
    /// lexed.
    pub(super) fn error(&self, kind: ErrorKind, reason: impl Into<String>) -> TonelError {
        self.error_at(kind, reason, self.token_start, self.token_start_line, self.token_start_column)
    }

    pub(super) fn error_at(&self, kind: ErrorKind, reason: impl Into<String>, offset: usize, line: u32, column: u32) -> TonelError {
        let reason = reason.into();
        let snippet = SourceFile::new(self.cursor.source()).snippet_at(offset);
        Diagnostic::new(kind, reason, line, snippet).with_span(Span::point(offset, line, column)).into()
    }
}

/// Non-consuming scan for the "opening half" of the temporaries-vs-binary-
/// selector rule: skipping whitespace and comments, is the upcoming input
/// zero or more identifiers followed by a closing `|`?
fn temps_open_lookahead(cursor: &Cursor<'_>) -> bool {
    let mut probe = cursor.clone();
    loop {
        skip_trivia_no_errors(&mut probe);
        if probe.current_char() == '|' {
            return true;
        }
        if is_ident_start(probe.current_char()) {
            while is_ident_continue(probe.current_char()) {
                probe.advance();
            }
        } else {
            return false;
        }
    }
}

fn skip_trivia_no_errors(cursor: &mut Cursor<'_>) {
    loop {
        cursor.skip_whitespace();
        if cursor.current_char() != '"' {
            return;
        }
        cursor.advance();
        loop {
            if cursor.is_at_end() {
                return;
            }
            if cursor.current_char() == '"' {
                if cursor.char_at(1) == '"' {
                    cursor.advance();
                    cursor.advance();
                } else {
                    cursor.advance();
                    break;
                }
            } else {
                cursor.advance();
            }
        }
    }
}

pub(super) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

pub(super) fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub(super) fn is_symbol_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
}

/// The characters from which binary selectors are built, `|` included —
/// though `|` is always dispatched through
/// [`Lexer::lex_pipe`] first and never folded into a multi-character run,
/// so the pipe-disambiguation rules never have to reason about a binary
/// selector that merely starts with `|`.
pub(super) fn is_binary_char(c: char) -> bool {
    matches!(c, '\\' | '+' | '*' | '/' | '=' | '>' | '<' | ',' | '@' | '%' | '~' | '&' | '-' | '?' | '|')
}
