//! tonel-par — Smalltalk Parser.
//!
//! Recursive-descent over `tonel-lex`'s token stream. The grammar is split
//! across two files: this module holds the statement/sequence layer
//! (`sequence`, `temporaries`, `statement`, `assignment`,
//! `cascade-or-send`) and the `Parser` struct itself; [`expr`] holds the
//! message-precedence ladder and the leaf productions (`operand`, `block`,
//! arrays, pragmas, numerals).
//!
//! Every production returns `TonelResult<T>` and propagates with `?`; the
//! error policy is simple: report the first error, attempt no recovery.

pub mod ast;
pub mod expr;

use tonel_lex::token::{Token, TokenKind};
use tonel_lex::Lexer;
use tonel_util::{Diagnostic, ErrorKind, SourceFile, Span, TonelError, TonelResult};

use ast::{Assignment, Expr, Pragma, Return, Sequence, TemporaryVariables};

/// The pseudo-variables that may appear as values but never as assignment
/// targets or temporary variable names.
pub const PSEUDO_VARIABLES: &[&str] = &["nil", "true", "false", "self", "super", "thisContext"];

pub fn is_pseudo_variable(name: &str) -> bool {
    PSEUDO_VARIABLES.contains(&name)
}

/// Recursive-descent parser over a pre-lexed token stream.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Lexes `source` in full, then builds a parser over the resulting
    /// tokens. `source` is a standalone Smalltalk expression sequence — a
    /// Tonel method body, or any snippet a caller wants validated alone.
    pub fn new(source: &'a str) -> TonelResult<Self> {
        let tokens = Lexer::tokenize(source)?;
        Ok(Self { source, tokens, position: 0 })
    }

    /// Like [`Self::new`], but the lexer starts at the given absolute
    /// line/column — used when parsing a method body embedded in a larger
    /// Tonel file, so lexical errors report file-absolute coordinates.
    pub fn with_start(source: &'a str, start_line: u32, start_column: u32) -> TonelResult<Self> {
        let tokens = Lexer::with_start(source, start_line, start_column).pipe_tokenize()?;
        Ok(Self { source, tokens, position: 0 })
    }

    /// Parses a full method body / block body: `sequence := temporaries?
    /// pragma* statement (PERIOD statement)* PERIOD?`. Leading pragmas need
    /// no `PERIOD` before the first statement — `<primitive: 60> ^ self
    /// primitiveFailed` is a pragma directly followed by a return, not two
    /// periods-separated statements.
    pub fn parse_sequence(&mut self) -> TonelResult<Sequence> {
        let start = self.current().start;
        let start_line = self.current().line;
        let start_column = self.current().column;

        let temps = self.parse_optional_temporaries()?;
        let pragmas = self.parse_optional_pragmas()?;
        let mut statements = Vec::new();
        if !self.at_eof() {
            statements.push(self.parse_statement()?);
            while self.check(TokenKind::Period) {
                self.advance();
                if self.at_eof() {
                    break;
                }
                statements.push(self.parse_statement()?);
            }
        }
        if !self.at_eof() {
            return Err(self.error_here(ErrorKind::UnexpectedToken, format!("unexpected trailing token {:?}", self.current().kind)));
        }

        let end = self.tokens[self.position.saturating_sub(1).min(self.tokens.len() - 1)].end;
        Ok(Sequence {
            temps,
            pragmas,
            statements,
            span: Span::new(start, end.max(start), start_line, start_column),
        })
    }

    /// `pragma*`, each a bare `<...>` with no separating `PERIOD` — pragmas
    /// only appear at the very start of a sequence, before any statement.
    fn parse_optional_pragmas(&mut self) -> TonelResult<Vec<Pragma>> {
        let mut pragmas = Vec::new();
        while self.check(TokenKind::Lt) {
            pragmas.push(expr::parse_pragma(self)?);
        }
        Ok(pragmas)
    }

    /// `temporaries := PIPE IDENTIFIER* PIPE`. Returns an empty list if the
    /// next token isn't a `Pipe` at all — temporaries are optional.
    fn parse_optional_temporaries(&mut self) -> TonelResult<Vec<String>> {
        if !self.check(TokenKind::Pipe) {
            return Ok(Vec::new());
        }
        let names = self.parse_temporaries_body()?;
        Ok(names)
    }

    /// Parses `PIPE IDENTIFIER* PIPE`, assuming the opening `Pipe` is
    /// current. Used both for sequence-level temporaries and block-level
    /// temporaries (see `expr::parse_block`).
    pub(crate) fn parse_temporaries_body(&mut self) -> TonelResult<Vec<String>> {
        self.expect(TokenKind::Pipe, ErrorKind::ExpectedPipe)?;
        let mut names = Vec::new();
        while self.check(TokenKind::Identifier) {
            let name = self.current().text.clone();
            if is_pseudo_variable(&name) {
                return Err(self.error_here(ErrorKind::ReservedIdentifier, format!("ReservedIdentifier: {name}")));
            }
            names.push(name);
            self.advance();
        }
        self.expect(TokenKind::Pipe, ErrorKind::ExpectedPipe)?;
        Ok(names)
    }

    /// Parses a bare `| a b c |` declaration as its own top-level
    /// statement-shaped `TemporaryVariables(names)` node. Not reached by
    /// `parse_sequence`/`expr::parse_block`, which
    /// fold the same syntax directly into their own `temps: Vec<String>`
    /// field instead of wrapping it in this node.
    pub fn parse_standalone_temporaries(&mut self) -> TonelResult<TemporaryVariables> {
        let start_tok = self.current().clone();
        let names = self.parse_temporaries_body()?;
        let end = self.tokens[self.position - 1].end;
        Ok(TemporaryVariables {
            names,
            span: Span::new(start_tok.start, end, start_tok.line, start_tok.column),
        })
    }

    /// `statement := return | expression`.
    pub(crate) fn parse_statement(&mut self) -> TonelResult<Expr> {
        if self.check(TokenKind::Return) {
            let start = self.current().clone();
            self.advance();
            let value = self.parse_expression()?;
            let span = Span::new(start.start, value.span().end, start.line, start.column);
            return Ok(Expr::Return(Return { value: Box::new(value), span }));
        }
        self.parse_expression()
    }

    /// `expression := assignment | cascade-or-send`.
    ///
    /// Assignment is distinguished from a cascade-or-send by one token of
    /// lookahead: `IDENTIFIER ASSIGN` can only begin an assignment, since no
    /// other production starts with a bare identifier immediately followed
    /// by `:=`.
    pub fn parse_expression(&mut self) -> TonelResult<Expr> {
        if self.check(TokenKind::Identifier) && self.check_at(1, TokenKind::Assign) {
            return self.parse_assignment();
        }
        self.parse_cascade_or_send()
    }

    fn parse_assignment(&mut self) -> TonelResult<Expr> {
        let target_tok = self.current().clone();
        let target = target_tok.text.clone();
        if is_pseudo_variable(&target) {
            return Err(self.error_here(ErrorKind::ReservedIdentifier, format!("ReservedIdentifier: {target}")));
        }
        self.advance(); // identifier
        self.advance(); // :=
        let value = self.parse_expression()?;
        let span = Span::new(target_tok.start, value.span().end, target_tok.line, target_tok.column);
        Ok(Expr::Assignment(Assignment { target, value: Box::new(value), span }))
    }

    /// `cascade-or-send := keyword-send (SEMICOLON message)*`.
    fn parse_cascade_or_send(&mut self) -> TonelResult<Expr> {
        let first = expr::parse_keyword_send(self)?;
        if !self.check(TokenKind::Semicolon) {
            return Ok(first);
        }

        let (receiver, first_message) = match first {
            Expr::MessageSend(m) => (m.receiver, ast::CascadeMessage { selector: m.selector, arguments: m.arguments, span: m.span }),
            other => {
                // A unary send with no message (a bare operand) can still
                // be cascaded: `x foo; bar` cascades on `x foo`'s receiver
                // `x`, treating `foo` as the first message. A bare operand
                // with no message at all cannot be cascaded meaningfully,
                // but the grammar only reaches here once a `;` has already
                // been seen, which implies at least one message existed.
                return Err(self.error_here(ErrorKind::UnexpectedToken, format!("cannot cascade onto {other:?}")));
            },
        };

        let mut messages = vec![first_message];
        let mut end = self.tokens[self.position.saturating_sub(1)].end;
        while self.check(TokenKind::Semicolon) {
            self.advance();
            let message = self.parse_cascade_message()?;
            end = message.span.end;
            messages.push(message);
        }

        let start = receiver.span().start;
        let line = receiver.span().line;
        let column = receiver.span().column;
        Ok(Expr::Cascade(ast::Cascade { receiver, messages, span: Span::new(start, end, line, column) }))
    }

    /// A single cascaded message: unary, binary, or keyword, but never
    /// itself a further cascade — the production following each `;`.
    fn parse_cascade_message(&mut self) -> TonelResult<ast::CascadeMessage> {
        let start = self.current().clone();
        if self.check(TokenKind::Keyword) {
            let mut selector = String::new();
            let mut arguments = Vec::new();
            while self.check(TokenKind::Keyword) {
                selector.push_str(&self.current().text);
                self.advance();
                arguments.push(expr::parse_binary_send(self)?);
            }
            let end = arguments.last().map(|a| a.span().end).unwrap_or(start.end);
            return Ok(ast::CascadeMessage { selector, arguments, span: Span::new(start.start, end, start.line, start.column) });
        }
        if self.check(TokenKind::Identifier) {
            let selector = self.current().text.clone();
            let span = Span::new(start.start, start.end, start.line, start.column);
            self.advance();
            return Ok(ast::CascadeMessage { selector, arguments: Vec::new(), span });
        }
        if self.is_binary_selector_token() {
            let selector = self.current().text.clone();
            self.advance();
            let arg = expr::parse_unary_send(self)?;
            let span = Span::new(start.start, arg.span().end, start.line, start.column);
            return Ok(ast::CascadeMessage { selector, arguments: vec![arg], span });
        }
        Err(self.error_here(ErrorKind::UnexpectedToken, "expected a cascaded message"))
    }

    // ---- shared token-stream primitives, used by both this file and expr.rs ----

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.position + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub(crate) fn check_at(&self, offset: usize, kind: TokenKind) -> bool {
        self.peek_at(offset).kind == kind
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        tok
    }

    pub(crate) fn is_binary_selector_token(&self) -> bool {
        matches!(self.current().kind, TokenKind::BinarySelector | TokenKind::Lt | TokenKind::Gt)
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, err: ErrorKind) -> TonelResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(err, format!("expected {kind:?}, found {:?}", self.current().kind)))
        }
    }

    pub(crate) fn error_here(&self, kind: ErrorKind, reason: impl Into<String>) -> TonelError {
        let tok = self.current();
        let reason = reason.into();
        let snippet = SourceFile::new(self.source).snippet_at(tok.start);
        Diagnostic::new(kind, reason, tok.line, snippet)
            .with_span(Span::new(tok.start, tok.end, tok.line, tok.column))
            .into()
    }

}

trait LexerPipeTokenize {
    fn pipe_tokenize(self) -> TonelResult<Vec<Token>>;
}

impl<'a> LexerPipeTokenize for Lexer<'a> {
    fn pipe_tokenize(mut self) -> TonelResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Sequence {
        Parser::new(source).unwrap().parse_sequence().unwrap()
    }

    #[test]
    fn parses_simple_return() {
        let seq = parse("^ 1");
        assert_eq!(seq.statements.len(), 1);
        assert!(matches!(seq.statements[0], Expr::Return(_)));
    }

    #[test]
    fn parses_assignment() {
        let seq = parse("x := 1 + 2");
        match &seq.statements[0] {
            Expr::Assignment(a) => assert_eq!(a.target, "x"),
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn reserved_identifier_as_assignment_target_fails() {
        let err = Parser::new("self := 1").unwrap().parse_sequence().unwrap_err();
        assert!(err.to_string().contains("ReservedIdentifier"));
    }

    #[test]
    fn reserved_identifier_as_temp_fails() {
        let err = Parser::new("| self | self").unwrap().parse_sequence().unwrap_err();
        assert!(err.to_string().contains("ReservedIdentifier"));
    }

    #[test]
    fn parses_cascade() {
        let seq = parse("OrderedCollection new add: 1; add: 2; yourself");
        match &seq.statements[0] {
            Expr::Cascade(c) => assert_eq!(c.messages.len(), 3),
            other => panic!("expected cascade, got {other:?}"),
        }
    }

    #[test]
    fn scenario_three_from_spec() {
        let seq = parse("| r | r := (a | b). ^ r");
        assert_eq!(seq.temps, vec!["r".to_string()]);
        assert_eq!(seq.statements.len(), 2);
    }
}
