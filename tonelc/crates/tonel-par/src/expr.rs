//! Message precedence ladder and leaf productions: unary
//! binds tightest, then binary, then keyword (one keyword-send per
//! expression-nesting level, right-associative only in the sense that a
//! keyword message's own arguments may themselves contain further
//! keyword-sends nested inside parentheses/blocks — the grammar forbids two
//! keyword parts chained without an intervening level).

use tonel_lex::token::TokenKind;
use tonel_util::{ErrorKind, Span, TonelResult};

use crate::ast::{
    Block, ByteArray, DynamicArray, Expr, Literal, LiteralArray, LiteralArrayItem, LiteralKind, Pragma, Sequence, Variable,
};
use crate::{is_pseudo_variable, Parser};

/// `keyword-send := binary-send (KEYWORD binary-send)+` otherwise plain
/// `binary-send`.
pub(crate) fn parse_keyword_send(p: &mut Parser<'_>) -> TonelResult<Expr> {
    let receiver = parse_binary_send(p)?;
    if !p.check(TokenKind::Keyword) {
        return Ok(receiver);
    }

    let mut selector = String::new();
    let mut arguments = Vec::new();
    while p.check(TokenKind::Keyword) {
        selector.push_str(&p.current().text);
        p.advance();
        arguments.push(parse_binary_send(p)?);
    }

    let start = receiver.span();
    let end = arguments.last().map(|a| a.span()).unwrap_or(start);
    Ok(Expr::MessageSend(crate::ast::MessageSend {
        receiver: Box::new(receiver),
        selector,
        arguments,
        span: Span::new(start.start, end.end, start.line, start.column),
    }))
}

/// `binary-send := unary-send (BINARY_SELECTOR unary-send)*`, left-assoc.
pub(crate) fn parse_binary_send(p: &mut Parser<'_>) -> TonelResult<Expr> {
    let mut left = parse_unary_send(p)?;
    while p.is_binary_selector_token() {
        let tok = p.advance();
        let right = parse_unary_send(p)?;
        let start = left.span();
        let end = right.span();
        left = Expr::MessageSend(crate::ast::MessageSend {
            receiver: Box::new(left),
            selector: tok.text,
            arguments: vec![right],
            span: Span::new(start.start, end.end, start.line, start.column),
        });
    }
    Ok(left)
}

/// `unary-send := operand IDENTIFIER*`, left-assoc.
pub(crate) fn parse_unary_send(p: &mut Parser<'_>) -> TonelResult<Expr> {
    let mut receiver = parse_operand(p)?;
    while p.check(TokenKind::Identifier) {
        let tok = p.advance();
        let start = receiver.span();
        receiver = Expr::MessageSend(crate::ast::MessageSend {
            receiver: Box::new(receiver),
            selector: tok.text,
            arguments: Vec::new(),
            span: Span::new(start.start, tok.end, start.line, start.column),
        });
    }
    Ok(receiver)
}

/// `operand := literal | reference | LPAREN expression RPAREN | block |
/// dynamic-array | pragma`, extended with the literal-array and byte-array
/// leaves the grammar lists alongside it.
fn parse_operand(p: &mut Parser<'_>) -> TonelResult<Expr> {
    let tok = p.current().clone();
    match tok.kind {
        TokenKind::Identifier => {
            p.advance();
            Ok(Expr::Variable(Variable { span: span_of(&tok), name: tok.text }))
        },
        TokenKind::String => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::String, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::Symbol => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::Symbol, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::Char => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::Char, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::Integer => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::Integer, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::RadixInteger => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::RadixInteger, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::Float => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::Float, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::ScaledDecimal => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::ScaledDecimal, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::LParen => parse_parenthesized(p),
        TokenKind::LBracket => parse_block(p),
        TokenKind::LBrace => parse_dynamic_array(p),
        TokenKind::HashLParen => parse_literal_array(p).map(Expr::LiteralArray),
        TokenKind::HashLBracket => parse_byte_array(p).map(Expr::ByteArray),
        TokenKind::Lt => parse_pragma(p).map(Expr::Pragma),
        _ => Err(p.error_here(ErrorKind::ExpectedExpression, format!("expected an expression, found {:?}", tok.kind))),
    }
}

fn span_of(tok: &tonel_lex::token::Token) -> Span {
    Span::new(tok.start, tok.end, tok.line, tok.column)
}

fn parse_parenthesized(p: &mut Parser<'_>) -> TonelResult<Expr> {
    p.expect(TokenKind::LParen, ErrorKind::UnexpectedToken)?;
    let inner = p.parse_expression()?;
    p.expect(TokenKind::RParen, ErrorKind::UnexpectedToken)?;
    Ok(inner)
}

/// `block := LBRACKET block-params? temporaries? sequence? RBRACKET`;
/// `block-params := COLON_PARAM+ PIPE`.
fn parse_block(p: &mut Parser<'_>) -> TonelResult<Expr> {
    let open = p.expect(TokenKind::LBracket, ErrorKind::UnexpectedToken)?;

    let mut params = Vec::new();
    if p.check(TokenKind::ColonParam) {
        while p.check(TokenKind::ColonParam) {
            let tok = p.advance();
            let name = tok.text.trim_start_matches(':').to_string();
            if is_pseudo_variable(&name) {
                return Err(p.error_here(ErrorKind::ReservedIdentifier, format!("ReservedIdentifier: {name}")));
            }
            params.push(name);
        }
        p.expect(TokenKind::Pipe, ErrorKind::ExpectedPipe)?;
    }

    let temps = if p.check(TokenKind::Pipe) { p.parse_temporaries_body()? } else { Vec::new() };

    for name in &temps {
        if params.contains(name) {
            return Err(p.error_here(ErrorKind::DuplicateTemporary, format!("DuplicateTemporary: {name}")));
        }
    }

    let seq_start = p.current().start;
    let seq_line = p.current().line;
    let seq_column = p.current().column;
    let mut statements = Vec::new();
    if !p.check(TokenKind::RBracket) {
        statements.push(p.parse_statement()?);
        while p.check(TokenKind::Period) {
            p.advance();
            if p.check(TokenKind::RBracket) {
                break;
            }
            statements.push(p.parse_statement()?);
        }
    }
    let seq_end = statements.last().map(|s: &Expr| s.span().end).unwrap_or(seq_start);
    let body = Sequence { temps, pragmas: Vec::new(), statements, span: Span::new(seq_start, seq_end.max(seq_start), seq_line, seq_column) };

    let close = p.expect(TokenKind::RBracket, ErrorKind::ExpectedRBracket)?;
    Ok(Expr::Block(Block { params, temps: body.temps.clone(), body, span: Span::new(open.start, close.end, open.line, open.column) }))
}

/// `dynamic-array := LBRACE (expression (PERIOD expression)*)? RBRACE`.
fn parse_dynamic_array(p: &mut Parser<'_>) -> TonelResult<Expr> {
    let open = p.expect(TokenKind::LBrace, ErrorKind::UnexpectedToken)?;
    let mut elements = Vec::new();
    if !p.check(TokenKind::RBrace) {
        elements.push(p.parse_expression()?);
        while p.check(TokenKind::Period) {
            p.advance();
            if p.check(TokenKind::RBrace) {
                break;
            }
            elements.push(p.parse_expression()?);
        }
    }
    let close = p.expect(TokenKind::RBrace, ErrorKind::UnexpectedToken)?;
    Ok(Expr::DynamicArray(DynamicArray { elements, span: Span::new(open.start, close.end, open.line, open.column) }))
}

/// `literal-array := HASH_LPAREN literal-array-item* RPAREN`.
fn parse_literal_array(p: &mut Parser<'_>) -> TonelResult<LiteralArray> {
    let open = p.expect(TokenKind::HashLParen, ErrorKind::UnexpectedToken)?;
    let items = parse_literal_array_items(p)?;
    let close = p.expect(TokenKind::RParen, ErrorKind::UnexpectedToken)?;
    Ok(LiteralArray { items, span: Span::new(open.start, close.end, open.line, open.column) })
}

fn parse_literal_array_items(p: &mut Parser<'_>) -> TonelResult<Vec<LiteralArrayItem>> {
    let mut items = Vec::new();
    while !p.check(TokenKind::RParen) {
        items.push(parse_literal_array_item(p)?);
    }
    Ok(items)
}

/// Each item is a parse-time literal, a nested literal array (either
/// `#(...)` or a bare `(...)` — per the Design Notes' open-question
/// decision, a bare group is treated as a nested literal array regardless
/// of depth), or an identifier/binary-selector/`;`/`,` interned as a
/// symbol.
fn parse_literal_array_item(p: &mut Parser<'_>) -> TonelResult<LiteralArrayItem> {
    let tok = p.current().clone();
    match tok.kind {
        TokenKind::String => {
            p.advance();
            Ok(LiteralArrayItem::Literal(Literal { kind: LiteralKind::String, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::Symbol => {
            p.advance();
            Ok(LiteralArrayItem::Literal(Literal { kind: LiteralKind::Symbol, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::Char => {
            p.advance();
            Ok(LiteralArrayItem::Literal(Literal { kind: LiteralKind::Char, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::Integer => {
            p.advance();
            Ok(LiteralArrayItem::Literal(Literal { kind: LiteralKind::Integer, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::RadixInteger => {
            p.advance();
            Ok(LiteralArrayItem::Literal(Literal { kind: LiteralKind::RadixInteger, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::Float => {
            p.advance();
            Ok(LiteralArrayItem::Literal(Literal { kind: LiteralKind::Float, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::ScaledDecimal => {
            p.advance();
            Ok(LiteralArrayItem::Literal(Literal { kind: LiteralKind::ScaledDecimal, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::HashLParen => {
            p.advance();
            let items = parse_literal_array_items(p)?;
            p.expect(TokenKind::RParen, ErrorKind::UnexpectedToken)?;
            Ok(LiteralArrayItem::Nested(items))
        },
        TokenKind::LParen => {
            p.advance();
            let items = parse_literal_array_items(p)?;
            p.expect(TokenKind::RParen, ErrorKind::UnexpectedToken)?;
            Ok(LiteralArrayItem::Nested(items))
        },
        TokenKind::Identifier | TokenKind::Keyword => {
            p.advance();
            Ok(LiteralArrayItem::Symbol(tok.text))
        },
        TokenKind::BinarySelector | TokenKind::Lt | TokenKind::Gt => {
            p.advance();
            Ok(LiteralArrayItem::Symbol(tok.text))
        },
        TokenKind::Semicolon => {
            p.advance();
            Ok(LiteralArrayItem::Symbol(";".to_string()))
        },
        TokenKind::Comma => {
            p.advance();
            Ok(LiteralArrayItem::Symbol(",".to_string()))
        },
        other => Err(p.error_here(ErrorKind::UnexpectedToken, format!("invalid literal array element {other:?}"))),
    }
}

/// `byte-array := HASH_LBRACKET INTEGER* RBRACKET`.
fn parse_byte_array(p: &mut Parser<'_>) -> TonelResult<ByteArray> {
    let open = p.expect(TokenKind::HashLBracket, ErrorKind::UnexpectedToken)?;
    let mut bytes = Vec::new();
    while p.check(TokenKind::Integer) {
        let tok = p.advance();
        let value: i64 = tok.text.parse().map_err(|_| p.error_here(ErrorKind::InvalidNumber, format!("invalid byte literal '{}'", tok.text)))?;
        if !(0..=255).contains(&value) {
            return Err(p.error_here(ErrorKind::ByteOutOfRange, format!("ByteOutOfRange: {value}")));
        }
        bytes.push(value as u8);
    }
    let close = p.expect(TokenKind::RBracket, ErrorKind::UnexpectedToken)?;
    Ok(ByteArray { bytes, span: Span::new(open.start, close.end, open.line, open.column) })
}

/// `pragma := LT (KEYWORD operand)+ GT | LT IDENTIFIER GT`; a
/// `primitive-call` (`<primitive: 60>`) is simply the single-keyword case
/// whose operand happens to be an integer literal, so it needs no separate
/// production.
pub(crate) fn parse_pragma(p: &mut Parser<'_>) -> TonelResult<Pragma> {
    let open = p.expect(TokenKind::Lt, ErrorKind::UnexpectedToken)?;

    if p.check(TokenKind::Identifier) {
        let tok = p.advance();
        let close = p.expect(TokenKind::Gt, ErrorKind::UnexpectedToken)?;
        return Ok(Pragma { selector: tok.text, arguments: Vec::new(), span: Span::new(open.start, close.end, open.line, open.column) });
    }

    let mut selector = String::new();
    let mut arguments = Vec::new();
    while p.check(TokenKind::Keyword) {
        selector.push_str(&p.current().text);
        p.advance();
        arguments.push(parse_pragma_argument(p)?);
    }
    if selector.is_empty() {
        return Err(p.error_here(ErrorKind::UnexpectedToken, "expected a pragma keyword or identifier"));
    }
    let close = p.expect(TokenKind::Gt, ErrorKind::UnexpectedToken)?;
    Ok(Pragma { selector, arguments, span: Span::new(open.start, close.end, open.line, open.column) })
}

/// Pragma arguments are restricted to literals, identifiers, binary
/// selectors (as symbols), strings, and integers — never a full
/// expression.
fn parse_pragma_argument(p: &mut Parser<'_>) -> TonelResult<Expr> {
    let tok = p.current().clone();
    match tok.kind {
        TokenKind::Identifier => {
            p.advance();
            Ok(Expr::Variable(Variable { span: span_of(&tok), name: tok.text }))
        },
        TokenKind::String => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::String, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::Integer => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::Integer, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::RadixInteger => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::RadixInteger, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::Symbol => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::Symbol, span: span_of(&tok), value: tok.text }))
        },
        TokenKind::BinarySelector | TokenKind::Lt | TokenKind::Gt => {
            p.advance();
            Ok(Expr::Literal(Literal { kind: LiteralKind::Symbol, span: span_of(&tok), value: tok.text }))
        },
        other => Err(p.error_here(ErrorKind::UnexpectedToken, format!("invalid pragma argument {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    fn parse_one(source: &str) -> Expr {
        let mut p = Parser::new(source).unwrap();
        let seq = p.parse_sequence().unwrap();
        seq.statements.into_iter().next().unwrap()
    }

    #[test]
    fn precedence_p7() {
        // a b + c d: e f: g  ==  ((a b) + (c d)) d:f: (e f) (g)
        let expr = parse_one("a b + c d: e f: g");
        match expr {
            Expr::MessageSend(outer) => {
                assert_eq!(outer.selector, "d:f:");
                assert_eq!(outer.arguments.len(), 2);
                match *outer.receiver {
                    Expr::MessageSend(binary) => {
                        assert_eq!(binary.selector, "+");
                        match *binary.receiver {
                            Expr::MessageSend(unary) => assert_eq!(unary.selector, "b"),
                            other => panic!("expected unary send, got {other:?}"),
                        }
                    },
                    other => panic!("expected binary send, got {other:?}"),
                }
            },
            other => panic!("expected keyword send, got {other:?}"),
        }
    }

    #[test]
    fn literal_array_with_semicolons_and_nested_group() {
        let expr = parse_one("#(uint64 internal; uint64 internalHigh;)");
        match expr {
            Expr::LiteralArray(arr) => {
                assert_eq!(arr.items.len(), 6);
                assert_eq!(arr.items[2], LiteralArrayItem::Symbol(";".to_string()));
                assert_eq!(arr.items[5], LiteralArrayItem::Symbol(";".to_string()));
            },
            other => panic!("expected literal array, got {other:?}"),
        }
    }

    #[test]
    fn nested_bare_parens_become_nested_array() {
        let expr = parse_one("#(a (b c) d)");
        match expr {
            Expr::LiteralArray(arr) => {
                assert_eq!(arr.items.len(), 3);
                match &arr.items[1] {
                    LiteralArrayItem::Nested(inner) => assert_eq!(inner.len(), 2),
                    other => panic!("expected nested array item, got {other:?}"),
                }
            },
            other => panic!("expected literal array, got {other:?}"),
        }
    }

    #[test]
    fn byte_array_range_p5() {
        let mut p = Parser::new("#[1 2 256]").unwrap();
        let err = p.parse_sequence().unwrap_err();
        assert!(err.to_string().contains("ByteOutOfRange"));
    }

    #[test]
    fn byte_array_in_range() {
        let expr = parse_one("#[1 2 255]");
        match expr {
            Expr::ByteArray(b) => assert_eq!(b.bytes, vec![1, 2, 255]),
            other => panic!("expected byte array, got {other:?}"),
        }
    }

    #[test]
    fn primitive_call_pragma() {
        // A bare leading pragma is its own declaration, not a statement.
        let mut p = Parser::new("<primitive: 60>").unwrap();
        let seq = p.parse_sequence().unwrap();
        assert!(seq.statements.is_empty());
        assert_eq!(seq.pragmas.len(), 1);
        assert_eq!(seq.pragmas[0].selector, "primitive:");
        assert_eq!(seq.pragmas[0].arguments.len(), 1);
    }

    #[test]
    fn pragma_then_statement_needs_no_period() {
        let mut p = Parser::new("<primitive: 60> ^ self primitiveFailed").unwrap();
        let seq = p.parse_sequence().unwrap();
        assert_eq!(seq.pragmas.len(), 1);
        assert_eq!(seq.pragmas[0].selector, "primitive:");
        assert_eq!(seq.statements.len(), 1);
        assert!(matches!(seq.statements[0], Expr::Return(_)));
    }

    #[test]
    fn multiple_leading_pragmas() {
        let mut p = Parser::new("<primitive: 60> <category: 'accessing'> ^ self").unwrap();
        let seq = p.parse_sequence().unwrap();
        assert_eq!(seq.pragmas.len(), 2);
        assert_eq!(seq.pragmas[1].selector, "category:");
        assert_eq!(seq.statements.len(), 1);
    }

    #[test]
    fn block_with_params_and_temps() {
        let expr = parse_one("[ :a :b | | t | t := a + b. t ]");
        match expr {
            Expr::Block(b) => {
                assert_eq!(b.params, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(b.temps, vec!["t".to_string()]);
                assert_eq!(b.body.statements.len(), 2);
            },
            other => panic!("expected block, got {other:?}"),
        }
    }

    #[test]
    fn cascade_onto_block_receiver_from_spec_scenario_three() {
        let expr = parse_one("(a | b)");
        match expr {
            Expr::MessageSend(m) => assert_eq!(m.selector, "|"),
            other => panic!("expected a binary send using the operator '|', got {other:?}"),
        }
    }
}
