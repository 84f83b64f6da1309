//! STON (Smalltalk Object Notation) map parser: a lightweight
//! recursive-descent parser that validates syntactic shape and balanced
//! delimiters only — it never normalizes or interprets values, or builds
//! STON's semantic object graph.
//!
//! Built in the same cursor-driven recursive-descent idiom as `tonel-par`,
//! but over its own small token set rather than reusing `tonel-lex`'s
//! `Lexer`: STON's `key : value` separator accepts an arbitrary value after
//! the colon, which collides with the Smalltalk lexer's narrower `:=` /
//! `COLON_PARAM` rule for a bare `:`.

use indexmap::IndexMap;
use tonel_lex::cursor::Cursor;
use tonel_util::{Diagnostic, ErrorKind, SourceFile, Span, TonelError, TonelResult};
use tonel_util::{StonKey, StonNumber, StonValue};

pub struct StonParser<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
}

impl<'a> StonParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), source }
    }

    /// Like [`Self::new`], but error coordinates are reported relative to
    /// an enclosing file starting at `start_line`/`start_column`.
    pub fn with_start(source: &'a str, start_line: u32, start_column: u32) -> Self {
        Self { cursor: Cursor::with_start(source, start_line, start_column), source }
    }

    /// `{ entry (, entry)* ,? }`.
    pub fn parse_map(&mut self) -> TonelResult<IndexMap<StonKey, StonValue>> {
        self.skip_ws();
        self.expect_char('{')?;
        let mut map = IndexMap::new();
        self.skip_ws();
        if self.current() != Some('}') {
            loop {
                let (key, value) = self.parse_entry()?;
                if map.contains_key(&key) {
                    return Err(self.error(ErrorKind::UnterminatedMetadata, format!("duplicate STON key {key:?}")));
                }
                map.insert(key, value);
                self.skip_ws();
                if self.current() == Some(',') {
                    self.cursor.advance();
                    self.skip_ws();
                    if self.current() == Some('}') {
                        break; // trailing comma
                    }
                } else {
                    break;
                }
            }
        }
        self.expect_char('}')?;
        Ok(map)
    }

    fn parse_entry(&mut self) -> TonelResult<(StonKey, StonValue)> {
        self.skip_ws();
        let key = self.parse_key()?;
        self.skip_ws();
        self.expect_char(':')?;
        self.skip_ws();
        let value = self.parse_value()?;
        Ok((key, value))
    }

    fn parse_key(&mut self) -> TonelResult<StonKey> {
        match self.current() {
            Some('#') => Ok(StonKey::Symbol(self.parse_symbol_text()?)),
            Some('\'') => Ok(StonKey::String(self.parse_string_text()?)),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => Ok(StonKey::Number(self.parse_number_text()?)),
            _ => Err(self.error(ErrorKind::UnexpectedToken, "expected a STON key (symbol, string, or number)")),
        }
    }

    /// `value := primitive | object | list | association | map | reference`.
    pub fn parse_value(&mut self) -> TonelResult<StonValue> {
        self.skip_ws();
        let value = self.parse_simple_value()?;
        self.skip_ws();
        if self.current() == Some(':') {
            self.cursor.advance();
            self.skip_ws();
            let rhs = self.parse_value()?;
            return Ok(StonValue::Association(Box::new(value), Box::new(rhs)));
        }
        Ok(value)
    }

    fn parse_simple_value(&mut self) -> TonelResult<StonValue> {
        match self.current() {
            Some('\'') => Ok(StonValue::String(self.parse_string_text()?)),
            Some('#') => Ok(StonValue::Symbol(self.parse_symbol_text()?)),
            Some('{') => Ok(StonValue::Map(self.parse_map()?)),
            Some('[') => self.parse_list(),
            Some('@') => self.parse_reference(),
            Some(c) if c.is_ascii_digit() || ((c == '-' || c == '+') && self.cursor.peek_char(1).is_ascii_digit()) => {
                Ok(StonValue::Number(self.parse_number()?))
            },
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_identifier_led_value(),
            _ => Err(self.error(ErrorKind::UnexpectedToken, "expected a STON value")),
        }
    }

    /// `nil` / `true` / `false` (primitives), or `ClassTag list-or-map`
    /// (an object literal).
    fn parse_identifier_led_value(&mut self) -> TonelResult<StonValue> {
        let ident = self.parse_ident_text();
        match ident.as_str() {
            "nil" => return Ok(StonValue::Nil),
            "true" => return Ok(StonValue::Bool(true)),
            "false" => return Ok(StonValue::Bool(false)),
            _ => {},
        }
        self.skip_ws();
        match self.current() {
            Some('{') => Ok(StonValue::Object { tag: ident, body: Box::new(StonValue::Map(self.parse_map()?)) }),
            Some('[') => Ok(StonValue::Object { tag: ident, body: Box::new(self.parse_list()?) }),
            _ => Err(self.error(ErrorKind::UnexpectedToken, format!("bare identifier '{ident}' is not a valid STON value"))),
        }
    }

    /// `[ value (, value)* ,? ]`.
    fn parse_list(&mut self) -> TonelResult<StonValue> {
        self.expect_char('[')?;
        let mut items = Vec::new();
        self.skip_ws();
        if self.current() != Some(']') {
            loop {
                items.push(self.parse_value()?);
                self.skip_ws();
                if self.current() == Some(',') {
                    self.cursor.advance();
                    self.skip_ws();
                    if self.current() == Some(']') {
                        break;
                    }
                } else {
                    break;
                }
            }
        }
        self.expect_char(']')?;
        Ok(StonValue::List(items))
    }

    /// `@digits`.
    fn parse_reference(&mut self) -> TonelResult<StonValue> {
        self.expect_char('@')?;
        let start = self.cursor.position();
        while self.current().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        if text.is_empty() {
            return Err(self.error(ErrorKind::UnexpectedToken, "'@' not followed by a digit"));
        }
        let id: u64 = text.parse().map_err(|_| self.error(ErrorKind::UnexpectedToken, format!("invalid reference id '{text}'")))?;
        Ok(StonValue::Reference(id))
    }

    fn parse_string_text(&mut self) -> TonelResult<String> {
        self.expect_char('\'')?;
        let mut out = String::new();
        loop {
            match self.current() {
                None => return Err(self.error(ErrorKind::UnterminatedMetadata, "unterminated STON string")),
                Some('\'') => {
                    if self.cursor.peek_char(1) == '\'' {
                        out.push('\'');
                        self.cursor.advance();
                        self.cursor.advance();
                    } else {
                        self.cursor.advance();
                        return Ok(out);
                    }
                },
                Some(c) => {
                    out.push(c);
                    self.cursor.advance();
                },
            }
        }
    }

    /// `#` followed by a simple/keyword symbol or a `#'...'` generic
    /// symbol; returns the text without the leading `#`.
    fn parse_symbol_text(&mut self) -> TonelResult<String> {
        self.expect_char('#')?;
        if self.current() == Some('\'') {
            return self.parse_string_text();
        }
        let start = self.cursor.position();
        loop {
            while self.current().map(is_symbol_char).unwrap_or(false) {
                self.cursor.advance();
            }
            if self.current() == Some(':') {
                self.cursor.advance();
                if self.current().map(|c| c.is_alphabetic() || c == '_').unwrap_or(false) {
                    continue;
                }
            }
            break;
        }
        let text = self.cursor.slice_from(start).to_string();
        if text.is_empty() {
            return Err(self.error(ErrorKind::UnexpectedToken, "'#' not followed by a valid symbol"));
        }
        Ok(text)
    }

    fn parse_number_text(&mut self) -> TonelResult<String> {
        let start = self.cursor.position();
        if matches!(self.current(), Some('+') | Some('-')) {
            self.cursor.advance();
        }
        while self.current().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            self.cursor.advance();
        }
        if self.current() == Some('.') && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance();
            while self.current().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                self.cursor.advance();
            }
        }
        Ok(self.cursor.slice_from(start).to_string())
    }

    fn parse_number(&mut self) -> TonelResult<StonNumber> {
        let text = self.parse_number_text()?;
        if text.contains('.') {
            text.parse::<f64>().map(StonNumber::Float).map_err(|_| self.error(ErrorKind::InvalidNumber, format!("invalid STON number '{text}'")))
        } else {
            text.parse::<i64>().map(StonNumber::Integer).map_err(|_| self.error(ErrorKind::InvalidNumber, format!("invalid STON number '{text}'")))
        }
    }

    fn parse_ident_text(&mut self) -> String {
        let start = self.cursor.position();
        while self.current().map(|c| c.is_alphanumeric() || c == '_').unwrap_or(false) {
            self.cursor.advance();
        }
        self.cursor.slice_from(start).to_string()
    }

    fn skip_ws(&mut self) {
        self.cursor.skip_whitespace();
    }

    fn current(&self) -> Option<char> {
        if self.cursor.is_at_end() {
            None
        } else {
            Some(self.cursor.current_char())
        }
    }

    fn expect_char(&mut self, expected: char) -> TonelResult<()> {
        if self.current() == Some(expected) {
            self.cursor.advance();
            Ok(())
        } else {
            Err(self.error(ErrorKind::UnexpectedToken, format!("expected '{expected}', found {:?}", self.current())))
        }
    }

    fn error(&self, kind: ErrorKind, reason: impl Into<String>) -> TonelError {
        let offset = self.cursor.position();
        let reason = reason.into();
        let snippet = SourceFile::new(self.source).snippet_at(offset);
        Diagnostic::new(kind, reason, self.cursor.line(), snippet)
            .with_span(Span::point(offset, self.cursor.line(), self.cursor.column()))
            .into()
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_counter_class_head_metadata() {
        let map = StonParser::new("{ #name : #Counter, #superclass : #Object, #instVars : [ 'value' ] }").parse_map().unwrap();
        assert_eq!(map.get(&StonKey::Symbol("name".into())), Some(&StonValue::Symbol("Counter".into())));
        assert_eq!(map.get(&StonKey::Symbol("superclass".into())), Some(&StonValue::Symbol("Object".into())));
        match map.get(&StonKey::Symbol("instVars".into())) {
            Some(StonValue::List(items)) => assert_eq!(items, &vec![StonValue::String("value".into())]),
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn trailing_comma_allowed() {
        let map = StonParser::new("{ #a : 1, }").parse_map().unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn duplicate_key_is_an_error() {
        assert!(StonParser::new("{ #a : 1, #a : 2 }").parse_map().is_err());
    }

    #[test]
    fn reference_value() {
        let map = StonParser::new("{ #a : @3 }").parse_map().unwrap();
        assert_eq!(map.get(&StonKey::Symbol("a".into())), Some(&StonValue::Reference(3)));
    }

    #[test]
    fn nested_map_value() {
        let map = StonParser::new("{ #a : { #b : 1 } }").parse_map().unwrap();
        match map.get(&StonKey::Symbol("a".into())) {
            Some(StonValue::Map(inner)) => assert_eq!(inner.len(), 1),
            other => panic!("expected a nested map, got {other:?}"),
        }
    }

    #[test]
    fn association_as_value() {
        let map = StonParser::new("{ #a : 1 : 2 }").parse_map().unwrap();
        match map.get(&StonKey::Symbol("a".into())) {
            Some(StonValue::Association(k, v)) => {
                assert_eq!(**k, StonValue::Number(StonNumber::Integer(1)));
                assert_eq!(**v, StonValue::Number(StonNumber::Integer(2)));
            },
            other => panic!("expected an association, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_map_is_an_error() {
        assert!(StonParser::new("{ #a : 1").parse_map().is_err());
    }
}
