//! Numeral lexing: decimal integers, radix integers, floats, and scaled
//! decimals.
//!
//! The lexer only validates shape and base/digit legality; it never
//! derives a numeric value — `Token::text` carries the literal verbatim,
//! and any value parsing is the parser's concern.

use tonel_util::{ErrorKind, TonelResult};

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Entry point once the cursor is positioned at a numeral's first
    /// digit (a leading sign, if any, has already been consumed by the
    /// caller, and `self.token_start` marks the sign if present).
    pub(crate) fn lex_number(&mut self) -> TonelResult<Token> {
        let start = self.token_start;

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == 'r' && self.cursor.peek_char(1).is_ascii_alphanumeric() {
            return self.lex_radix(start);
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            if matches!(self.cursor.current_char(), 'e' | 'E') {
                return self.lex_float_exponent(start);
            }
            if self.cursor.current_char() == 's' {
                return self.lex_scaled(start);
            }
            let text = self.cursor.slice_from(start).to_string();
            return Ok(self.make_token(TokenKind::Float, text, start));
        }

        let text = self.cursor.slice_from(start).to_string();
        Ok(self.make_token(TokenKind::Integer, text, start))
    }

    fn lex_radix(&mut self, start: usize) -> TonelResult<Token> {
        let base_text = self.cursor.slice_from(start).to_string();
        let base: u32 = base_text
            .parse()
            .map_err(|_| self.error(ErrorKind::InvalidNumber, format!("invalid radix base '{base_text}'")))?;
        if !(2..=36).contains(&base) {
            return Err(self.error(ErrorKind::InvalidNumber, format!("radix base {base} out of range 2..=36")));
        }

        self.cursor.advance(); // 'r'
        let digits_start = self.cursor.position();
        while self.cursor.current_char().is_ascii_alphanumeric() {
            self.cursor.advance();
        }
        if self.cursor.position() == digits_start {
            return Err(self.error(ErrorKind::InvalidNumber, "radix literal has no digits after 'r'"));
        }

        for digit in self.cursor.slice_from(digits_start).chars() {
            match digit.to_digit(36) {
                Some(v) if v < base => {},
                _ => return Err(self.error(ErrorKind::BadRadixDigit, format!("digit '{digit}' invalid for base {base}"))),
            }
        }

        let text = self.cursor.slice_from(start).to_string();
        Ok(self.make_token(TokenKind::RadixInteger, text, start))
    }

    fn lex_float_exponent(&mut self, start: usize) -> TonelResult<Token> {
        self.cursor.advance(); // 'e' | 'E'
        if matches!(self.cursor.current_char(), '+' | '-') {
            self.cursor.advance();
        }
        let digits_start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        if self.cursor.position() == digits_start {
            return Err(self.error(ErrorKind::InvalidNumber, "float exponent has no digits"));
        }
        let text = self.cursor.slice_from(start).to_string();
        Ok(self.make_token(TokenKind::Float, text, start))
    }

    fn lex_scaled(&mut self, start: usize) -> TonelResult<Token> {
        self.cursor.advance(); // 's'
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start).to_string();
        Ok(self.make_token(TokenKind::ScaledDecimal, text, start))
    }
}
