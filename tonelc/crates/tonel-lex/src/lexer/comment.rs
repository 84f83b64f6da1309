//! Comment skipping. Comments (`"..."`, doubled `""` to escape) are elided
//! by the lexer rather than preserved as trivia.

use tonel_util::{ErrorKind, TonelResult};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn skip_whitespace_and_comments(&mut self) -> TonelResult<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current_char() != '"' {
                return Ok(());
            }
            self.skip_comment()?;
        }
    }

    fn skip_comment(&mut self) -> TonelResult<()> {
        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();
        self.cursor.advance(); // opening quote

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_at(ErrorKind::UnterminatedComment, "unterminated comment", start, line, column));
            }
            if self.cursor.current_char() == '"' {
                if self.cursor.char_at(1) == '"' {
                    self.cursor.advance();
                    self.cursor.advance();
                } else {
                    self.cursor.advance();
                    return Ok(());
                }
            } else {
                self.cursor.advance();
            }
        }
    }
}
