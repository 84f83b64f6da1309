//! Bracket Scanner.
//!
//! Finds the position matching an already-consumed opening delimiter,
//! treating `'...'` string literals, `"..."` double-quoted comments, and
//! `$x` character literals as opaque — none of their contents can open or
//! close a delimiter, no matter what characters they contain.
//!
//! Generalized over the delimiter pair so the same state machine serves
//! both `[`/`]` (Tonel method bodies, Smalltalk block literals) and `{`/`}`
//! (STON map balancing): one mechanism, reused rather than duplicated.

use crate::cursor::Cursor;

/// The only failure mode of the Bracket Scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnbalancedBrackets;

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InString,
    InComment,
    AfterDollar,
}

/// Scans forward from `start` (the byte offset immediately after an
/// already-consumed `open` delimiter, so the running depth begins at 1)
/// and returns the byte offset of the matching `close` delimiter.
///
/// The returned offset is exclusive of the body: `source[start..offset]`
/// is the text strictly between the delimiters.
///
/// # Examples
///
/// ```
/// use tonel_lex::bracket::scan_matching;
///
/// let src = "a ] b";
/// let end = scan_matching(src, 0, '[', ']').unwrap();
/// assert_eq!(&src[0..end], "a ");
/// ```
pub fn scan_matching(source: &str, start: usize, open: char, close: char) -> Result<usize, UnbalancedBrackets> {
    let mut cursor = Cursor::new(&source[start..]);
    let mut depth: u32 = 1;
    let mut state = State::Normal;

    while !cursor.is_at_end() {
        let c = cursor.current_char();
        match state {
            State::Normal => {
                if c == open {
                    depth += 1;
                    cursor.advance();
                } else if c == close {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(start + cursor.position());
                    }
                    cursor.advance();
                } else if c == '\'' {
                    state = State::InString;
                    cursor.advance();
                } else if c == '"' {
                    state = State::InComment;
                    cursor.advance();
                } else if c == '$' {
                    state = State::AfterDollar;
                    cursor.advance();
                } else {
                    cursor.advance();
                }
            },
            State::InString => {
                if c == '\'' {
                    if cursor.char_at(1) == '\'' {
                        cursor.advance();
                        cursor.advance();
                    } else {
                        cursor.advance();
                        state = State::Normal;
                    }
                } else {
                    cursor.advance();
                }
            },
            State::InComment => {
                if c == '"' {
                    if cursor.char_at(1) == '"' {
                        cursor.advance();
                        cursor.advance();
                    } else {
                        cursor.advance();
                        state = State::Normal;
                    }
                } else {
                    cursor.advance();
                }
            },
            State::AfterDollar => {
                cursor.advance();
                state = State::Normal;
            },
        }
    }

    Err(UnbalancedBrackets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_balanced_pair() {
        let src = "foo]rest";
        let end = scan_matching(src, 0, '[', ']').unwrap();
        assert_eq!(&src[..end], "foo");
    }

    #[test]
    fn nested_brackets_counted() {
        let src = "a [ b ] c ] rest";
        let end = scan_matching(src, 0, '[', ']').unwrap();
        assert_eq!(&src[..end], "a [ b ] c ");
    }

    #[test]
    fn bracket_inside_string_ignored() {
        let src = "'x ] y' , (String with: $]) ]";
        let end = scan_matching(src, 0, '[', ']').unwrap();
        assert_eq!(&src[..end], "'x ] y' , (String with: $]) ");
    }

    #[test]
    fn bracket_inside_comment_ignored() {
        let src = "\"a ] b\" ^ 1 ]";
        let end = scan_matching(src, 0, '[', ']').unwrap();
        assert_eq!(&src[..end], "\"a ] b\" ^ 1 ");
    }

    #[test]
    fn doubled_quote_is_escaped_quote() {
        let src = "'it''s'] rest";
        let end = scan_matching(src, 0, '[', ']').unwrap();
        assert_eq!(&src[..end], "'it''s'");
    }

    #[test]
    fn doubled_double_quote_is_escaped_comment_quote() {
        let src = "\"a \"\" b\" ]";
        let end = scan_matching(src, 0, '[', ']').unwrap();
        assert_eq!(&src[..end], "\"a \"\" b\" ");
    }

    #[test]
    fn dollar_sign_escapes_next_char_only() {
        let src = "$] x ]";
        let end = scan_matching(src, 0, '[', ']').unwrap();
        assert_eq!(&src[..end], "$] x ");
    }

    #[test]
    fn unbalanced_reports_error() {
        let src = "a [ b";
        assert_eq!(scan_matching(src, 0, '[', ']'), Err(UnbalancedBrackets));
    }

    #[test]
    fn works_for_brace_pair() {
        let src = "#name : #Foo } rest";
        let end = scan_matching(src, 0, '{', '}').unwrap();
        assert_eq!(&src[..end], "#name : #Foo ");
    }
}
