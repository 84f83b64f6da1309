//! Full Validator: composes the Tonel structural parser with the
//! Smalltalk parser, running the latter over every method body in
//! textual order and stopping at the first one that fails.

use tonel_par::Parser;
use tonel_struct::TonelFile;
use tonel_util::TonelResult;

/// Parses the structural shape of `source` via `tonel_struct::parse`, then
/// parses every method's body as a Smalltalk statement sequence.
///
/// Each method body is lexed/parsed starting at its own
/// `body_start_line`/`body_start_column`, so any failure already carries
/// file-absolute coordinates — translating local lexer coordinates to
/// file coordinates is exactly what seeding the Smalltalk lexer's cursor
/// with the body's starting line/column does: add `body_start_line - 1`
/// to every reported line, and on the first line only, `body_start_column`
/// to every reported column.
///
/// Methods are visited in the order `tonel_struct::parse` returns them,
/// which is textual order, so the first `Err` here is necessarily the
/// textually first method whose body fails to parse.
pub fn parse_full(source: &str) -> TonelResult<TonelFile> {
    let file = tonel_struct::parse(source)?;
    for method in &file.methods {
        Parser::with_start(&method.body, method.body_start_line, method.body_start_column)?.parse_sequence()?;
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_one_is_valid() {
        let src = "\"doc\"\nClass { #name : #Counter, #superclass : #Object, #instVars : [ 'value' ] }\n\n{ #category : #accessing }\nCounter >> value [ ^ value ]\n";
        let file = parse_full(src).unwrap();
        assert_eq!(file.comment.as_deref(), Some("doc"));
        assert_eq!(file.methods[0].selector, "value");
    }

    #[test]
    fn scenario_five_reserved_identifier_reports_file_absolute_line() {
        let src = "Class { #name : #C }\nC >> bad [ | self | self := 1 ]\n";
        let err = parse_full(src).unwrap_err();
        assert!(err.to_string().contains("ReservedIdentifier: self"));
        assert_eq!(err.diagnostic().unwrap().line, 2);
    }

    #[test]
    fn first_failing_method_wins_when_several_are_broken() {
        let src = "Class { #name : #C }\nC >> first [ | self | self := 1 ]\nC >> second [ | nil | nil := 1 ]\n";
        let err = parse_full(src).unwrap_err();
        assert_eq!(err.diagnostic().unwrap().line, 2);
    }

    #[test]
    fn structural_errors_still_propagate() {
        let src = "Struct { #name : #C }\n";
        assert!(parse_full(src).is_err());
    }

    #[test]
    fn valid_method_after_a_valid_one_does_not_mask_anything() {
        let src = "Class { #name : #C }\nC >> a [ ^ 1 ]\nC >> b [ ^ 2 ]\n";
        assert!(parse_full(src).is_ok());
    }
}
