//! Property tests P1 (pipe disambiguation) and P6 (radix digit validity).

use proptest::prelude::*;
use tonel_lex::token::TokenKind;
use tonel_lex::Lexer;

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
}

proptest! {
    /// P1: for `[ (:p)* | (| id+ |)? body ]`-shaped blocks, every structural
    /// `|` is `Pipe` and every `|` inside `body` is `BinarySelector`.
    #[test]
    fn p1_pipe_round_trip(param_count in 0usize..3, temp_count in 0usize..3) {
        let params: String = (0..param_count).map(|i| format!(":p{i} ")).collect();
        let temps: String = if temp_count > 0 {
            let names: String = (0..temp_count).map(|i| format!("t{i} ")).collect();
            format!("| {names}| ")
        } else {
            String::new()
        };
        let has_params = param_count > 0;
        let source = format!("{params}{}{temps}a | b", if has_params { "| " } else { "" });

        let ks = kinds(&source);
        let pipe_count = ks.iter().filter(|k| **k == TokenKind::Pipe).count();
        let expected_structural = usize::from(has_params) + usize::from(temp_count > 0) * 2;
        prop_assert_eq!(pipe_count, expected_structural);
        prop_assert_eq!(*ks.last().unwrap(), TokenKind::Eof);
        prop_assert_eq!(ks[ks.len() - 2], TokenKind::Identifier); // `b`
        prop_assert_eq!(ks[ks.len() - 3], TokenKind::BinarySelector); // the non-structural `|`
    }

    /// P6: `B`r`D+` parses iff `B` in `[2, 36]` and every digit `< B`.
    #[test]
    fn p6_radix_digit_validity(base in 2u32..=36, digit in 0u32..36) {
        let digit_char = std::char::from_digit(digit, 36).unwrap();
        let source = format!("{base}r{digit_char}");
        let result = Lexer::tokenize(&source);
        if digit < base {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn p6_radix_base_out_of_range_always_rejected(base in 37u32..100) {
        let source = format!("{base}r1");
        prop_assert!(Lexer::tokenize(&source).is_err());
    }
}

#[test]
fn p1_concrete_examples_from_spec() {
    assert_eq!(
        kinds("[ :x | (a | b) ]")
            .into_iter()
            .filter(|k| *k == TokenKind::Pipe)
            .count(),
        1
    );
    assert_eq!(
        kinds("[ :x | a | b ]")
            .into_iter()
            .filter(|k| *k == TokenKind::Pipe)
            .count(),
        1
    );
    assert_eq!(
        kinds("[ | t | t := a | b ]")
            .into_iter()
            .filter(|k| *k == TokenKind::Pipe)
            .count(),
        2
    );
}
