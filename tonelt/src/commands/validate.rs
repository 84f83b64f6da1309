//! The one real `tonelt` operation: validate a Tonel file and report the
//! result the way the CLI surface names it.

use std::path::PathBuf;

use tonel_validate::{TonelFullParser, TonelParser};

/// Arguments for the validate operation.
#[derive(Debug, Clone)]
pub struct ValidateArgs {
    pub path: PathBuf,
    pub without_method_body: bool,
}

/// The validator's human-readable result: the exact line(s) `tonelt`
/// prints, plus whether validation succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateOutcome {
    pub ok: bool,
    pub message: String,
}

/// Runs `TonelParser` (structure only) or `TonelFullParser` (structure
/// plus every method body) against `args.path`, per
/// `--without-method-body`.
pub fn run_validate(args: ValidateArgs) -> ValidateOutcome {
    let (ok, info) = if args.without_method_body {
        TonelParser::validate_from_file(&args.path)
    } else {
        TonelFullParser::validate_from_file(&args.path)
    };

    let path_display = args.path.display();
    if ok {
        ValidateOutcome { ok: true, message: format!("✓ '{path_display}' is valid") }
    } else {
        let info = info.expect("validate_from_file returns error_info whenever ok is false");
        ValidateOutcome { ok: false, message: format!("{}\nline {}\n{}", info.reason, info.line, info.error_text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_tonel(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn valid_file_reports_success() {
        let file = write_tonel("Class { #name : #C }\nC >> value [ ^ 1 ]\n");
        let outcome = run_validate(ValidateArgs { path: file.path().to_path_buf(), without_method_body: false });
        assert!(outcome.ok);
        assert!(outcome.message.starts_with('✓'));
        assert!(outcome.message.contains("is valid"));
    }

    #[test]
    fn broken_body_fails_full_validation() {
        let file = write_tonel("Class { #name : #C }\nC >> bad [ | self | self := 1 ]\n");
        let outcome = run_validate(ValidateArgs { path: file.path().to_path_buf(), without_method_body: false });
        assert!(!outcome.ok);
        assert!(outcome.message.contains("ReservedIdentifier: self"));
        assert!(outcome.message.contains("line 2"));
    }

    #[test]
    fn without_method_body_skips_body_errors() {
        let file = write_tonel("Class { #name : #C }\nC >> bad [ | self | self := 1 ]\n");
        let outcome = run_validate(ValidateArgs { path: file.path().to_path_buf(), without_method_body: true });
        assert!(outcome.ok);
    }

    #[test]
    fn missing_file_fails() {
        let outcome = run_validate(ValidateArgs { path: PathBuf::from("/nonexistent/x.tonel"), without_method_body: false });
        assert!(!outcome.ok);
    }
}
