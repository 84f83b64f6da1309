//! Error taxonomy shared by every parsing phase.
//!
//! Every phase follows a single "first error aborts" policy: each one
//! returns at most one [`Diagnostic`], carrying a `reason`, an absolute
//! 1-based `line`, and a bounded `error_text` snippet. `ErrorKind` lists
//! every failure kind, grouped by the phase it comes from.

use thiserror::Error;

use crate::span::Span;

/// One failure kind, lexical through structural.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    // Lexical
    UnterminatedString,
    UnterminatedComment,
    InvalidCharacter,
    InvalidNumber,
    BadRadixDigit,
    ByteOutOfRange,
    // Grammatical
    UnexpectedToken,
    ExpectedExpression,
    ExpectedPipe,
    ExpectedRBracket,
    UnbalancedBrackets,
    EmptyBlockParameterList,
    // Semantic-in-grammar
    ReservedIdentifier,
    DuplicateTemporary,
    InvalidSelector,
    // Structural (Tonel)
    MissingClassDefinition,
    UnknownClassKind,
    MalformedMethodReference,
    UnterminatedMetadata,
    UnexpectedTrailingContent,
}

impl ErrorKind {
    /// The taxonomy name, used as the `reason` prefix (e.g.
    /// `"ReservedIdentifier: self"`).
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::UnterminatedString => "UnterminatedString",
            ErrorKind::UnterminatedComment => "UnterminatedComment",
            ErrorKind::InvalidCharacter => "InvalidCharacter",
            ErrorKind::InvalidNumber => "InvalidNumber",
            ErrorKind::BadRadixDigit => "BadRadixDigit",
            ErrorKind::ByteOutOfRange => "ByteOutOfRange",
            ErrorKind::UnexpectedToken => "UnexpectedToken",
            ErrorKind::ExpectedExpression => "ExpectedExpression",
            ErrorKind::ExpectedPipe => "ExpectedPipe",
            ErrorKind::ExpectedRBracket => "ExpectedRBracket",
            ErrorKind::UnbalancedBrackets => "UnbalancedBrackets",
            ErrorKind::EmptyBlockParameterList => "EmptyBlockParameterList",
            ErrorKind::ReservedIdentifier => "ReservedIdentifier",
            ErrorKind::DuplicateTemporary => "DuplicateTemporary",
            ErrorKind::InvalidSelector => "InvalidSelector",
            ErrorKind::MissingClassDefinition => "MissingClassDefinition",
            ErrorKind::UnknownClassKind => "UnknownClassKind",
            ErrorKind::MalformedMethodReference => "MalformedMethodReference",
            ErrorKind::UnterminatedMetadata => "UnterminatedMetadata",
            ErrorKind::UnexpectedTrailingContent => "UnexpectedTrailingContent",
        }
    }
}

/// A single parse failure, mapped to absolute file coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    /// Human-readable explanation, e.g. `"ReservedIdentifier: self"`.
    pub reason: String,
    /// 1-based absolute line number.
    pub line: u32,
    /// Up to 80 characters of source around the offender.
    pub error_text: String,
    /// Byte span of the offending token/construct, when known.
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, reason: impl Into<String>, line: u32, error_text: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            line,
            error_text: error_text.into(),
            span: Span::DUMMY,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (line {})", self.reason, self.line)
    }
}

/// Top-level error type returned by every `parse*`/`validate*` operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TonelError {
    /// A structured syntax or structural failure.
    #[error("{0}")]
    Syntax(Diagnostic),

    /// The requested file does not exist.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// The file exists but could not be read (permissions, non-UTF-8, ...).
    #[error("failed to read {path}: {message}")]
    ReadError { path: String, message: String },
}

impl TonelError {
    /// The underlying [`Diagnostic`], when this error carries one.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            TonelError::Syntax(d) => Some(d),
            _ => None,
        }
    }
}

impl From<Diagnostic> for TonelError {
    fn from(d: Diagnostic) -> Self {
        TonelError::Syntax(d)
    }
}

/// Result alias used throughout the Tonel crates.
pub type TonelResult<T> = std::result::Result<T, TonelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line() {
        let d = Diagnostic::new(ErrorKind::ReservedIdentifier, "ReservedIdentifier: self", 2, "self := 1");
        let err: TonelError = d.into();
        assert_eq!(err.to_string(), "ReservedIdentifier: self (line 2)");
    }

    #[test]
    fn file_not_found_display() {
        let err = TonelError::FileNotFound("missing.tonel".into());
        assert_eq!(err.to_string(), "file not found: missing.tonel");
    }
}
