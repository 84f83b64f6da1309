//! Parser facades: three stateless configurations over the same engines
//! — `TonelParser` (structure only), `SmalltalkParser` (a single method
//! body), `TonelFullParser` (structure + every method body). Each
//! exposes the same `parse`/`parse_from_file`/`validate`/
//! `validate_from_file` contract. No mutable state is shared between
//! them, and none is carried across calls on the same facade.

use std::path::Path;

use tonel_par::ast::Sequence;
use tonel_par::Parser as SmalltalkEngine;
use tonel_struct::TonelFile;
use tonel_util::{Diagnostic, TonelError, TonelResult};

use crate::full;

/// The `(ok, error_info?)` shape every `validate*` operation returns.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorInfo {
    pub reason: String,
    pub line: u32,
    pub error_text: String,
}

impl From<&Diagnostic> for ErrorInfo {
    fn from(d: &Diagnostic) -> Self {
        Self { reason: d.reason.clone(), line: d.line, error_text: d.error_text.clone() }
    }
}

impl From<&TonelError> for ErrorInfo {
    fn from(err: &TonelError) -> Self {
        match err.diagnostic() {
            Some(d) => d.into(),
            None => Self { reason: err.to_string(), line: 0, error_text: String::new() },
        }
    }
}

fn to_validate_result<T>(result: TonelResult<T>) -> (bool, Option<ErrorInfo>) {
    match result {
        Ok(_) => (true, None),
        Err(err) => (false, Some((&err).into())),
    }
}

fn read_source(path: &Path) -> TonelResult<String> {
    if !path.exists() {
        return Err(TonelError::FileNotFound(path.display().to_string()));
    }
    std::fs::read_to_string(path).map_err(|e| TonelError::ReadError { path: path.display().to_string(), message: e.to_string() })
}

/// Structure-only parsing: comment, class head, method metadata and
/// references, without looking inside any method body.
pub struct TonelParser;

impl TonelParser {
    pub fn parse(source: &str) -> TonelResult<TonelFile> {
        tonel_struct::parse(source)
    }

    pub fn parse_from_file(path: &Path) -> TonelResult<TonelFile> {
        Self::parse(&read_source(path)?)
    }

    pub fn validate(source: &str) -> (bool, Option<ErrorInfo>) {
        to_validate_result(Self::parse(source))
    }

    pub fn validate_from_file(path: &Path) -> (bool, Option<ErrorInfo>) {
        to_validate_result(Self::parse_from_file(path))
    }
}

/// Parses a single Smalltalk method body, standalone.
pub struct SmalltalkParser;

impl SmalltalkParser {
    pub fn parse(source: &str) -> TonelResult<Sequence> {
        SmalltalkEngine::new(source)?.parse_sequence()
    }

    pub fn parse_from_file(path: &Path) -> TonelResult<Sequence> {
        Self::parse(&read_source(path)?)
    }

    pub fn validate(source: &str) -> (bool, Option<ErrorInfo>) {
        to_validate_result(Self::parse(source))
    }

    pub fn validate_from_file(path: &Path) -> (bool, Option<ErrorInfo>) {
        to_validate_result(Self::parse_from_file(path))
    }
}

/// Structure plus every method body: the operation `validate-tonel` runs
/// by default.
pub struct TonelFullParser;

impl TonelFullParser {
    pub fn parse(source: &str) -> TonelResult<TonelFile> {
        full::parse_full(source)
    }

    pub fn parse_from_file(path: &Path) -> TonelResult<TonelFile> {
        Self::parse(&read_source(path)?)
    }

    pub fn validate(source: &str) -> (bool, Option<ErrorInfo>) {
        to_validate_result(Self::parse(source))
    }

    pub fn validate_from_file(path: &Path) -> (bool, Option<ErrorInfo>) {
        to_validate_result(Self::parse_from_file(path))
    }
}
