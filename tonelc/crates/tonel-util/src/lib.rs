//! tonel-util — foundation types shared by every Tonel parsing phase.
//!
//! Source locations (`Span`), line/column bookkeeping (`SourceFile`), a
//! structured error taxonomy (`error`), and the shared STON value model
//! (`ston`) used by both the Tonel structural parser and the
//! method-metadata maps it produces.
//!
//! Nothing here interprets Tonel or Smalltalk syntax; that is the job of
//! `tonel-lex`, `tonel-par`, and `tonel-struct`.

mod error;
mod source;
mod span;
pub mod ston;

pub use error::{Diagnostic, ErrorKind, TonelError, TonelResult};
pub use source::{SourceFile, MAX_ERROR_TEXT_LEN};
pub use span::Span;
pub use ston::{StonKey, StonNumber, StonValue};
