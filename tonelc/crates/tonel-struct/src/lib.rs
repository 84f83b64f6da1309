//! Tonel structural layer: STON metadata maps and the Tonel file shape
//! — comment, class head, method definitions.
//!
//! This crate never looks inside a method body beyond locating its textual
//! extent — parsing Smalltalk expressions is `tonel-par`'s job, composed
//! with this crate's output by `tonel-validate`.

pub mod ston;
pub mod tonel;

pub use ston::StonParser;
pub use tonel::{parse, ClassDefinition, ClassKind, MethodDefinition, TonelFile};
