//! Full Validator and parser facades: composes `tonel-struct` and
//! `tonel-par` into the three parser kinds the rest of the toolchain
//! (and `tonelt`) consume.

pub mod facade;
pub mod full;

pub use facade::{ErrorInfo, SmalltalkParser, TonelFullParser, TonelParser};
pub use full::parse_full;
