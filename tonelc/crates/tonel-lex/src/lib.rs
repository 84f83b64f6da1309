//! tonel-lex — Bracket Scanner and Smalltalk Lexer.
//!
//! Two independent pieces live here, both over the `Cursor` in
//! [`cursor`]:
//!
//! - [`bracket::scan_matching`] locates a matching delimiter while
//!   treating string/comment/character literals as opaque. It has no
//!   notion of Smalltalk grammar beyond that.
//! - [`Lexer`] tokenizes a Smalltalk expression sequence (a Tonel method
//!   body, or any standalone snippet), including the context-sensitive
//!   `|` disambiguation between a binary selector and a temporaries
//!   declaration.

pub mod bracket;
pub mod cursor;
mod lexer;
pub mod token;

pub use lexer::pipe;
pub use lexer::Lexer;
