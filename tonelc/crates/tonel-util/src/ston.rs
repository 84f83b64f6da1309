//! STON (Smalltalk Object Notation) value model.
//!
//! Only STON's *syntactic* shape is validated — class-metadata entries
//! are recognized as key/value pairs but never interpreted. [`StonValue`]
//! is therefore a plain parse tree, not a semantic object graph.

use indexmap::IndexMap;

/// A parsed STON value.
///
/// Maps use [`IndexMap`] so that keys within one map stay unique and
/// insertion order is preserved for round-tripping: `IndexMap` rejects
/// nothing syntactically but preserves insertion order, and the STON
/// parser itself is responsible for rejecting a duplicate key (see
/// `tonel-struct::ston`).
#[derive(Clone, Debug, PartialEq)]
pub enum StonValue {
    /// `nil`.
    Nil,
    /// `true` / `false`.
    Bool(bool),
    /// An integer or float numeral.
    Number(StonNumber),
    /// A plain string literal `'...'`.
    String(String),
    /// A symbol `#foo` / `#foo:bar:` / `#+`.
    Symbol(String),
    /// `[ v1, v2, ... ]`.
    List(Vec<StonValue>),
    /// `{ k1: v1, k2: v2, ... }`.
    Map(IndexMap<StonKey, StonValue>),
    /// `ClassTag { ... }` or `ClassTag [ ... ]` — a tagged object literal.
    Object { tag: String, body: Box<StonValue> },
    /// `k : v` used as a value in its own right (an association).
    Association(Box<StonValue>, Box<StonValue>),
    /// `@digits` — a back-reference to an earlier-parsed object.
    Reference(u64),
}

/// A STON map key: symbol, string, or number.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StonKey {
    Symbol(String),
    String(String),
    Number(String),
}

/// A STON numeral, kept as both its literal text and parsed value so that
/// round-tripping never loses precision or formatting.
#[derive(Clone, Debug, PartialEq)]
pub enum StonNumber {
    Integer(i64),
    Float(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_insertion_order() {
        let mut map = IndexMap::new();
        map.insert(StonKey::Symbol("b".into()), StonValue::Nil);
        map.insert(StonKey::Symbol("a".into()), StonValue::Nil);
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec![StonKey::Symbol("b".into()), StonKey::Symbol("a".into())]);
    }
}
