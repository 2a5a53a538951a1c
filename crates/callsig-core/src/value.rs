//! Decoded value trees as handed over by an ABI codec.
//!
//! A `ValueTree` is the input side of normalization. It keeps the full
//! precision of EVM integers and the dual positional/named view of struct
//! members that ABI libraries tend to produce.

use alloy_primitives::{I256, U256};
use std::fmt;

use crate::types::NormalizedValue;

/// A decoded argument value, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueTree {
    Null,
    Bool(bool),
    /// Already-encoded text: addresses, hex byte strings, Solidity strings.
    Text(String),
    /// A machine-precision number.
    Number(serde_json::Number),
    /// Unsigned integer up to 256 bits.
    Uint(U256),
    /// Signed integer up to 256 bits.
    Int(I256),
    List(Vec<ValueTree>),
    Struct(StructValue),
    /// A value the codec could not classify; carries its textual rendering.
    Opaque(String),
}

impl ValueTree {
    /// Build a native number. Non-finite floats have no numeric JSON form and
    /// are kept as opaque text.
    pub fn number(v: f64) -> Self {
        match serde_json::Number::from_f64(v) {
            Some(n) => ValueTree::Number(n),
            None => ValueTree::Opaque(v.to_string()),
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        ValueTree::Text(s.into())
    }

    /// Short type tag, used in log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ValueTree::Null => "null",
            ValueTree::Bool(_) => "bool",
            ValueTree::Text(_) => "text",
            ValueTree::Number(_) => "number",
            ValueTree::Uint(_) => "uint",
            ValueTree::Int(_) => "int",
            ValueTree::List(_) => "list",
            ValueTree::Struct(_) => "struct",
            ValueTree::Opaque(_) => "opaque",
        }
    }
}

impl fmt::Display for ValueTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueTree::Null => write!(f, "null"),
            ValueTree::Bool(b) => write!(f, "{b}"),
            ValueTree::Text(s) => write!(f, "{s}"),
            ValueTree::Number(n) => write!(f, "{n}"),
            ValueTree::Uint(u) => write!(f, "{u}"),
            ValueTree::Int(i) => write!(f, "{i}"),
            ValueTree::List(items) => {
                let parts: Vec<_> = items.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            ValueTree::Struct(s) => {
                let parts: Vec<_> = s
                    .entries()
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            ValueTree::Opaque(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for ValueTree {
    fn from(b: bool) -> Self {
        ValueTree::Bool(b)
    }
}

impl From<&str> for ValueTree {
    fn from(s: &str) -> Self {
        ValueTree::Text(s.to_string())
    }
}

impl From<String> for ValueTree {
    fn from(s: String) -> Self {
        ValueTree::Text(s)
    }
}

impl From<U256> for ValueTree {
    fn from(u: U256) -> Self {
        ValueTree::Uint(u)
    }
}

impl From<I256> for ValueTree {
    fn from(i: I256) -> Self {
        ValueTree::Int(i)
    }
}

impl From<Vec<ValueTree>> for ValueTree {
    fn from(items: Vec<ValueTree>) -> Self {
        ValueTree::List(items)
    }
}

impl From<StructValue> for ValueTree {
    fn from(s: StructValue) -> Self {
        ValueTree::Struct(s)
    }
}

/// Lifts a normalized value back into a tree. Map keys are always tagged as
/// names, so normalizing the result gives back the original value.
impl From<NormalizedValue> for ValueTree {
    fn from(v: NormalizedValue) -> Self {
        match v {
            NormalizedValue::Null => ValueTree::Null,
            NormalizedValue::Bool(b) => ValueTree::Bool(b),
            NormalizedValue::Number(n) => ValueTree::Number(n),
            NormalizedValue::String(s) => ValueTree::Text(s),
            NormalizedValue::List(items) => {
                ValueTree::List(items.into_iter().map(ValueTree::from).collect())
            }
            NormalizedValue::Map(fields) => {
                let mut s = StructValue::new();
                for (k, v) in fields {
                    s.push(MemberKey::Name(k), ValueTree::from(v));
                }
                ValueTree::Struct(s)
            }
        }
    }
}

// ─── Struct members ───────────────────────────────────────────────────────────

/// Key of a struct member.
///
/// ABI libraries expose tuple members both by position and by name; the
/// positional keys are aliases of the named ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKey {
    Index(usize),
    Name(String),
}

impl MemberKey {
    /// Classify a plain text key. Anything that parses as a non-negative
    /// integer is a positional alias.
    pub fn parse(key: &str) -> Self {
        match key.parse::<usize>() {
            Ok(i) => MemberKey::Index(i),
            Err(_) => MemberKey::Name(key.to_string()),
        }
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, MemberKey::Index(_))
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKey::Index(i) => write!(f, "{i}"),
            MemberKey::Name(n) => write!(f, "{n}"),
        }
    }
}

/// A struct-like decoded value: ordered members keyed by position or name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructValue {
    entries: Vec<(MemberKey, ValueTree)>,
}

impl StructValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a struct from plain text keys, classifying each with
    /// [`MemberKey::parse`].
    pub fn from_text_keys<K, I>(entries: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, ValueTree)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (MemberKey::parse(k.as_ref()), v))
                .collect(),
        }
    }

    /// Build a struct the way ABI results look: every member under its
    /// position, followed by the named members again under their names.
    /// Unnamed members only get the positional key.
    pub fn with_aliases(members: Vec<(Option<String>, ValueTree)>) -> Self {
        let mut s = Self::new();
        for (i, (_, v)) in members.iter().enumerate() {
            s.push(MemberKey::Index(i), v.clone());
        }
        for (name, v) in members {
            if let Some(name) = name {
                s.push(MemberKey::Name(name), v);
            }
        }
        s
    }

    pub fn push(&mut self, key: MemberKey, value: ValueTree) {
        self.entries.push((key, value));
    }

    pub fn entries(&self) -> &[(MemberKey, ValueTree)] {
        &self.entries
    }

    /// Named members in declaration order.
    pub fn named(&self) -> impl Iterator<Item = (&str, &ValueTree)> {
        self.entries.iter().filter_map(|(k, v)| match k {
            MemberKey::Name(n) => Some((n.as_str(), v)),
            MemberKey::Index(_) => None,
        })
    }

    /// Positional members, sorted by index. Used when re-encoding.
    pub fn positional(&self) -> Vec<&ValueTree> {
        let mut items: Vec<(usize, &ValueTree)> = self
            .entries
            .iter()
            .filter_map(|(k, v)| match k {
                MemberKey::Index(i) => Some((*i, v)),
                MemberKey::Name(_) => None,
            })
            .collect();
        items.sort_by_key(|(i, _)| *i);
        items.into_iter().map(|(_, v)| v).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
