//! The canonical, serialization-ready value type.
//!
//! Whatever shape the ABI layer hands over, consumers only ever see
//! `NormalizedValue`. It serializes to plain JSON, so the rule engine can bind
//! it as its root value directly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest integer a 64-bit float represents exactly (2^53 − 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// A normalized value. Map keys are unique and keep insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<NormalizedValue>),
    Map(IndexMap<String, NormalizedValue>),
}

impl NormalizedValue {
    /// Returns `true` if this value is logically null/absent.
    pub fn is_null(&self) -> bool {
        matches!(self, NormalizedValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NormalizedValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            NormalizedValue::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, NormalizedValue>> {
        match self {
            NormalizedValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[NormalizedValue]> {
        match self {
            NormalizedValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map member lookup; `None` for non-maps.
    pub fn get(&self, key: &str) -> Option<&NormalizedValue> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl From<u64> for NormalizedValue {
    fn from(v: u64) -> Self {
        NormalizedValue::Number(v.into())
    }
}

impl From<&str> for NormalizedValue {
    fn from(s: &str) -> Self {
        NormalizedValue::String(s.to_string())
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedValue::Null => write!(f, "null"),
            NormalizedValue::Bool(b) => write!(f, "{b}"),
            NormalizedValue::Number(n) => write!(f, "{n}"),
            NormalizedValue::String(s) => write!(f, "{s}"),
            NormalizedValue::List(items) => {
                let parts: Vec<_> = items.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            NormalizedValue::Map(fields) => {
                let parts: Vec<_> = fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}
