//! Converts decoded `ValueTree`s into `NormalizedValue`s.
//!
//! Normalization is total: every input shape maps to some output, so an
//! unexpected value from the ABI layer degrades to text instead of failing.
//! It is also idempotent: feeding a normalized value back in (via
//! `ValueTree::from`) yields the same value.

use indexmap::IndexMap;

use crate::types::{NormalizedValue, MAX_SAFE_INTEGER};
use crate::value::ValueTree;

/// Normalize a single decoded value.
pub fn normalize(value: &ValueTree) -> NormalizedValue {
    match value {
        ValueTree::Null => NormalizedValue::Null,
        ValueTree::Bool(b) => NormalizedValue::Bool(*b),
        ValueTree::Text(s) => NormalizedValue::String(s.clone()),
        ValueTree::Number(n) => NormalizedValue::Number(n.clone()),

        ValueTree::Uint(u) => match u64::try_from(*u) {
            Ok(v) if v <= MAX_SAFE_INTEGER => NormalizedValue::Number(v.into()),
            _ => NormalizedValue::String(u.to_string()),
        },

        ValueTree::Int(i) => match i64::try_from(*i) {
            Ok(v) if v.unsigned_abs() <= MAX_SAFE_INTEGER => NormalizedValue::Number(v.into()),
            _ => NormalizedValue::String(i.to_string()),
        },

        ValueTree::List(items) => NormalizedValue::List(items.iter().map(normalize).collect()),

        // Positional keys alias the named ones; keep the names only.
        ValueTree::Struct(s) => NormalizedValue::Map(
            s.named()
                .map(|(name, v)| (name.to_string(), normalize(v)))
                .collect(),
        ),

        ValueTree::Opaque(repr) => NormalizedValue::String(repr.clone()),
    }
}

/// Key the top-level arguments positionally: `args0`, `args1`, ...
pub fn format_decoded(args: &[ValueTree]) -> IndexMap<String, NormalizedValue> {
    args.iter()
        .enumerate()
        .map(|(i, v)| (format!("args{i}"), normalize(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{MemberKey, StructValue};
    use alloy_primitives::{I256, U256};

    fn uint(v: u64) -> ValueTree {
        ValueTree::Uint(U256::from(v))
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(normalize(&ValueTree::Null), NormalizedValue::Null);
        assert_eq!(normalize(&ValueTree::Bool(false)), NormalizedValue::Bool(false));
        assert_eq!(normalize(&ValueTree::text("0xdead")), NormalizedValue::from("0xdead"));
        assert_eq!(
            normalize(&ValueTree::number(1.5)),
            NormalizedValue::Number(serde_json::Number::from_f64(1.5).unwrap())
        );
        assert_eq!(normalize(&ValueTree::Opaque("fn".into())), NormalizedValue::from("fn"));
    }

    #[test]
    fn precision_boundary() {
        assert_eq!(normalize(&uint(MAX_SAFE_INTEGER)), NormalizedValue::from(MAX_SAFE_INTEGER));
        assert_eq!(
            normalize(&uint(MAX_SAFE_INTEGER + 1)),
            NormalizedValue::from("9007199254740992")
        );
        assert_eq!(
            normalize(&ValueTree::Uint(U256::MAX)),
            NormalizedValue::String(U256::MAX.to_string())
        );
    }

    #[test]
    fn negative_precision_boundary() {
        let min_safe = I256::try_from(-(MAX_SAFE_INTEGER as i64)).unwrap();
        assert_eq!(
            normalize(&ValueTree::Int(min_safe)),
            NormalizedValue::Number((-(MAX_SAFE_INTEGER as i64)).into())
        );
        let below = I256::try_from(-(MAX_SAFE_INTEGER as i64) - 1).unwrap();
        assert_eq!(normalize(&ValueTree::Int(below)), NormalizedValue::from("-9007199254740992"));
        assert_eq!(normalize(&ValueTree::Int(I256::ZERO)), NormalizedValue::from(0u64));
    }

    #[test]
    fn drops_positional_aliases() {
        let s = StructValue::from_text_keys(vec![
            ("0", ValueTree::text("a")),
            ("1", ValueTree::text("b")),
            ("name", ValueTree::text("a")),
            ("other", ValueTree::text("b")),
        ]);
        let out = normalize(&ValueTree::Struct(s));
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"name":"a","other":"b"}"#);
    }

    #[test]
    fn nested_lists_and_structs() {
        let inner = StructValue::with_aliases(vec![
            (Some("amount".into()), uint(7)),
            (Some("tags".into()), ValueTree::List(vec![ValueTree::text("x")])),
        ]);
        let tree = ValueTree::List(vec![ValueTree::Struct(inner), ValueTree::Null]);
        let out = normalize(&tree);
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"[{"amount":7,"tags":["x"]},null]"#
        );
    }

    #[test]
    fn struct_with_only_positions_is_empty_map() {
        let mut s = StructValue::new();
        s.push(MemberKey::Index(0), uint(1));
        assert_eq!(normalize(&ValueTree::Struct(s)), NormalizedValue::Map(IndexMap::new()));
    }

    #[test]
    fn idempotent_on_normalized_output() {
        let tree = ValueTree::List(vec![
            uint(42),
            ValueTree::Uint(U256::MAX),
            ValueTree::Struct(StructValue::with_aliases(vec![
                (Some("who".into()), ValueTree::text("0xabc")),
                (Some("ok".into()), ValueTree::Bool(true)),
            ])),
            ValueTree::number(0.25),
        ]);
        let once = normalize(&tree);
        let twice = normalize(&ValueTree::from(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn format_decoded_keys_by_position() {
        let out = format_decoded(&[ValueTree::text("0xabc"), uint(1_000_000)]);
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["args0", "args1"]);
        assert_eq!(out["args1"], NormalizedValue::from(1_000_000u64));
        assert!(format_decoded(&[]).is_empty());
    }
}
