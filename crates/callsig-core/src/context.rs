//! Builds the root object bound by the rule engine.
//!
//! Field names (`to`, `value`, `method_name`, `args`) are the wire contract
//! with the consumer.

use alloy_primitives::U256;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::candidate::DecodedCandidate;
use crate::normalizer::format_decoded;
use crate::types::NormalizedValue;

/// The transaction fields the root object carries verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionFields {
    /// Recipient; `None` for contract creation
    pub to: Option<String>,
    /// Native value transferred, in wei
    pub value: U256,
}

impl TransactionFields {
    pub fn new(to: Option<String>, value: U256) -> Self {
        Self { to, value }
    }
}

/// Root object handed to the rule engine.
///
/// `method_name` and `args` are either both present or both absent; absent
/// means no known signature explains the call data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootObject {
    pub to: Option<String>,
    /// Decimal text, so amounts above 2^53 survive JSON consumers
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<IndexMap<String, NormalizedValue>>,
}

impl RootObject {
    /// Returns `true` if a signature was found for the call.
    pub fn is_classified(&self) -> bool {
        self.method_name.is_some()
    }

    /// Look up a top-level argument by position (`args{index}`).
    pub fn arg(&self, index: usize) -> Option<&NormalizedValue> {
        self.args.as_ref()?.get(&format!("args{index}"))
    }
}

/// Assemble the root object from the transaction and the best candidate.
pub fn build_root(tx: &TransactionFields, best: Option<&DecodedCandidate>) -> RootObject {
    RootObject {
        to: tx.to.clone(),
        value: tx.value.to_string(),
        method_name: best.map(|c| c.function_name().to_string()),
        args: best.map(|c| format_decoded(&c.decoded)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueTree;

    fn transfer() -> DecodedCandidate {
        DecodedCandidate {
            id: 1,
            signature: "transfer(address,uint256)".into(),
            decoded: vec![
                ValueTree::text("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
                ValueTree::Uint(U256::from(1_000_000u64)),
            ],
            exact_match: true,
        }
    }

    #[test]
    fn classified_root_object() {
        let tx = TransactionFields::new(
            Some("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".into()),
            U256::ZERO,
        );
        let root = build_root(&tx, Some(&transfer()));
        assert!(root.is_classified());
        assert_eq!(root.method_name.as_deref(), Some("transfer"));
        assert_eq!(root.value, "0");
        assert_eq!(root.arg(1), Some(&NormalizedValue::from(1_000_000u64)));

        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["args"]["args0"], "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        assert_eq!(json["args"]["args1"], 1_000_000);
    }

    #[test]
    fn unclassified_omits_method_and_args() {
        let tx = TransactionFields::new(None, U256::from(10u64).pow(U256::from(20u64)));
        let root = build_root(&tx, None);
        assert!(!root.is_classified());
        assert!(root.arg(0).is_none());

        let json = serde_json::to_string(&root).unwrap();
        assert_eq!(json, r#"{"to":null,"value":"100000000000000000000"}"#);
    }
}
