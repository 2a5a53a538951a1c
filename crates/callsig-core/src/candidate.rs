//! Signature candidates and their decoded form.

use serde::{Deserialize, Serialize};

use crate::value::ValueTree;

/// A human-readable function signature hypothesized to explain call data,
/// e.g. `{ id: 145, signature: "transfer(address,uint256)" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureCandidate {
    /// Identifier assigned by the signature database
    pub id: u64,
    /// Function declaration: name and parenthesized parameter types
    pub signature: String,
}

impl SignatureCandidate {
    pub fn new(id: u64, signature: impl Into<String>) -> Self {
        Self {
            id,
            signature: signature.into(),
        }
    }

    /// The function name: everything before the first `(`.
    pub fn function_name(&self) -> &str {
        function_name(&self.signature)
    }
}

/// A candidate whose signature decoded the call data.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCandidate {
    pub id: u64,
    pub signature: String,
    /// Top-level arguments in declaration order
    pub decoded: Vec<ValueTree>,
    /// Re-encoding the decoded arguments reproduced the call data exactly
    pub exact_match: bool,
}

impl DecodedCandidate {
    pub fn function_name(&self) -> &str {
        function_name(&self.signature)
    }
}

/// Text preceding the first `(`; the whole signature if there is none.
pub fn function_name(signature: &str) -> &str {
    match signature.find('(') {
        Some(idx) => &signature[..idx],
        None => signature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_name_before_paren() {
        assert_eq!(function_name("transfer(address,uint256)"), "transfer");
        assert_eq!(function_name("f((uint256,address)[])"), "f");
        assert_eq!(function_name("noparens"), "noparens");
    }

    #[test]
    fn candidate_json_shape() {
        let c: SignatureCandidate =
            serde_json::from_str(r#"{"id":145,"signature":"transfer(address,uint256)"}"#).unwrap();
        assert_eq!(c.id, 145);
        assert_eq!(c.function_name(), "transfer");
    }
}
