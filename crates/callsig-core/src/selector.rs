//! 4-byte function selectors.
//!
//! The selector of a function is the first 4 bytes of
//! keccak256("name(type1,type2,...)"). It is what a signature database is
//! queried with; the resolver itself never looks at it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

use crate::error::RegistryError;

/// A 4-byte function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Selector(pub [u8; 4]);

impl Selector {
    /// Selector of a canonical signature string.
    pub fn of_signature(signature: &str) -> Self {
        let mut hasher = Keccak::v256();
        let mut output = [0u8; 32];
        hasher.update(signature.as_bytes());
        hasher.finalize(&mut output);
        Self([output[0], output[1], output[2], output[3]])
    }

    /// Leading 4 bytes of raw call data; `None` if shorter.
    pub fn from_bytes(call_data: &[u8]) -> Option<Self> {
        let head: [u8; 4] = call_data.get(..4)?.try_into().ok()?;
        Some(Self(head))
    }

    /// Leading 4 bytes of `0x`-prefixed call data text; `None` if the text is
    /// not prefixed, too short, or not hex.
    pub fn from_call_data(call_data: &str) -> Option<Self> {
        let body = call_data.strip_prefix("0x")?;
        let head = body.get(..8)?;
        head.parse().ok()
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Accepts 8 hex digits with or without a `0x` prefix.
impl FromStr for Selector {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s.strip_prefix("0x").unwrap_or(s);
        let invalid = || RegistryError::InvalidSelector {
            selector: s.to_string(),
        };
        if hex_str.len() != 8 {
            return Err(invalid());
        }
        let bytes = hex::decode(hex_str).map_err(|_| invalid())?;
        Self::from_bytes(&bytes).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erc20_transfer_selector() {
        let sel = Selector::of_signature("transfer(address,uint256)");
        assert_eq!(sel.to_string(), "0xa9059cbb");
    }

    #[test]
    fn approve_selector() {
        let sel = Selector::of_signature("approve(address,uint256)");
        assert_eq!(sel.to_string(), "0x095ea7b3");
    }

    #[test]
    fn from_call_data_text() {
        let sel = Selector::from_call_data("0xa9059cbb000000").unwrap();
        assert_eq!(sel, Selector([0xa9, 0x05, 0x9c, 0xbb]));
        assert!(Selector::from_call_data("0xa905").is_none());
        assert!(Selector::from_call_data("a9059cbb").is_none());
        assert!(Selector::from_call_data("0x").is_none());
    }

    #[test]
    fn parse_with_or_without_prefix() {
        assert_eq!("a9059cbb".parse::<Selector>().unwrap(), "0xa9059cbb".parse().unwrap());
        assert!("0xa9059c".parse::<Selector>().is_err());
        assert!("0xzz059cbb".parse::<Selector>().is_err());
    }
}
