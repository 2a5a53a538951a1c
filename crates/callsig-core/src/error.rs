//! Error types for the CallSig resolution pipeline.

use thiserror::Error;

/// Errors that abort a whole resolution.
///
/// Only structurally broken input ends up here. A candidate that fails to
/// decode is not an error at this level, and neither is "nothing matched".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid call data: {reason}")]
    InvalidInput { reason: String },
}

impl ResolveError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ResolveError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Failure of a single ABI decode or encode attempt.
///
/// Produced by [`crate::codec::AbiCodec`] implementations and absorbed by the
/// resolver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("Invalid signature '{signature}': {reason}")]
    InvalidSignature { signature: String, reason: String },

    #[error("Selector mismatch: signature has {expected}, call data has {got}")]
    SelectorMismatch { expected: String, got: String },

    #[error("Call data too short: {len} bytes (need at least 4 for selector)")]
    TooShort { len: usize },

    #[error("ABI decode failed: {reason}")]
    DecodeFailed { reason: String },

    #[error("ABI encode failed: {reason}")]
    EncodeFailed { reason: String },
}

/// Errors from a signature source (in-memory index or remote lookup).
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid selector '{selector}': expected 4 bytes of hex")]
    InvalidSelector { selector: String },

    #[error("Malformed signature list: {reason}")]
    Malformed { reason: String },

    #[error("Registry lock poisoned")]
    Poisoned,

    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
