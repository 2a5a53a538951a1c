//! The ABI codec seam.
//!
//! The resolver does not know how call data is laid out. It only asks a codec
//! to decode bytes against a signature and to encode the result back.
//! `callsig-evm` provides the alloy-backed implementation.

use crate::error::AbiError;
use crate::value::ValueTree;

/// Decode/encode function call data against a human-readable signature.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so one codec can serve concurrent
/// resolutions without locking.
pub trait AbiCodec: Send + Sync {
    /// Decode full call data (selector included) into the top-level arguments.
    fn decode_call(&self, signature: &str, call_data: &[u8]) -> Result<Vec<ValueTree>, AbiError>;

    /// Encode arguments into full call data (selector included).
    fn encode_call(&self, signature: &str, args: &[ValueTree]) -> Result<Vec<u8>, AbiError>;
}

impl<C: AbiCodec + ?Sized> AbiCodec for &C {
    fn decode_call(&self, signature: &str, call_data: &[u8]) -> Result<Vec<ValueTree>, AbiError> {
        (**self).decode_call(signature, call_data)
    }

    fn encode_call(&self, signature: &str, args: &[ValueTree]) -> Result<Vec<u8>, AbiError> {
        (**self).encode_call(signature, args)
    }
}

impl<C: AbiCodec + ?Sized> AbiCodec for std::sync::Arc<C> {
    fn decode_call(&self, signature: &str, call_data: &[u8]) -> Result<Vec<ValueTree>, AbiError> {
        (**self).decode_call(signature, call_data)
    }

    fn encode_call(&self, signature: &str, args: &[ValueTree]) -> Result<Vec<u8>, AbiError> {
        (**self).encode_call(signature, args)
    }
}
