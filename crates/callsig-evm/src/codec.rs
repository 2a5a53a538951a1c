//! `EvmAbiCodec` — the `AbiCodec` implementation for EVM call data.

use callsig_core::{codec::AbiCodec, error::AbiError, ValueTree};

use crate::{call_decoder, encoder};

/// The EVM ABI codec.
/// Thread-safe, cheap to clone (no heap state).
#[derive(Debug, Default, Clone, Copy)]
pub struct EvmAbiCodec;

impl EvmAbiCodec {
    pub fn new() -> Self {
        Self
    }
}

impl AbiCodec for EvmAbiCodec {
    fn decode_call(&self, signature: &str, call_data: &[u8]) -> Result<Vec<ValueTree>, AbiError> {
        call_decoder::decode_call(signature, call_data)
    }

    fn encode_call(&self, signature: &str, args: &[ValueTree]) -> Result<Vec<u8>, AbiError> {
        encoder::encode_call(signature, args)
    }
}
