//! ABI encoder — the inverse of the call decoder.
//!
//! Converts decoded `ValueTree` arguments back into EVM calldata
//! (`selector ++ abi_encode_params(args...)`). The resolver uses it for the
//! round-trip check.

use alloy_core::dyn_abi::DynSolValue;
use callsig_core::{error::AbiError, ValueTree};

use crate::convert;
use crate::signature::ParsedSignature;

/// Encode arguments into full calldata for `signature`.
///
/// # Arguments
/// * `signature` - human-readable function signature
/// * `args` - values in declaration order (count and types must match)
pub fn encode_call(signature: &str, args: &[ValueTree]) -> Result<Vec<u8>, AbiError> {
    let parsed = ParsedSignature::parse(signature)?;
    encode_parsed(&parsed, args)
}

/// Encode against an already parsed signature.
pub fn encode_parsed(parsed: &ParsedSignature, args: &[ValueTree]) -> Result<Vec<u8>, AbiError> {
    if args.len() != parsed.types.len() {
        return Err(AbiError::EncodeFailed {
            reason: format!(
                "argument count mismatch: signature has {}, got {}",
                parsed.types.len(),
                args.len()
            ),
        });
    }

    let mut dyn_values = Vec::with_capacity(args.len());
    for (i, (ty, arg)) in parsed.types.iter().zip(args).enumerate() {
        let dyn_val = convert::to_dyn(arg, ty).map_err(|e| AbiError::EncodeFailed {
            reason: format!("param {i}: {e}"),
        })?;
        dyn_values.push(dyn_val);
    }

    let encoded = DynSolValue::Tuple(dyn_values).abi_encode_params();

    let mut calldata = parsed.selector.as_bytes().to_vec();
    calldata.extend_from_slice(&encoded);
    Ok(calldata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn encode_transfer() {
        let calldata = encode_call(
            "transfer(address,uint256)",
            &[
                ValueTree::text("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
                ValueTree::Uint(U256::from(1_000_000u64)),
            ],
        )
        .unwrap();

        // First 4 bytes = selector for transfer(address,uint256) = 0xa9059cbb
        assert_eq!(&calldata[..4], hex::decode("a9059cbb").unwrap().as_slice());
        // Total length = 4 + 32 + 32 = 68 bytes
        assert_eq!(calldata.len(), 68);
    }

    #[test]
    fn wrong_arg_count_returns_error() {
        let result = encode_call("transfer(address,uint256)", &[ValueTree::Uint(U256::from(1u64))]);
        assert!(matches!(result, Err(AbiError::EncodeFailed { .. })));
    }

    #[test]
    fn roundtrip_dynamic_params() {
        use crate::call_decoder::decode_call;

        let sig = "post(string,bytes,uint256[])";
        let args = vec![
            ValueTree::text("hello"),
            ValueTree::text("0xdeadbeef"),
            ValueTree::List(vec![ValueTree::Uint(U256::from(1u64)), ValueTree::Uint(U256::from(2u64))]),
        ];
        let calldata = encode_call(sig, &args).unwrap();
        let decoded = decode_call(sig, &calldata).unwrap();
        assert_eq!(decoded, args);
    }
}
