//! EVM function-call calldata decoder.
//!
//! Decodes transaction `input` data against a single human-readable
//! signature.
//!
//! # How it works
//! - First 4 bytes of calldata = keccak256(function_signature)[:4] (the selector)
//! - Remaining bytes = ABI-encoded inputs, laid out as function parameters

use alloy_core::dyn_abi::DynSolValue;
use callsig_core::{error::AbiError, Selector, ValueTree};

use crate::convert;
use crate::signature::ParsedSignature;

/// Decode full calldata (selector included) against `signature`.
///
/// # Errors
/// - `AbiError::InvalidSignature` if the signature does not parse
/// - `AbiError::TooShort` if there is no room for a selector
/// - `AbiError::SelectorMismatch` if the selector belongs to another function
/// - `AbiError::DecodeFailed` if the argument bytes do not fit the types
pub fn decode_call(signature: &str, calldata: &[u8]) -> Result<Vec<ValueTree>, AbiError> {
    let parsed = ParsedSignature::parse(signature)?;
    decode_parsed(&parsed, calldata)
}

/// Decode against an already parsed signature.
pub fn decode_parsed(parsed: &ParsedSignature, calldata: &[u8]) -> Result<Vec<ValueTree>, AbiError> {
    let selector = Selector::from_bytes(calldata).ok_or(AbiError::TooShort {
        len: calldata.len(),
    })?;
    if selector != parsed.selector {
        return Err(AbiError::SelectorMismatch {
            expected: parsed.selector.to_string(),
            got: selector.to_string(),
        });
    }

    let decoded = parsed
        .params_type()
        .abi_decode_params(&calldata[4..])
        .map_err(|e| AbiError::DecodeFailed {
            reason: format!("function input decode: {e}"),
        })?;

    let values = match decoded {
        DynSolValue::Tuple(vals) => vals,
        other => vec![other],
    };

    if values.len() != parsed.shapes.len() {
        return Err(AbiError::DecodeFailed {
            reason: format!(
                "expected {} arguments, decoded {}",
                parsed.shapes.len(),
                values.len()
            ),
        });
    }

    Ok(values
        .into_iter()
        .zip(parsed.shapes.iter())
        .map(|(val, shape)| convert::from_dyn(val, shape))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn transfer_calldata() -> Vec<u8> {
        // transfer(to=0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045, amount=1000000)
        let mut calldata = hex::decode("a9059cbb").unwrap();
        calldata.extend(
            hex::decode("000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045")
                .unwrap(),
        );
        calldata.extend(
            hex::decode("00000000000000000000000000000000000000000000000000000000000f4240")
                .unwrap(),
        );
        calldata
    }

    #[test]
    fn decode_transfer_calldata() {
        let args = decode_call("transfer(address,uint256)", &transfer_calldata()).unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(
            args[0],
            ValueTree::text("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")
        );
        assert_eq!(args[1], ValueTree::Uint(U256::from(1_000_000u64)));
    }

    #[test]
    fn wrong_selector_is_rejected() {
        let err = decode_call("approve(address,uint256)", &transfer_calldata()).unwrap_err();
        assert!(matches!(err, AbiError::SelectorMismatch { .. }));
    }

    #[test]
    fn short_calldata_is_rejected() {
        let err = decode_call("transfer(address,uint256)", &[0xa9, 0x05]).unwrap_err();
        assert_eq!(err, AbiError::TooShort { len: 2 });
    }

    #[test]
    fn truncated_arguments_fail_to_decode() {
        let mut data = transfer_calldata();
        data.truncate(40);
        let err = decode_call("transfer(address,uint256)", &data).unwrap_err();
        assert!(matches!(err, AbiError::DecodeFailed { .. }));
    }

    #[test]
    fn selector_only_for_no_arg_function() {
        let data = hex::decode("18160ddd").unwrap();
        assert!(decode_call("totalSupply()", &data).unwrap().is_empty());
    }

    #[test]
    fn named_tuple_decodes_to_struct() {
        let mut data = hex::decode("0bb5438d").unwrap();
        data.extend(U256::from(5u64).to_be_bytes::<32>());
        data.extend(
            hex::decode("000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045")
                .unwrap(),
        );
        let args = decode_call("submit((uint256 amount, address recipient) order)", &data).unwrap();
        let ValueTree::Struct(order) = &args[0] else {
            panic!("expected struct, got {:?}", args[0]);
        };
        let names: Vec<&str> = order.named().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["amount", "recipient"]);
        assert_eq!(order.positional()[0], &ValueTree::Uint(U256::from(5u64)));

        // the same bytes under a name-free signature stay positional
        let plain = decode_call("submit((uint256,address))", &data).unwrap();
        assert!(matches!(plain[0], ValueTree::List(ref m) if m.len() == 2));
    }
}
