//! Conversions between alloy `DynSolValue` and CallSig `ValueTree`.
//!
//! Decoding lifts alloy values into value trees; re-encoding lowers them back,
//! guided by the declared `DynSolType`. The two directions must be exact
//! inverses for any well-formed input, otherwise the resolver's round-trip
//! check would reject correct signatures.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, FixedBytes, Function, I256, U256};
use callsig_core::value::{StructValue, ValueTree};
use std::str::FromStr;

use crate::signature::Shape;

/// Lift a decoded alloy value into a value tree.
///
/// Tuples whose members are all named become structs carrying both positional
/// and named keys; any other tuple becomes a list.
pub fn from_dyn(val: DynSolValue, shape: &Shape) -> ValueTree {
    match val {
        DynSolValue::Bool(b) => ValueTree::Bool(b),
        DynSolValue::Int(i, _) => ValueTree::Int(i),
        DynSolValue::Uint(u, _) => ValueTree::Uint(u),

        DynSolValue::FixedBytes(word, size) => ValueTree::Text(hex_text(&word[..size.min(32)])),
        DynSolValue::Bytes(b) => ValueTree::Text(hex_text(&b)),
        DynSolValue::String(s) => ValueTree::Text(s),

        // EIP-55 checksum encoding
        DynSolValue::Address(a) => ValueTree::Text(a.to_checksum(None)),

        DynSolValue::Function(f) => ValueTree::Text(hex_text(f.as_slice())),

        DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) => {
            let inner = match shape {
                Shape::Array(inner) => inner.as_ref(),
                _ => &Shape::Leaf,
            };
            ValueTree::List(vals.into_iter().map(|v| from_dyn(v, inner)).collect())
        }

        DynSolValue::Tuple(vals) => match shape {
            Shape::Tuple(members)
                if members.len() == vals.len() && members.iter().all(|(n, _)| !n.is_empty()) =>
            {
                let lifted = members
                    .iter()
                    .zip(vals)
                    .map(|((name, member_shape), v)| (Some(name.clone()), from_dyn(v, member_shape)))
                    .collect();
                ValueTree::Struct(StructValue::with_aliases(lifted))
            }
            Shape::Tuple(members) if members.len() == vals.len() => ValueTree::List(
                members
                    .iter()
                    .zip(vals)
                    .map(|((_, member_shape), v)| from_dyn(v, member_shape))
                    .collect(),
            ),
            _ => ValueTree::List(vals.into_iter().map(|v| from_dyn(v, &Shape::Leaf)).collect()),
        },

        #[allow(unreachable_patterns)]
        other => ValueTree::Opaque(format!("{other:?}")),
    }
}

/// Lower a value tree to the alloy value of the expected type.
///
/// Integers wider than the declared type are rejected rather than truncated,
/// so dirty high bits never survive a round trip.
pub fn to_dyn(val: &ValueTree, expected: &DynSolType) -> Result<DynSolValue, String> {
    match (val, expected) {
        (ValueTree::Bool(b), DynSolType::Bool) => Ok(DynSolValue::Bool(*b)),

        (ValueTree::Uint(u), DynSolType::Uint(bits)) => {
            check_uint_width(*u, *bits)?;
            Ok(DynSolValue::Uint(*u, *bits))
        }
        (ValueTree::Number(n), DynSolType::Uint(bits)) => {
            let u = n
                .as_u64()
                .map(U256::from)
                .ok_or_else(|| format!("uint{bits}: {n} is not a non-negative integer"))?;
            check_uint_width(u, *bits)?;
            Ok(DynSolValue::Uint(u, *bits))
        }

        (ValueTree::Int(i), DynSolType::Int(bits)) => {
            check_int_width(*i, *bits)?;
            Ok(DynSolValue::Int(*i, *bits))
        }
        (ValueTree::Number(n), DynSolType::Int(bits)) => {
            let i = n
                .as_i64()
                .ok_or_else(|| format!("int{bits}: {n} is not an integer"))
                .and_then(|v| I256::try_from(v).map_err(|e| e.to_string()))?;
            check_int_width(i, *bits)?;
            Ok(DynSolValue::Int(i, *bits))
        }

        (ValueTree::Text(s), DynSolType::Address) => {
            let addr = Address::from_str(s).map_err(|e| format!("address parse: {e}"))?;
            Ok(DynSolValue::Address(addr))
        }

        (ValueTree::Text(s), DynSolType::Bytes) => Ok(DynSolValue::Bytes(parse_hex(s)?)),

        (ValueTree::Text(s), DynSolType::FixedBytes(n)) => {
            let b = parse_hex(s)?;
            if b.len() != *n || *n > 32 {
                return Err(format!("bytes{n}: got {} bytes", b.len()));
            }
            let mut word = [0u8; 32];
            word[..*n].copy_from_slice(&b);
            Ok(DynSolValue::FixedBytes(FixedBytes::from(word), *n))
        }

        (ValueTree::Text(s), DynSolType::Function) => {
            let b = parse_hex(s)?;
            if b.len() != 24 {
                return Err(format!("function: got {} bytes, need 24", b.len()));
            }
            Ok(DynSolValue::Function(Function::from_slice(&b)))
        }

        (ValueTree::Text(s), DynSolType::String) => Ok(DynSolValue::String(s.clone())),

        (ValueTree::List(elems), DynSolType::Array(inner)) => {
            let dyn_elems: Result<Vec<_>, _> = elems.iter().map(|e| to_dyn(e, inner)).collect();
            Ok(DynSolValue::Array(dyn_elems?))
        }

        (ValueTree::List(elems), DynSolType::FixedArray(inner, len)) => {
            if elems.len() != *len {
                return Err(format!(
                    "fixed array length mismatch: expected {len}, got {}",
                    elems.len()
                ));
            }
            let dyn_elems: Result<Vec<_>, _> = elems.iter().map(|e| to_dyn(e, inner)).collect();
            Ok(DynSolValue::FixedArray(dyn_elems?))
        }

        (ValueTree::List(elems), DynSolType::Tuple(types)) => {
            let refs: Vec<&ValueTree> = elems.iter().collect();
            tuple_to_dyn(&refs, types)
        }

        (ValueTree::Struct(s), DynSolType::Tuple(types)) => tuple_to_dyn(&s.positional(), types),

        _ => Err(format!(
            "cannot convert {} to {}",
            val.kind(),
            expected.sol_type_name()
        )),
    }
}

fn tuple_to_dyn(members: &[&ValueTree], types: &[DynSolType]) -> Result<DynSolValue, String> {
    if members.len() != types.len() {
        return Err(format!(
            "tuple arity mismatch: expected {}, got {}",
            types.len(),
            members.len()
        ));
    }
    let dyn_elems: Result<Vec<_>, _> = members
        .iter()
        .zip(types)
        .map(|(m, t)| to_dyn(m, t))
        .collect();
    Ok(DynSolValue::Tuple(dyn_elems?))
}

fn check_uint_width(u: U256, bits: usize) -> Result<(), String> {
    if bits < 256 && u.bit_len() > bits {
        return Err(format!("{u} does not fit in uint{bits}"));
    }
    Ok(())
}

fn check_int_width(i: I256, bits: usize) -> Result<(), String> {
    if bits < 256 {
        let bound = I256::from_raw(U256::from(1u64) << (bits - 1));
        if i >= bound || i < -bound {
            return Err(format!("{i} does not fit in int{bits}"));
        }
    }
    Ok(())
}

fn hex_text(b: &[u8]) -> String {
    format!("0x{}", hex::encode(b))
}

fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).map_err(|e| format!("hex parse: {e}"))
}
