//! Signature candidate resolution.
//!
//! Every candidate is decoded against the call data and the result re-encoded.
//! A signature only explains the data if the re-encoding reproduces it byte
//! for byte: wide types (`bytes`, `uint256[]`, ...) happily decode bytes that
//! were never meant for them.
//!
//! Survivors are ranked by signature length, shortest first. This is a
//! heuristic for tie-breaking, not a proof of correctness; equal lengths keep
//! their input order.

use tracing::{debug, trace};

use crate::candidate::{DecodedCandidate, SignatureCandidate};
use crate::codec::AbiCodec;
use crate::error::{AbiError, ResolveError};

/// Resolves candidate signatures against call data with a given codec.
///
/// Holds no state besides the codec, so a single resolver can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct SignatureResolver<C> {
    codec: C,
}

impl<C: AbiCodec> SignatureResolver<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Return the candidates that explain `call_data` exactly, best first.
    ///
    /// # Errors
    /// `ResolveError::InvalidInput` if `call_data` is not `0x`-prefixed,
    /// even-length hex. No candidate is tried in that case.
    pub fn resolve(
        &self,
        call_data: &str,
        candidates: &[SignatureCandidate],
    ) -> Result<Vec<DecodedCandidate>, ResolveError> {
        let bytes = parse_call_data(call_data)?;

        let mut matched: Vec<DecodedCandidate> = candidates
            .iter()
            .filter_map(|candidate| match self.decode_candidate(call_data, &bytes, candidate) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    trace!(id = candidate.id, signature = %candidate.signature, error = %e, "candidate discarded");
                    None
                }
            })
            .filter(|decoded| {
                if !decoded.exact_match {
                    trace!(id = decoded.id, signature = %decoded.signature, "candidate decodes but does not round-trip");
                }
                decoded.exact_match
            })
            .collect();

        // `sort_by_key` is stable: equal lengths keep input order.
        matched.sort_by_key(|c| c.signature.chars().count());

        debug!(
            candidates = candidates.len(),
            matched = matched.len(),
            best = matched.first().map(|c| c.signature.as_str()).unwrap_or("-"),
            "resolved call data"
        );

        Ok(matched)
    }

    /// Decode one candidate and run the round-trip check.
    ///
    /// `call_data` is the original text, `bytes` its decoded form. Returns the
    /// candidate with `exact_match` set, or the codec error that rejected it.
    pub fn decode_candidate(
        &self,
        call_data: &str,
        bytes: &[u8],
        candidate: &SignatureCandidate,
    ) -> Result<DecodedCandidate, AbiError> {
        let decoded = self.codec.decode_call(&candidate.signature, bytes)?;
        let reencoded = self.codec.encode_call(&candidate.signature, &decoded)?;
        let reencoded_hex = format!("0x{}", hex::encode(reencoded));

        Ok(DecodedCandidate {
            id: candidate.id,
            signature: candidate.signature.clone(),
            decoded,
            exact_match: reencoded_hex.eq_ignore_ascii_case(call_data),
        })
    }
}

/// Validate `0x`-prefixed call data text and decode it to bytes.
pub fn parse_call_data(call_data: &str) -> Result<Vec<u8>, ResolveError> {
    let body = call_data
        .strip_prefix("0x")
        .ok_or_else(|| ResolveError::invalid("call data must be 0x-prefixed"))?;
    if body.len() % 2 != 0 {
        return Err(ResolveError::invalid(format!(
            "odd number of hex digits ({})",
            body.len()
        )));
    }
    hex::decode(body).map_err(|e| ResolveError::invalid(format!("invalid hex: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueTree;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Codec driven by a table: signature → (args, bytes produced on re-encode).
    #[derive(Default)]
    struct TableCodec {
        table: HashMap<String, (Vec<ValueTree>, Vec<u8>)>,
        calls: AtomicUsize,
    }

    impl TableCodec {
        fn with(mut self, sig: &str, args: Vec<ValueTree>, reencoded: &[u8]) -> Self {
            self.table.insert(sig.to_string(), (args, reencoded.to_vec()));
            self
        }
    }

    impl AbiCodec for TableCodec {
        fn decode_call(&self, signature: &str, _data: &[u8]) -> Result<Vec<ValueTree>, AbiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.table
                .get(signature)
                .map(|(args, _)| args.clone())
                .ok_or_else(|| AbiError::DecodeFailed { reason: "unknown".into() })
        }

        fn encode_call(&self, signature: &str, _args: &[ValueTree]) -> Result<Vec<u8>, AbiError> {
            self.table
                .get(signature)
                .map(|(_, bytes)| bytes.clone())
                .ok_or_else(|| AbiError::EncodeFailed { reason: "unknown".into() })
        }
    }

    const DATA: &[u8] = &[0xa9, 0x05, 0x9c, 0xbb, 0x01];

    #[test]
    fn rejects_missing_prefix_before_trying_candidates() {
        let resolver = SignatureResolver::new(TableCodec::default().with("f()", vec![], DATA));
        let err = resolver
            .resolve("abc123", &[SignatureCandidate::new(1, "f()")])
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidInput { .. }));
        assert_eq!(resolver.codec().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn rejects_malformed_hex() {
        let resolver = SignatureResolver::new(TableCodec::default());
        assert!(resolver.resolve("0xabc", &[]).is_err());
        assert!(resolver.resolve("0xzz", &[]).is_err());
    }

    #[test]
    fn empty_candidates_is_empty_result() {
        let resolver = SignatureResolver::new(TableCodec::default());
        assert!(resolver.resolve("0xa9059cbb01", &[]).unwrap().is_empty());
        assert!(resolver.resolve("0x", &[]).unwrap().is_empty());
    }

    #[test]
    fn drops_failures_and_inexact_matches() {
        let codec = TableCodec::default()
            .with("good(uint8)", vec![ValueTree::Bool(true)], DATA)
            .with("loose(bytes)", vec![], &[0xa9, 0x05, 0x9c, 0xbb]);
        let resolver = SignatureResolver::new(codec);
        let out = resolver
            .resolve(
                "0xa9059cbb01",
                &[
                    SignatureCandidate::new(1, "missing(address)"),
                    SignatureCandidate::new(2, "loose(bytes)"),
                    SignatureCandidate::new(3, "good(uint8)"),
                ],
            )
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 3);
        assert!(out[0].exact_match);
        assert_eq!(out[0].decoded, vec![ValueTree::Bool(true)]);
    }

    #[test]
    fn comparison_ignores_hex_case() {
        let resolver = SignatureResolver::new(TableCodec::default().with("f(uint8)", vec![], DATA));
        let out = resolver
            .resolve("0xA9059CBB01", &[SignatureCandidate::new(1, "f(uint8)")])
            .unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn shorter_signatures_rank_first_and_ties_keep_order() {
        let codec = TableCodec::default()
            .with("transferWithData(address,uint256)", vec![], DATA)
            .with("aaa(uint8)", vec![], DATA)
            .with("bbb(uint8)", vec![], DATA);
        let resolver = SignatureResolver::new(codec);
        let input = vec![
            SignatureCandidate::new(10, "transferWithData(address,uint256)"),
            SignatureCandidate::new(11, "bbb(uint8)"),
            SignatureCandidate::new(12, "aaa(uint8)"),
        ];
        let out = resolver.resolve("0xa9059cbb01", &input).unwrap();
        let ids: Vec<u64> = out.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
        // input untouched
        assert_eq!(input[0].id, 10);
    }

    #[test]
    fn duplicate_signatures_are_evaluated_independently() {
        let resolver = SignatureResolver::new(TableCodec::default().with("f(uint8)", vec![], DATA));
        let out = resolver
            .resolve(
                "0xa9059cbb01",
                &[SignatureCandidate::new(1, "f(uint8)"), SignatureCandidate::new(2, "f(uint8)")],
            )
            .unwrap();
        let ids: Vec<u64> = out.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
