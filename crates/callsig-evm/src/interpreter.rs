//! One-call facade over resolve → normalize → build.

use callsig_core::{
    build_root, format_decoded, AbiCodec, DecodedCandidate, NormalizedValue, ResolveError,
    RootObject, SignatureCandidate, SignatureResolver, TransactionFields,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::EvmAbiCodec;

/// Result of interpreting one transaction.
#[derive(Debug, Clone)]
pub struct Interpretation {
    /// Root object built from the best candidate
    pub root: RootObject,
    /// Every exact match, best first
    pub ranked: Vec<DecodedCandidate>,
}

impl Interpretation {
    pub fn best(&self) -> Option<&DecodedCandidate> {
        self.ranked.first()
    }

    /// Serializable view of all ranked candidates.
    pub fn ranked_summary(&self) -> Vec<RankedCandidate> {
        self.ranked.iter().map(RankedCandidate::from).collect()
    }
}

/// A ranked candidate with its arguments already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub id: u64,
    pub signature: String,
    pub method_name: String,
    pub args: IndexMap<String, NormalizedValue>,
}

impl From<&DecodedCandidate> for RankedCandidate {
    fn from(c: &DecodedCandidate) -> Self {
        Self {
            id: c.id,
            signature: c.signature.clone(),
            method_name: c.function_name().to_string(),
            args: format_decoded(&c.decoded),
        }
    }
}

/// Interprets call data with a codec, EVM by default.
#[derive(Debug, Clone, Default)]
pub struct CallInterpreter<C = EvmAbiCodec> {
    resolver: SignatureResolver<C>,
}

impl CallInterpreter<EvmAbiCodec> {
    pub fn new() -> Self {
        Self::with_codec(EvmAbiCodec::new())
    }
}

impl<C: AbiCodec> CallInterpreter<C> {
    pub fn with_codec(codec: C) -> Self {
        Self {
            resolver: SignatureResolver::new(codec),
        }
    }

    pub fn resolver(&self) -> &SignatureResolver<C> {
        &self.resolver
    }

    /// Resolve `call_data` against `candidates` and build the root object.
    ///
    /// # Errors
    /// Only `ResolveError::InvalidInput`. No matching signature yields a root
    /// object without `method_name`/`args`.
    pub fn interpret(
        &self,
        tx: &TransactionFields,
        call_data: &str,
        candidates: &[SignatureCandidate],
    ) -> Result<Interpretation, ResolveError> {
        let ranked = self.resolver.resolve(call_data, candidates)?;
        let root = build_root(tx, ranked.first());
        debug!(
            method = root.method_name.as_deref().unwrap_or("-"),
            alternatives = ranked.len().saturating_sub(1),
            "interpreted call"
        );
        Ok(Interpretation { root, ranked })
    }
}
