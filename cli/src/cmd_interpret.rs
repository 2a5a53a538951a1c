//! `callsig interpret` — offline interpretation against a local signature list.
//!
//! The `--candidates` file is indexed by selector, so only its entries whose
//! text hashes to the call's selector are tried. `--signature` values are
//! tried as given: they may carry parameter names, which the interpreter
//! strips before computing the selector.

use alloy_primitives::U256;
use anyhow::{Context, Result};
use callsig_core::{Selector, SignatureCandidate, TransactionFields};
use callsig_evm::Interpretation;
use callsig_registry::MemorySignatureSource;
use std::path::Path;

use crate::app::Engine;
use crate::output;

pub struct InterpretArgs<'a> {
    pub calldata: &'a str,
    pub candidates: Option<&'a Path>,
    pub signatures: &'a [String],
    pub to: Option<&'a str>,
    pub value: &'a str,
    pub all: bool,
}

/// Indexed entries for the call's selector, then each explicit signature
/// under the next free id. Explicit text already among the indexed entries
/// is not repeated.
pub fn collect_candidates(
    source: &MemorySignatureSource,
    calldata: &str,
    signatures: &[String],
) -> Result<Vec<SignatureCandidate>> {
    let mut candidates = match Selector::from_call_data(calldata) {
        Some(sel) => source.get(sel)?,
        None => Vec::new(),
    };
    let mut next_id = candidates.iter().map(|c| c.id + 1).max().unwrap_or(0);
    for sig in signatures {
        let sig = sig.trim();
        if candidates.iter().any(|c| c.signature == sig) {
            continue;
        }
        candidates.push(SignatureCandidate::new(next_id, sig));
        next_id += 1;
    }
    Ok(candidates)
}

pub fn interpret(args: &InterpretArgs<'_>) -> Result<Interpretation> {
    let source = MemorySignatureSource::new();
    if let Some(path) = args.candidates {
        let n = source
            .load_file(path)
            .with_context(|| format!("load candidates from '{}'", path.display()))?;
        tracing::debug!(count = n, path = %path.display(), "candidates loaded");
    }
    let candidates = collect_candidates(&source, args.calldata, args.signatures)?;

    let value: U256 = args
        .value
        .parse()
        .with_context(|| format!("invalid --value '{}'", args.value))?;
    let tx = TransactionFields::new(args.to.map(str::to_string), value);

    Ok(Engine::new().interpret(&tx, args.calldata, &candidates)?)
}

pub fn run(args: InterpretArgs<'_>) -> Result<()> {
    let out = interpret(&args)?;
    println!("{}", output::render(&out, args.all)?);
    Ok(())
}
