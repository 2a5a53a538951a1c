//! Rayon-powered batch interpretation.
//!
//! Each transaction is interpreted independently; a single interpretation
//! stays sequential. Results come back in job order.

use callsig_core::{AbiCodec, ResolveError, SignatureCandidate, TransactionFields};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::interpreter::{CallInterpreter, Interpretation};

/// One transaction to interpret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretJob {
    #[serde(flatten)]
    pub tx: TransactionFields,
    /// `0x`-prefixed call data
    pub input: String,
    #[serde(default)]
    pub candidates: Vec<SignatureCandidate>,
}

/// Interpret a slice of jobs in parallel.
/// Returns one result per job, index-aligned with `jobs`.
pub fn interpret_batch<C: AbiCodec>(
    interpreter: &CallInterpreter<C>,
    jobs: &[InterpretJob],
) -> Vec<Result<Interpretation, ResolveError>> {
    jobs.par_iter()
        .map(|job| interpreter.interpret(&job.tx, &job.input, &job.candidates))
        .collect()
}
