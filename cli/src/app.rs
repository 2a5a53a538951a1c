//! Shared state for the online commands (`tx`, `follow`).

use anyhow::{Context, Result};
use callsig_core::{ResolveError, SignatureCandidate, TransactionFields};
use callsig_evm::{CallInterpreter, Interpretation};
use callsig_observability::CallSigMetrics;
use callsig_registry::{FourByteClient, SignatureSource};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::rpc::RpcClient;

/// Interpreter plus metrics; enough for offline use.
pub struct Engine {
    interpreter: CallInterpreter,
    metrics: CallSigMetrics,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            interpreter: CallInterpreter::new(),
            metrics: CallSigMetrics::global(),
        }
    }

    pub fn metrics(&self) -> &CallSigMetrics {
        &self.metrics
    }

    /// Interpret and record metrics.
    pub fn interpret(
        &self,
        tx: &TransactionFields,
        call_data: &str,
        candidates: &[SignatureCandidate],
    ) -> Result<Interpretation, ResolveError> {
        let start = Instant::now();
        let out = self.interpreter.interpret(tx, call_data, candidates)?;
        self.metrics.record_resolution(
            candidates.len(),
            out.ranked.len(),
            out.root.method_name.as_deref(),
            start.elapsed().as_secs_f64() * 1000.0,
        );
        Ok(out)
    }
}

/// Engine plus the network clients.
pub struct App {
    pub engine: Engine,
    rpc: RpcClient,
    signatures: FourByteClient,
}

impl App {
    pub fn new(config: &CliConfig) -> Result<Self> {
        let rpc = RpcClient::new(&config.rpc_url, config.timeout()).context("build RPC client")?;
        let signatures = FourByteClient::with_base(&config.four_byte_base, config.timeout())
            .context("build 4byte client")?;
        Ok(Self {
            engine: Engine::new(),
            rpc,
            signatures,
        })
    }

    /// Fetch → look up candidates → interpret.
    pub async fn interpret_hash(&self, hash: &str) -> Result<Interpretation> {
        let tx = self
            .rpc
            .get_transaction(hash)
            .await
            .with_context(|| format!("fetch transaction {hash} from {}", self.rpc.url()))?;
        let fields = tx.fields()?;

        let candidates = self
            .signatures
            .candidates_for_call(&tx.input)
            .await
            .with_context(|| format!("look up signatures for {hash}"))?;
        debug!(hash, candidates = candidates.len(), source = self.signatures.name(), "candidates");

        let out = self.engine.interpret(&fields, &tx.input, &candidates)?;
        info!(
            hash,
            method = out.root.method_name.as_deref().unwrap_or("-"),
            "transaction interpreted"
        );
        Ok(out)
    }
}
