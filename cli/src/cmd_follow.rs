//! `callsig follow` — interpret transaction hashes as they arrive on stdin.
//!
//! Every line supersedes the one before it. Lookups run concurrently; a
//! result is printed only if no newer line arrived while it was in flight.

use anyhow::Result;
use callsig_core::RequestGuard;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::warn;

use crate::app::App;
use crate::output;

pub async fn run(app: App, all: bool) -> Result<()> {
    let app = Arc::new(app);
    let guard = Arc::new(RequestGuard::new());
    let mut tasks = JoinSet::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let hash = line.trim().to_string();
        if hash.is_empty() {
            continue;
        }
        // an invalid line still supersedes whatever was in flight
        let ticket = guard.begin();
        if let Err(e) = crate::rpc::validate_tx_hash(&hash) {
            warn!("{e}");
            continue;
        }

        let app = Arc::clone(&app);
        let guard = Arc::clone(&guard);
        tasks.spawn(async move {
            let res = app.interpret_hash(&hash).await;
            match guard.commit(ticket, res) {
                Some(Ok(out)) => match output::render(&out, all) {
                    Ok(text) => println!("{text}"),
                    Err(e) => warn!(hash = %hash, "render failed: {e:#}"),
                },
                Some(Err(e)) => warn!(hash = %hash, "{e:#}"),
                None => app.engine.metrics().record_stale(),
            }
        });

        // reap finished tasks without blocking
        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}
    Ok(())
}
