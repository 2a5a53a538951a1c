//! CallSig CLI — interpret Ethereum call data against candidate signatures.
//!
//! # Commands
//! ```text
//! callsig interpret --calldata <hex> [--candidates <file.json>] [--signature <text>]... [--to] [--value] [--all]
//! callsig selector  --signature <text> | --calldata <hex>
//! callsig lookup    --selector <hex>
//! callsig batch     --jobs <jobs.json>
//! callsig tx        --hash <0x...>
//! callsig follow    < hashes.txt
//! callsig info
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod cmd_follow;
mod cmd_interpret;
mod config;
mod output;
mod rpc;

use config::CliConfig;

#[derive(Parser)]
#[command(
    name = "callsig",
    about = "Call-data interpreter — CallSig CLI",
    long_about = "
CallSig CLI: explain Ethereum transaction call data.
Candidate signatures are checked by an ABI decode/re-encode round trip; the
shortest exact match names the call. Output is the root object
{to, value, method_name, args} consumed by rule engines.

ENVIRONMENT VARIABLES:
  CALLSIG_RPC_URL       Ethereum JSON-RPC endpoint (tx, follow)
  CALLSIG_FOURBYTE_URL  4byte.directory-compatible API base
  CALLSIG_LOG           Log level (trace|debug|info|warn|error)
  RUST_LOG              Filter directives; replaces the configured levels
",
    version
)]
struct Cli {
    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret call data against a local candidate list
    Interpret {
        /// Raw call data (0x-prefixed hex)
        #[arg(long)]
        calldata: String,
        /// JSON list of {id, signature} objects or signature strings
        #[arg(long)]
        candidates: Option<PathBuf>,
        /// Extra candidate signature (repeatable)
        #[arg(long = "signature")]
        signatures: Vec<String>,
        /// Recipient address
        #[arg(long)]
        to: Option<String>,
        /// Native value in wei (decimal or 0x hex)
        #[arg(long, default_value = "0")]
        value: String,
        /// Also print every ranked candidate
        #[arg(long)]
        all: bool,
    },

    /// Interpret a JSON array of {to, value, input, candidates} jobs in parallel
    Batch {
        /// Path to the jobs file
        #[arg(long)]
        jobs: PathBuf,
        /// Number of parallel Rayon threads (0 = use default)
        #[arg(long, default_value_t = 0)]
        threads: usize,
    },

    /// Compute a 4-byte selector
    Selector {
        /// Function signature, e.g. "transfer(address,uint256)"
        #[arg(long, conflicts_with = "calldata", required_unless_present = "calldata")]
        signature: Option<String>,
        /// Call data whose leading selector to print
        #[arg(long)]
        calldata: Option<String>,
    },

    /// Look a selector up on 4byte.directory
    Lookup {
        /// 4-byte selector, with or without 0x
        #[arg(long)]
        selector: String,
        /// Print the raw result page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a transaction over JSON-RPC and interpret it
    Tx {
        /// Transaction hash (0x + 64 hex chars)
        #[arg(long)]
        hash: String,
        /// RPC URL (overrides config and CALLSIG_RPC_URL)
        #[arg(long)]
        rpc: Option<String>,
        /// Also print every ranked candidate
        #[arg(long)]
        all: bool,
    },

    /// Interpret transaction hashes read line by line from stdin
    Follow {
        /// RPC URL (overrides config and CALLSIG_RPC_URL)
        #[arg(long)]
        rpc: Option<String>,
        /// Also print every ranked candidate
        #[arg(long)]
        all: bool,
    },

    /// Show CallSig build and capability info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.log.level = "debug".into();
    }
    callsig_observability::init_tracing(&config.log);

    match cli.command {
        Commands::Interpret { calldata, candidates, signatures, to, value, all } => {
            cmd_interpret::run(cmd_interpret::InterpretArgs {
                calldata: &calldata,
                candidates: candidates.as_deref(),
                signatures: &signatures,
                to: to.as_deref(),
                value: &value,
                all,
            })
        }

        Commands::Batch { jobs, threads } => cmd_batch(&jobs, threads),

        Commands::Selector { signature, calldata } => {
            cmd_selector(signature.as_deref(), calldata.as_deref())
        }

        Commands::Lookup { selector, json } => cmd_lookup(&config, &selector, json).await,

        Commands::Tx { hash, rpc, all } => {
            if let Some(url) = rpc {
                config.rpc_url = url;
            }
            cmd_tx(&config, &hash, all).await
        }

        Commands::Follow { rpc, all } => {
            if let Some(url) = rpc {
                config.rpc_url = url;
            }
            cmd_follow::run(app::App::new(&config)?, all).await
        }

        Commands::Info => cmd_info(&config),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_batch(path: &std::path::Path, threads: usize) -> Result<()> {
    use callsig_evm::{interpret_batch, CallInterpreter, InterpretJob};

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read jobs file '{}'", path.display()))?;
    let jobs: Vec<InterpretJob> = serde_json::from_str(&text).context("parse jobs JSON")?;

    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .with_context(|| format!("configure rayon pool with {threads} threads"))?;
    }

    let results = interpret_batch(&CallInterpreter::new(), &jobs);
    let rendered: Vec<serde_json::Value> = results
        .into_iter()
        .map(|r| match r {
            Ok(out) => serde_json::to_value(&out.root),
            Err(e) => Ok(serde_json::json!({ "error": e.to_string() })),
        })
        .collect::<Result<_, _>>()?;
    println!("{}", output::to_json_pretty(&rendered)?);
    Ok(())
}

fn cmd_selector(signature: Option<&str>, calldata: Option<&str>) -> Result<()> {
    use callsig_core::Selector;
    use callsig_evm::ParsedSignature;

    match (signature, calldata) {
        (Some(sig), _) => {
            let parsed = ParsedSignature::parse(sig)?;
            println!("{}", parsed.selector);
        }
        (None, Some(data)) => {
            let sel = Selector::from_call_data(data)
                .with_context(|| format!("'{data}' is not 0x call data of at least 4 bytes"))?;
            println!("{sel}");
        }
        (None, None) => bail!("pass --signature or --calldata"),
    }
    Ok(())
}

async fn cmd_lookup(config: &CliConfig, selector: &str, as_json: bool) -> Result<()> {
    use callsig_core::Selector;
    use callsig_registry::FourByteClient;

    let sel: Selector = selector.parse()?;
    let client = FourByteClient::with_base(&config.four_byte_base, config.timeout())?;
    let page = client.lookup(sel).await?;

    if as_json {
        println!("{}", output::to_json_pretty(&page)?);
    } else {
        println!("{} signature(s) for {}", page.count, sel);
        for r in &page.results {
            println!("  {:>8}  {}", r.id, r.text_signature);
        }
        if page.next.is_some() {
            println!("  (more results on the next page)");
        }
    }
    Ok(())
}

async fn cmd_tx(config: &CliConfig, hash: &str, all: bool) -> Result<()> {
    rpc::validate_tx_hash(hash)?;
    let app = app::App::new(config)?;
    let out = app.interpret_hash(hash).await?;
    println!("{}", output::render(&out, all)?);
    Ok(())
}

fn cmd_info(config: &CliConfig) -> Result<()> {
    println!("CallSig v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Capabilities:");
    println!("  ✓ Signature resolution     (decode → re-encode round trip, alloy-dyn-abi)");
    println!("  ✓ Candidate ranking        (shortest signature first)");
    println!("  ✓ Argument normalisation   (integers above 2^53 as decimal text)");
    println!("  ✓ Parallel batch interpret (Rayon)");
    println!("  ✓ Selector lookup          (4byte.directory)");
    println!("  ✓ Transaction fetch        (eth_getTransactionByHash)");
    println!();
    println!("RPC endpoint:   {}", config.rpc_url);
    println!("4byte API:      {}", config.four_byte_base);
    Ok(())
}
