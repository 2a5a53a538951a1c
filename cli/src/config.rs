//! CLI configuration: YAML file, then environment, then flags.

use anyhow::{Context, Result};
use callsig_observability::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_RPC_URL: &str = "CALLSIG_RPC_URL";
pub const ENV_FOURBYTE_URL: &str = "CALLSIG_FOURBYTE_URL";
pub const ENV_LOG: &str = "CALLSIG_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Ethereum JSON-RPC endpoint used by `tx` and `follow`
    pub rpc_url: String,
    /// Base URL of a 4byte.directory-compatible API
    pub four_byte_base: String,
    /// Timeout applied to every outgoing HTTP request
    pub request_timeout_secs: u64,
    pub log: LogConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://eth.rpc.blxrbdn.com".into(),
            four_byte_base: callsig_registry::fourbyte::DEFAULT_BASE_URL.into(),
            request_timeout_secs: 15,
            log: LogConfig::default(),
        }
    }
}

impl CliConfig {
    /// Defaults, overlaid with `path` if given, then with the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)
                    .with_context(|| format!("read config '{}'", p.display()))?;
                Self::from_yaml(&text).with_context(|| format!("parse config '{}'", p.display()))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply `CALLSIG_*` overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_RPC_URL) {
            self.rpc_url = url;
        }
        if let Some(url) = lookup(ENV_FOURBYTE_URL) {
            self.four_byte_base = url;
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.log.level = level;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = CliConfig::from_yaml(
            "rpc_url: http://localhost:8545\nlog:\n  level: debug\n  json: true\n",
        )
        .unwrap();
        assert_eq!(cfg.rpc_url, "http://localhost:8545");
        assert_eq!(cfg.four_byte_base, "https://www.4byte.directory");
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.log.level, "debug");
        assert!(cfg.log.json);
    }

    #[test]
    fn env_overrides_file() {
        let env: HashMap<&str, &str> = [
            (ENV_RPC_URL, "http://node:8545"),
            (ENV_LOG, "trace"),
        ]
        .into_iter()
        .collect();

        let mut cfg = CliConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.rpc_url, "http://node:8545");
        assert_eq!(cfg.log.level, "trace");
        assert_eq!(cfg.four_byte_base, CliConfig::default().four_byte_base);
    }

    #[test]
    fn rejects_unknown_types() {
        assert!(CliConfig::from_yaml("request_timeout_secs: soon").is_err());
    }
}
