//! # CLI
//!
//! This module defines the command-line interface of `data-api` using `clap`.
//!
//! The client configuration can come from three places, in increasing order of precedence:
//! a JSON file passed with `--config`, the `DATA_API_*` environment variables and the
//! command-line flags. Nothing is validated here; that is the job of
//! [`data_api_core::validate`].
use anyhow::Context;
use clap::{Parser, ValueEnum};
use data_api_core::ClientConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "data-api",
    version,
    about = "Run every accessor of a Taxon, Assembly or GenomeAnnotation object"
)]
pub struct Cli {
    /// The kind of object the reference points to
    #[arg(value_enum)]
    pub data_type: DataType,

    /// The service URL (e.g. http://localhost:50051)
    #[arg(long, env = "DATA_API_URL")]
    pub url: Option<String>,

    /// Reference of the object (e.g. 1779/1054/1)
    #[arg(long = "ref", env = "DATA_API_REF")]
    pub object_ref: Option<String>,

    /// Authorization token forwarded with every call
    #[arg(long, env = "DATA_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per call timeout, in milliseconds
    #[arg(long, env = "DATA_API_TIMEOUT")]
    pub timeout: Option<u64>,

    /// JSON file with a `{ "ref", "url", "token", "timeout" }` configuration object
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Taxon,
    Assembly,
    GenomeAnnotation,
}

impl Cli {
    /// Loads the `--config` file, if any, and overlays the values given on the command line.
    ///
    /// A file holding JSON `null` yields `None`, which the validator reports as a missing
    /// configuration. A file that does not hold a configuration object fails with
    /// [`ConfigError::Malformed`](data_api_core::ConfigError::Malformed).
    pub fn client_config(&self) -> anyhow::Result<Option<ClientConfig>> {
        let base = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read '{}'", path.display()))?;

                let Some(config) = ClientConfig::parse_json(&raw)? else {
                    return Ok(None);
                };
                config
            }
            None => ClientConfig::default(),
        };

        Ok(Some(self.overlay(base)))
    }

    fn overlay(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(object_ref) = &self.object_ref {
            config.object_ref = Some(object_ref.clone());
        }
        if let Some(url) = &self.url {
            config.url = Some(url.clone());
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout = Some(timeout);
        }
        config
    }
}
