//! Configuration loading for PathLinker.
//! Reads pathlinker.toml from the current directory or the path in the
//! PATHLINKER_CONFIG env var. Every key has a default, so a missing file
//! yields a fully usable configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{PathlinkerError, Result};

pub const CONFIG_ENV_VAR: &str = "PATHLINKER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "pathlinker.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub organism: OrganismConfig,
    #[serde(default)]
    pub string: StringConfig,
    #[serde(default)]
    pub kegg: KeggConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

// ── Organism scope ───────────────────────────────────────────────────────────

/// Organism every lookup is scoped to. Only human is supported, but both
/// databases name it differently so the two codes travel together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismConfig {
    /// NCBI taxonomy id passed to STRING as `species`.
    #[serde(default = "default_taxon_id")]
    pub taxon_id: u32,
    /// KEGG organism prefix, e.g. `hsa` in `hsa:7157`.
    #[serde(default = "default_kegg_code")]
    pub kegg_code: String,
}

fn default_taxon_id() -> u32 { 9606 }
fn default_kegg_code() -> String { "hsa".to_string() }

impl Default for OrganismConfig {
    fn default() -> Self {
        Self { taxon_id: default_taxon_id(), kegg_code: default_kegg_code() }
    }
}

// ── STRING ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringConfig {
    #[serde(default = "default_string_base_url")]
    pub base_url: String,
    /// Minimum combined score on STRING's 0–1000 scale.
    #[serde(default = "default_required_score")]
    pub required_score: u32,
}

fn default_string_base_url() -> String { "https://string-db.org/api".to_string() }
fn default_required_score() -> u32 { 700 }

impl Default for StringConfig {
    fn default() -> Self {
        Self { base_url: default_string_base_url(), required_score: default_required_score() }
    }
}

// ── KEGG ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeggConfig {
    #[serde(default = "default_kegg_base_url")]
    pub base_url: String,
    /// Line prefix carrying the human-readable name in a pathway record.
    #[serde(default = "default_name_marker")]
    pub name_marker: String,
}

fn default_kegg_base_url() -> String { "https://rest.kegg.jp".to_string() }
fn default_name_marker() -> String { "NAME".to_string() }

impl Default for KeggConfig {
    fn default() -> Self {
        Self { base_url: default_kegg_base_url(), name_marker: default_name_marker() }
    }
}

// ── Request limits ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_genes")]
    pub max_genes: usize,
}

fn default_max_genes() -> usize { 10 }

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_genes: default_max_genes() }
    }
}

// ── HTTP ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout applied to every remote call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Hosts allowed in addition to the configured STRING and KEGG hosts.
    #[serde(default)]
    pub extra_allowed_domains: Vec<String>,
}

fn default_timeout_secs() -> u64 { 10 }

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: default_timeout_secs(), extra_allowed_domains: vec![] }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ── Server ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:3001".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}


impl Config {
    /// Load configuration from pathlinker.toml.
    /// Checks PATHLINKER_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if !Path::new(&path).exists() {
            tracing::info!("Config file {} not found, using defaults", path);
            let config = Config::default();
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| PathlinkerError::Config(format!("cannot read {}: {}", path, e)))?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded configuration from {}", path);
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| PathlinkerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.limits.max_genes == 0 {
            return Err(PathlinkerError::Config("limits.max_genes must be at least 1".into()));
        }
        if self.http.timeout_secs == 0 {
            return Err(PathlinkerError::Config("http.timeout_secs must be at least 1".into()));
        }
        if self.string.required_score > 1000 {
            return Err(PathlinkerError::Config(format!(
                "string.required_score must be within 0..=1000, got {}",
                self.string.required_score
            )));
        }
        if self.organism.kegg_code.trim().is_empty() {
            return Err(PathlinkerError::Config("organism.kegg_code must not be empty".into()));
        }
        Ok(())
    }
}
