use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level Portico configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PorticoConfig {
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Admin API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_addr")]
    pub addr: String,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Cross-origin settings for the admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. `"*"` allows any origin.
    #[serde(default = "default_allow_origins")]
    pub allow_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age_secs: u64,
}

/// Entity store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON state file. `None` keeps everything in memory.
    #[serde(default = "default_state_file")]
    pub state_file: Option<PathBuf>,
}

/// Built-in plugin catalog seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_admin_addr() -> String { "0.0.0.0:8081".into() }
fn default_allow_origins() -> Vec<String> { vec!["*".into()] }
fn default_cors_max_age() -> u64 { 12 * 60 * 60 }
fn default_state_file() -> Option<PathBuf> { Some(PathBuf::from("data/portico-state.json")) }
fn default_true() -> bool { true }

// ── Impls ─────────────────────────────────────────────────────

impl Default for PorticoConfig {
    fn default() -> Self {
        Self {
            admin: AdminConfig::default(),
            storage: StorageConfig::default(),
            seed: SeedConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            addr: default_admin_addr(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: default_allow_origins(),
            max_age_secs: default_cors_max_age(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allow_origins.iter().any(|o| o == "*")
    }
}

impl PorticoConfig {
    /// Defaults, then the YAML file if given, then `PORTICO_` env overrides
    /// (`__` separates nested keys, e.g. `PORTICO_ADMIN__ADDR`).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config: PorticoConfig = figment
            .merge(Env::prefixed("PORTICO_").split("__"))
            .extract()?;
        Ok(config)
    }
}
