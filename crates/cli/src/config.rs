use anyhow::{Context as AnyhowContext, Result};
use evopath_graph::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const CONFIG_FILE_NAME: &str = "evopath.toml";
pub(crate) const ENV_MAX_FRONTIER: &str = "EVOPATH_MAX_FRONTIER";
pub(crate) const ENV_BATCH_CONCURRENCY: &str = "EVOPATH_BATCH_CONCURRENCY";

const DEFAULT_MAX_COMBINATIONS: usize = 4096;
pub(crate) const MAX_BATCH_CONCURRENCY: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AppConfig {
    pub search: SearchConfig,
    pub combo: ComboConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ComboConfig {
    /// Upper bound on candidate combinations `combo` agrees to try
    pub max_combinations: usize,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            max_combinations: DEFAULT_MAX_COMBINATIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct BatchConfig {
    /// Searches allowed to run at the same time
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_batch_concurrency(),
        }
    }
}

fn default_batch_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, MAX_BATCH_CONCURRENCY)
}

fn parse_usize(raw: Option<&str>) -> Option<usize> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<usize>().ok())
}

impl AppConfig {
    /// Defaults, then the TOML file, then environment overrides.
    ///
    /// An explicit path must exist; otherwise `evopath.toml` in the working
    /// directory is used when present.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|p| p.is_file()),
        };

        let mut config = match &path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                let config = Self::from_toml(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?;
                log::debug!("Loaded config from {}", path.display());
                config
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.normalize();
        config.search.validate()?;
        Ok(config)
    }

    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text)?;
        config.normalize();
        Ok(config)
    }

    /// Blank or unparsable values leave the current setting alone
    pub(crate) fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = parse_usize(lookup(ENV_MAX_FRONTIER).as_deref()) {
            self.search.max_frontier = value.max(1);
        }
        if let Some(value) = parse_usize(lookup(ENV_BATCH_CONCURRENCY).as_deref()) {
            self.batch.concurrency = value;
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        self.batch.concurrency = self.batch.concurrency.clamp(1, MAX_BATCH_CONCURRENCY);
        self.combo.max_combinations = self.combo.max_combinations.max(1);
    }
}
