// src/config.rs
//! Filter configuration loaded from TOML, with env overrides.
//!
//! ```toml
//! [filter]
//! threshold = 5
//! # struggle_indicators = ["stuck", "need help"]   # optional, replaces the built-in list
//!
//! [weights]
//! business = 3
//! struggle = 2
//! enhanced = 4
//! problem_word = 1
//! min_problem_word_len = 3
//!
//! [summary]
//! title_chars = 80
//! fallback_title_chars = 100
//! batch_limit = 10
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::scoring::ScoringWeights;
use crate::summary::SummaryConfig;

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/filter.toml";
pub const DEFAULT_THRESHOLD: u32 = 5;

pub const ENV_CONFIG_PATH: &str = "LEAD_FILTER_CONFIG_PATH";
pub const ENV_THRESHOLD: &str = "LEAD_FILTER_THRESHOLD";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    pub threshold: u32,
    pub struggle_indicators: Option<Vec<String>>,
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            struggle_indicators: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub filter: FilterSection,
    pub weights: ScoringWeights,
    pub summary: SummaryConfig,
}

// parse optional non-negative integer env; garbage is ignored
fn parse_threshold_env(raw: Option<String>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
}

impl FilterConfig {
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading filter config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing filter config in {}", path.display()))
    }

    /// 1) $LEAD_FILTER_CONFIG_PATH (must exist)
    /// 2) config/filter.toml if present
    /// 3) built-in defaults
    ///
    /// Then $LEAD_FILTER_THRESHOLD, when it parses, overrides the threshold.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => Self::load_from(&PathBuf::from(p))?,
            Err(_) => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load_from(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        cfg.apply_env_overrides();
        info!(
            target: "lead_filter",
            threshold = cfg.filter.threshold,
            batch_limit = cfg.summary.batch_limit,
            "filter config loaded"
        );
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(t) = parse_threshold_env(std::env::var(ENV_THRESHOLD).ok()) {
            self.filter.threshold = t;
        }
    }
}
