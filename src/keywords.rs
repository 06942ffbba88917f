// src/keywords.rs
//! Keyword resolution: category lookup tables + problem-description enhancement.
//!
//! Both collaborators sit behind traits so alternate sources can be swapped in
//! without touching scoring. `CategoryKeywords` is the default lookup, loaded from TOML:
//!
//! ```toml
//! [business.consulting]
//! keywords = ["client", "consultant", "retainer"]
//!
//! [industry.saas]
//! keywords = ["churn", "mrr"]
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_CATEGORIES_PATH: &str = "config/categories.toml";
pub const ENV_CATEGORIES_PATH: &str = "LEAD_FILTER_CATEGORIES_PATH";

/// Category → keyword lookup. Called once per filtering run.
pub trait KeywordSource: Send + Sync {
    fn resolve_keywords(
        &self,
        business_category: &str,
        industry_category: Option<&str>,
    ) -> anyhow::Result<Vec<String>>;
}

/// Expands a free-text problem description into extra search terms.
pub trait KeywordEnhancer: Send + Sync {
    fn enhance(&self, problem_description: &str, business_category: &str)
        -> anyhow::Result<Vec<String>>;
}

/// Keywords for one run, split by origin. Origin decides the weight; order does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    business: Vec<String>,
    enhanced: Vec<String>,
}

impl KeywordSet {
    /// Lowercases every keyword and drops empty ones (an empty needle would match any text).
    pub fn new(business: Vec<String>, enhanced: Vec<String>) -> Self {
        fn clean(v: Vec<String>) -> Vec<String> {
            v.into_iter()
                .filter(|k| !k.is_empty())
                .map(|k| k.to_lowercase())
                .collect()
        }
        Self {
            business: clean(business),
            enhanced: clean(enhanced),
        }
    }

    /// Category keywords (business + industry).
    pub fn business(&self) -> &[String] {
        &self.business
    }

    /// Enhancer output.
    pub fn enhanced(&self) -> &[String] {
        &self.enhanced
    }

    pub fn len(&self) -> usize {
        self.business.len() + self.enhanced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First `max` keywords across both origins, for logs.
    pub fn preview(&self, max: usize) -> Vec<&str> {
        self.business
            .iter()
            .chain(self.enhanced.iter())
            .take(max)
            .map(String::as_str)
            .collect()
    }
}

/* ----------------------------
Category lookup tables
---------------------------- */

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryEntry {
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Read-only category mapping. Unknown categories resolve to no keywords.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryKeywords {
    #[serde(default)]
    pub business: HashMap<String, CategoryEntry>,
    #[serde(default)]
    pub industry: HashMap<String, CategoryEntry>,
}

impl CategoryKeywords {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let mut cfg: CategoryKeywords = toml::from_str(s)?;
        for entry in cfg.business.values_mut().chain(cfg.industry.values_mut()) {
            entry.keywords = entry
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
        }
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading category keywords from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing category keywords in {}", path.display()))
    }

    /// 1) $LEAD_FILTER_CATEGORIES_PATH (must exist)
    /// 2) config/categories.toml
    /// 3) empty mapping
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(p) = std::env::var(ENV_CATEGORIES_PATH) {
            return Self::load_from(&PathBuf::from(p));
        }
        let default_path = PathBuf::from(DEFAULT_CATEGORIES_PATH);
        if default_path.exists() {
            return Self::load_from(&default_path);
        }
        warn!(
            target: "lead_filter",
            path = DEFAULT_CATEGORIES_PATH,
            "no category keyword table found; category keywords will be empty"
        );
        Ok(Self::default())
    }

    fn lookup<'a>(table: &'a HashMap<String, CategoryEntry>, name: &str) -> &'a [String] {
        if let Some(e) = table.get(name) {
            return &e.keywords;
        }
        table
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name.trim()))
            .map(|(_, e)| e.keywords.as_slice())
            .unwrap_or(&[])
    }
}

impl KeywordSource for CategoryKeywords {
    fn resolve_keywords(
        &self,
        business_category: &str,
        industry_category: Option<&str>,
    ) -> anyhow::Result<Vec<String>> {
        let mut out = Self::lookup(&self.business, business_category).to_vec();
        if let Some(ind) = industry_category {
            out.extend_from_slice(Self::lookup(&self.industry, ind));
        }
        Ok(out)
    }
}

/* ----------------------------
Enhancers
---------------------------- */

/// Enhancer that contributes nothing; used when no enhancement service is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnhancement;

impl KeywordEnhancer for NoEnhancement {
    fn enhance(&self, _problem: &str, _business: &str) -> anyhow::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Returns the same keyword list for every problem.
#[derive(Debug, Clone, Default)]
pub struct FixedEnhancer(pub Vec<String>);

impl KeywordEnhancer for FixedEnhancer {
    fn enhance(&self, _problem: &str, _business: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Resolve the full keyword set for one run.
pub fn resolve_keyword_set(
    source: &dyn KeywordSource,
    enhancer: &dyn KeywordEnhancer,
    problem_description: &str,
    business_category: &str,
    industry_category: Option<&str>,
) -> anyhow::Result<KeywordSet> {
    let business = source
        .resolve_keywords(business_category, industry_category)
        .context("resolving category keywords")?;
    let enhanced = enhancer
        .enhance(problem_description, business_category)
        .context("enhancing problem description")?;
    Ok(KeywordSet::new(business, enhanced))
}
