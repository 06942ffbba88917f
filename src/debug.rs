// src/debug.rs
//! Dev-only, anonymized per-post diagnostics.
//!
//! Gate: LEAD_FILTER_DEV_LOG=1 AND dev env (debug build or SHUTTLE_ENV in {local,development,dev}).
//! Raw post text is never logged, only a short hash id, the score and matched terms.

use tracing::debug;

pub const ENV_DEV_LOG: &str = "LEAD_FILTER_DEV_LOG";

pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// First 6 bytes of SHA-256, hex encoded.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}

pub(crate) fn dev_log_post(event: &str, id_source: &str, matched: &[String], score: u32, threshold: u32) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(id_source);
    let matched_short = truncate_vec(matched, 5);
    debug!(
        target: "lead_filter",
        %id, score, threshold, event,
        matched = ?matched_short
    );
}
