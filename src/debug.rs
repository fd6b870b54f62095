// src/debug.rs
//! Anonymized per-record dev logging, off unless `LEADS_DEV_LOG=1` in a dev build
//! or with `LEADS_ENV` set to a local environment.

use sha2::{Digest, Sha256};
use tracing::info;

pub const ENV_DEV_LOG: &str = "LEADS_DEV_LOG";
pub const ENV_LEADS_ENV: &str = "LEADS_ENV";

const MAX_LISTED: usize = 5;

fn enabled() -> bool {
    if std::env::var(ENV_DEV_LOG).as_deref() != Ok("1") {
        return false;
    }
    cfg!(debug_assertions)
        || std::env::var(ENV_LEADS_ENV).is_ok_and(|v| {
            ["local", "development", "dev"].contains(&v.to_ascii_lowercase().as_str())
        })
}

/// Stable 12-hex-char id for a title.
pub(crate) fn record_id(title: &str) -> String {
    Sha256::digest(title.as_bytes())[..6]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Never logs raw text: hashed title plus the first few geo hits and reasons.
pub fn dev_log_record(event: &str, title: &str, geo: &[String], reasons: &[String], score: u32) {
    if !enabled() {
        return;
    }
    info!(
        target: "leads",
        id = %record_id(title),
        score,
        event,
        geo = ?&geo[..geo.len().min(MAX_LISTED)],
        reasons = ?&reasons[..reasons.len().min(MAX_LISTED)]
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_is_short_and_stable() {
        let a = record_id("Acme raises ₹5 crore");
        assert_eq!(a.len(), 12);
        assert_eq!(a, record_id("Acme raises ₹5 crore"));
        assert_ne!(a, record_id("Acme raises ₹6 crore"));
    }

    #[test]
    #[serial_test::serial]
    fn gated_on_dev_log_flag() {
        std::env::remove_var(ENV_DEV_LOG);
        assert!(!enabled());
        std::env::set_var(ENV_DEV_LOG, "0");
        assert!(!enabled());
        std::env::set_var(ENV_LEADS_ENV, "local");
        std::env::set_var(ENV_DEV_LOG, "1");
        assert!(enabled());
        std::env::remove_var(ENV_DEV_LOG);
        std::env::remove_var(ENV_LEADS_ENV);
    }
}
