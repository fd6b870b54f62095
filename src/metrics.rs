// src/metrics.rs
//! Metric names and one-time descriptions. Every call is a no-op until the
//! embedding binary installs a recorder.

use std::sync::Once;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};

use crate::validate::Rejection;

pub const RECORDS_TOTAL: &str = "leads_records_total";
pub const ACCEPTED_TOTAL: &str = "leads_accepted_total";
pub const REJECTED_TOTAL: &str = "leads_rejected_total";
pub const DEDUP_TOTAL: &str = "leads_dedup_total";
pub const FUNDING_PARSED_TOTAL: &str = "leads_funding_parsed_total";
pub const PROVIDER_ERRORS_TOTAL: &str = "leads_provider_errors_total";
pub const BATCH_MS: &str = "leads_batch_ms";

static DESCRIBE: Once = Once::new();

pub fn ensure_described() {
    DESCRIBE.call_once(|| {
        describe_counter!(RECORDS_TOTAL, Unit::Count, "Records offered to the pipeline");
        describe_counter!(ACCEPTED_TOTAL, Unit::Count, "Leads that passed validation");
        describe_counter!(
            REJECTED_TOTAL,
            Unit::Count,
            "Records dropped, labelled by rejection reason"
        );
        describe_counter!(DEDUP_TOTAL, Unit::Count, "Leads removed as duplicates");
        describe_counter!(
            FUNDING_PARSED_TOTAL,
            Unit::Count,
            "News records with a parsed INR amount"
        );
        describe_counter!(
            PROVIDER_ERRORS_TOTAL,
            Unit::Count,
            "Provider fetches that failed"
        );
        describe_histogram!(BATCH_MS, Unit::Milliseconds, "Time to process one batch");
    });
}

pub fn record_seen(n: usize) {
    counter!(RECORDS_TOTAL).increment(n as u64);
}

pub fn record_accepted(kind: &'static str) {
    counter!(ACCEPTED_TOTAL, "kind" => kind).increment(1);
}

pub fn record_rejected(reason: Rejection) {
    counter!(REJECTED_TOTAL, "reason" => reason.as_str()).increment(1);
}

pub fn record_dedup(n: usize) {
    if n > 0 {
        counter!(DEDUP_TOTAL).increment(n as u64);
    }
}

pub fn record_funding_parsed() {
    counter!(FUNDING_PARSED_TOTAL).increment(1);
}

pub fn record_batch_ms(ms: f64) {
    histogram!(BATCH_MS).record(ms);
}
