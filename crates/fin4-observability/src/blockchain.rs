use std::time::Duration;

use metrics::{counter, histogram};

pub fn record_contract_query(contract: &str, method: &str, status: &str, duration: Duration) {
    counter!(
        "fin4_contract_query_total",
        "contract" => contract.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "fin4_contract_query_duration_seconds",
        "contract" => contract.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());
}

/// `outcome` is one of `succeeded`, `reverted`, `skipped`, `undecodable`.
pub fn record_dry_run(contract: &str, method: &str, outcome: &str) {
    counter!(
        "fin4_dry_run_total",
        "contract" => contract.to_string(),
        "method" => method.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

pub fn record_transaction_submission(contract: &str, method: &str, status: &str) {
    counter!(
        "fin4_transaction_submission_total",
        "contract" => contract.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
