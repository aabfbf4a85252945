use std::time::Duration;

use metrics::{counter, histogram};

pub fn record_aggregation_run(pipeline: &str, status: &str, duration: Duration, records: usize) {
    counter!(
        "fin4_aggregation_runs_total",
        "pipeline" => pipeline.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "fin4_aggregation_duration_seconds",
        "pipeline" => pipeline.to_string(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());
    if status == "ok" {
        histogram!(
            "fin4_aggregation_records",
            "pipeline" => pipeline.to_string()
        )
        .record(records as f64);
    }
}

pub fn record_contract_registration(contract: &str) {
    counter!(
        "fin4_contract_registrations_total",
        "contract" => contract.to_string()
    )
    .increment(1);
}
