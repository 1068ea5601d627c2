//! Metric definitions
//!
//! Only the `metrics` facade is used here; installing a recorder/exporter is
//! up to the host process. Without one, every call below is a no-op.

use metrics::{counter, describe_counter};

/// Register metric descriptions so exporters emit HELP/TYPE lines from startup
pub fn describe_metrics() {
    describe_counter!(
        "herald_dispatch_total",
        "Total number of dispatches by channel and outcome"
    );
    describe_counter!(
        "herald_executor_rejected_total",
        "Dispatch submissions rejected by the executor"
    );
}

/// Count a finished dispatch. `outcome` is `success` or an error kind.
pub fn record_dispatch(channel: &'static str, outcome: &'static str) {
    counter!("herald_dispatch_total", "channel" => channel, "outcome" => outcome).increment(1);
}

/// Count a rejected submission (`queue_full` or `shut_down`)
pub fn record_rejection(reason: &'static str) {
    counter!("herald_executor_rejected_total", "reason" => reason).increment(1);
}
