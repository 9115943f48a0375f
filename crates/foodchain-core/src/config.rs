use serde::{Deserialize, Serialize};

/// How the chain treats a payment that exceeds the product's fixed price.
///
/// The original behavior was undefined; this is a configuration decision
/// (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverpaymentPolicy {
    /// Reject the payment the same way an underpayment is rejected.
    Reject,
    /// Settle the payment as if the exact price had been offered; no change
    /// is returned.
    Accept,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Overpayment handling policy.
    #[serde(default = "default_overpayment")]
    pub overpayment: OverpaymentPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            overpayment: default_overpayment(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_overpayment() -> OverpaymentPolicy {
    OverpaymentPolicy::Reject
}
