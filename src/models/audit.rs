//! Audit trail entries recorded by the gross-up solver.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_round_trips_through_json() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "search_bounds".to_string(),
            rule_name: "Search Bounds".to_string(),
            input: serde_json::json!({ "target_net_monthly": "3000000" }),
            output: serde_json::json!({ "hi": "9000000" }),
            reasoning: "hi = max(3 x target, 1000000)".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"rule_id\":\"search_bounds\""));

        let back: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }
}
