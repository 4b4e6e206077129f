//! Bulk gross-up models: one row per employee, aggregated by role.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WelfareComparison;

/// Role used to group bulk results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Physicians.
    Doctor,
    /// Every other employee.
    Staff,
}

impl Role {
    /// Parses a role cell; anything that is not a doctor is staff.
    ///
    /// # Examples
    ///
    /// ```
    /// use netpay_engine::models::Role;
    ///
    /// assert_eq!(Role::parse("doctor"), Role::Doctor);
    /// assert_eq!(Role::parse("의사"), Role::Doctor);
    /// assert_eq!(Role::parse("nurse"), Role::Staff);
    /// ```
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "doctor" | "의사" => Role::Doctor,
            _ => Role::Staff,
        }
    }
}

/// One employee of a bulk input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRow {
    /// Employee name, for display only.
    pub name: String,
    /// Grouping role.
    pub role: Role,
    /// Take-home the employee must receive.
    pub net_target_monthly: Decimal,
    /// Part of the take-home paid as welfare point.
    pub welfare_point_monthly: Decimal,
    /// Row-specific marginal rate for bracket mode.
    pub bracket_rate: Option<Decimal>,
}

/// Comparison result for one bulk row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRowResult {
    /// Employee name.
    pub name: String,
    /// Grouping role.
    pub role: Role,
    /// Welfare-point comparison for this employee.
    pub comparison: WelfareComparison,
}

/// Monthly totals over a group of employees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAggregate {
    /// Number of employees.
    pub headcount: u32,
    /// Employer outflow when everything is paid as salary.
    pub before_outflow_monthly: Decimal,
    /// Employer outflow with welfare points.
    pub after_outflow_monthly: Decimal,
    /// Before minus after.
    pub saving_outflow_monthly: Decimal,
    /// Reduction in employer-side insurance.
    pub employer_insurance_saving_monthly: Decimal,
    /// Reduction in employee insurance and tax.
    pub employee_saving_monthly: Decimal,
    /// Welfare points paid.
    pub welfare_point_monthly: Decimal,
}

impl RoleAggregate {
    /// Adds one employee's comparison to the totals.
    pub fn add(&mut self, comparison: &WelfareComparison) {
        let before = &comparison.before;
        let after = &comparison.after;

        self.headcount += 1;
        self.before_outflow_monthly += before.outflow_monthly;
        self.after_outflow_monthly += after.outflow_monthly;
        self.saving_outflow_monthly += comparison.outflow_saving_monthly;
        self.employer_insurance_saving_monthly +=
            before.employer_insurance_monthly - after.employer_insurance_monthly;
        self.employee_saving_monthly += (before.employee_insurance_monthly
            + before.employee_tax_monthly)
            - (after.employee_insurance_monthly + after.employee_tax_monthly);
        self.welfare_point_monthly += after.welfare_point_monthly;
    }
}

/// Aggregates per role and over everyone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateByRole {
    /// Doctors only.
    pub doctor: RoleAggregate,
    /// Staff only.
    pub staff: RoleAggregate,
    /// Everyone.
    pub total: RoleAggregate,
}

/// Output of a bulk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkResult {
    /// Per-row results in input order.
    pub rows: Vec<BulkRowResult>,
    /// Totals.
    pub aggregate: AggregateByRole,
}
