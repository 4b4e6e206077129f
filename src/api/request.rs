//! Request types for the net-pay engine API.
//!
//! Every JSON body may name a `fiscal_year`; when it is omitted the
//! configured default year is used.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FundTaxMode, RaiseToFundInput, RetirementPlan, TaxMode};

/// Request body for the `/gross-up` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossUpApiRequest {
    /// Fiscal year of the rate preset.
    #[serde(default)]
    pub fiscal_year: Option<i32>,
    /// Take-home the employee must receive each month.
    pub target_net_monthly: Decimal,
    /// Income-tax strategy; advanced when omitted.
    #[serde(default)]
    pub tax_mode: TaxMode,
}

/// Request body for the `/simulate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateApiRequest {
    /// Fiscal year of the rate preset.
    #[serde(default)]
    pub fiscal_year: Option<i32>,
    /// Take-home the employee must receive each month.
    pub target_net_monthly: Decimal,
    /// Income-tax strategy; advanced when omitted.
    #[serde(default)]
    pub tax_mode: TaxMode,
    /// The owner's own annual taxable base, before the payroll expense.
    #[serde(default)]
    pub owner_tax_base_annual: Decimal,
    /// Health-rate increase to simulate, in percentage points.
    #[serde(default)]
    pub health_shock_pp: Option<Decimal>,
}

/// Request body for the `/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareApiRequest {
    /// Fiscal year of the rate preset.
    #[serde(default)]
    pub fiscal_year: Option<i32>,
    /// Take-home the employee must receive each month.
    pub target_net_monthly: Decimal,
    /// Part of the take-home paid as a welfare point.
    pub welfare_point_monthly: Decimal,
    /// Income-tax strategy; advanced when omitted.
    #[serde(default)]
    pub tax_mode: TaxMode,
}

/// Request body for the `/raise-to-fund` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaiseToFundApiRequest {
    /// Fiscal year of the rate preset.
    #[serde(default)]
    pub fiscal_year: Option<i32>,
    /// Current monthly taxable salary.
    pub current_monthly_taxable: Decimal,
    /// Monthly amount moved into the welfare fund.
    pub shift_monthly: Decimal,
    /// Income-tax saving strategy.
    pub tax_mode: FundTaxMode,
    /// Retirement plan type.
    pub retirement_plan: RetirementPlan,
    /// Whether the shift lowers the severance average wage.
    #[serde(default)]
    pub affects_average_wage: bool,
    /// Years remaining until retirement.
    pub years_to_retire: u32,
    /// Years already served.
    #[serde(default)]
    pub years_served: u32,
}

impl From<RaiseToFundApiRequest> for RaiseToFundInput {
    fn from(req: RaiseToFundApiRequest) -> Self {
        RaiseToFundInput {
            current_monthly_taxable: req.current_monthly_taxable,
            shift_monthly: req.shift_monthly,
            tax_mode: req.tax_mode,
            retirement_plan: req.retirement_plan,
            affects_average_wage: req.affects_average_wage,
            years_to_retire: req.years_to_retire,
            years_served: req.years_served,
        }
    }
}

/// Tax mode selector for bulk runs, given as a query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkMode {
    /// Progressive schedule for every row.
    #[default]
    Advanced,
    /// Flat marginal rate, per row or the default.
    Bracket,
}

fn default_bracket_rate() -> Decimal {
    Decimal::new(35, 2)
}

/// Query parameters of the `/bulk` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkQuery {
    /// Fiscal year of the rate preset.
    #[serde(default)]
    pub fiscal_year: Option<i32>,
    /// Tax mode for all rows.
    #[serde(default)]
    pub mode: BulkMode,
    /// Rate for rows without their own `bracket_rate`.
    #[serde(default = "default_bracket_rate")]
    pub default_bracket_rate: Decimal,
}

impl BulkQuery {
    /// The tax mode rows start from.
    pub fn tax_mode(&self) -> TaxMode {
        match self.mode {
            BulkMode::Advanced => TaxMode::Advanced,
            BulkMode::Bracket => TaxMode::Bracket {
                flat_marginal_rate: self.default_bracket_rate,
            },
        }
    }
}
