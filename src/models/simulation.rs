//! Advisory simulation models built on top of the gross-up solver.
//!
//! These capture what a practice owner pays to guarantee a take-home amount,
//! how that payroll reduces the owner's own income tax, and what changes when
//! part of the salary is delivered through the welfare fund instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::IncomeTax;

/// Owner tax before and after deducting an added payroll expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerTaxSaving {
    /// Annual tax on the original taxable base.
    pub before: IncomeTax,
    /// Annual tax on the base reduced by the expense.
    pub after: IncomeTax,
    /// `before.total - after.total`, never negative.
    pub saving_annual: Decimal,
    /// The expense that was deducted.
    pub applied_expense_annual: Decimal,
}

/// Cost of guaranteeing a monthly net salary, seen from both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSimulation {
    /// Fiscal year of the preset used.
    pub fiscal_year: i32,
    /// Solved monthly gross salary.
    pub gross_monthly: Decimal,
    /// Guaranteed monthly take-home.
    pub net_monthly: Decimal,
    /// Part of the gross that covers the employee's insurance and tax.
    pub owner_cover_monthly: Decimal,
    /// Employee-side insurance.
    pub employee_insurance_monthly: Decimal,
    /// Employee national income tax.
    pub employee_income_tax_monthly: Decimal,
    /// Employee local income tax.
    pub employee_local_tax_monthly: Decimal,
    /// Employer-side insurance.
    pub employer_insurance_monthly: Decimal,
    /// Gross plus employer insurance.
    pub owner_cash_out_monthly: Decimal,
    /// Owner's annual tax saving from deducting the cash-out as an expense.
    pub owner_tax_saving_annual: Decimal,
    /// Owner's monthly cost after that tax saving.
    pub owner_after_tax_cost_monthly: Decimal,
}

/// Effect of raising the health-insurance rate on the owner's payroll cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthShockResult {
    /// Increase applied to the health rate, in percentage points.
    pub delta_percentage_points: Decimal,
    /// Simulation at the configured rates.
    pub baseline: PayrollSimulation,
    /// Simulation at the shocked rates.
    pub shocked: PayrollSimulation,
    /// Change in owner cash-out per month.
    pub delta_owner_cash_out_monthly: Decimal,
    /// Change in owner cash-out per year.
    pub delta_owner_cash_out_annual: Decimal,
    /// Change in gross salary per month.
    pub delta_gross_monthly: Decimal,
}

/// One side of a welfare-point comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSide {
    /// Net salary that payroll has to deliver.
    pub net_target_monthly: Decimal,
    /// Gross salary solved for that net.
    pub gross_monthly: Decimal,
    /// Employee-side insurance.
    pub employee_insurance_monthly: Decimal,
    /// Employee income tax including local surcharge.
    pub employee_tax_monthly: Decimal,
    /// Employer-side insurance.
    pub employer_insurance_monthly: Decimal,
    /// Welfare point paid from the fund.
    pub welfare_point_monthly: Decimal,
    /// Everything the employer pays out per month.
    pub outflow_monthly: Decimal,
}

/// Paying part of the take-home as a welfare point versus paying it all as salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelfareComparison {
    /// All take-home paid as salary.
    pub before: ComparisonSide,
    /// Welfare point paid from the fund, the rest as salary.
    pub after: ComparisonSide,
    /// `before.outflow_monthly - after.outflow_monthly`.
    pub outflow_saving_monthly: Decimal,
    /// Monthly saving times twelve.
    pub outflow_saving_annual: Decimal,
}

/// Retirement plan type, which decides whether a lower salary reduces severance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetirementPlan {
    /// Severance follows the final average wage.
    DefinedBenefit,
    /// Contributions are already paid; no severance effect.
    DefinedContribution,
}

/// How the income-tax saving of a salary shift is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FundTaxMode {
    /// Progressive tax on the shifted amount stacked onto the annual base.
    Auto {
        /// Employee's current annual taxable base.
        current_tax_base_annual: Decimal,
    },
    /// Flat marginal rate on the shifted amount.
    Bracket {
        /// Marginal rate to apply.
        rate: Decimal,
    },
}

/// Input to the salary-to-welfare-fund conversion simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseToFundInput {
    /// Current monthly taxable salary.
    pub current_monthly_taxable: Decimal,
    /// Monthly amount moved from salary into the welfare fund.
    pub shift_monthly: Decimal,
    /// Income-tax estimate strategy.
    pub tax_mode: FundTaxMode,
    /// Retirement plan type.
    pub retirement_plan: RetirementPlan,
    /// Whether the shift lowers the average wage used for severance.
    #[serde(default)]
    pub affects_average_wage: bool,
    /// Years remaining until retirement.
    pub years_to_retire: u32,
    /// Years already served.
    #[serde(default)]
    pub years_served: u32,
}

/// Outcome of moving salary into the welfare fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseToFundResult {
    /// Employee insurance no longer paid, per year.
    pub employee_insurance_saving_annual: Decimal,
    /// National income tax no longer paid, per year.
    pub income_tax_saving_annual: Decimal,
    /// Local income tax no longer paid, per year.
    pub local_tax_saving_annual: Decimal,
    /// Sum of the three savings.
    pub employee_total_saving_annual: Decimal,
    /// Annual saving over the years to retirement.
    pub cumulative_saving: Decimal,
    /// Severance lost through a lower average wage.
    pub severance_loss: Decimal,
    /// Cumulative saving minus severance loss.
    pub net_benefit: Decimal,
    /// Years of saving needed to offset the severance loss.
    pub break_even_years: Decimal,
}
