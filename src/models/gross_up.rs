//! Gross-up request and result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RatePreset;

use super::{AuditStep, DeductionBreakdown};

/// How monthly income tax is derived from a candidate gross salary.
///
/// # Example
///
/// ```
/// use netpay_engine::models::TaxMode;
///
/// let mode: TaxMode = serde_json::from_str(r#"{"mode":"advanced"}"#).unwrap();
/// assert_eq!(mode, TaxMode::Advanced);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TaxMode {
    /// Full progressive-bracket computation on the annualized gross.
    #[default]
    Advanced,
    /// Flat marginal-rate approximation on the monthly gross.
    Bracket {
        /// Rate applied to the whole monthly gross.
        flat_marginal_rate: Decimal,
    },
}

/// Input to the gross-up solver.
#[derive(Debug, Clone, Copy)]
pub struct GrossUpRequest<'a> {
    /// Take-home amount the employee must receive each month.
    pub target_net_monthly: Decimal,
    /// Statutory rates for the fiscal year.
    pub preset: &'a RatePreset,
    /// Income-tax strategy.
    pub tax_mode: TaxMode,
}

/// Monthly income tax split into its national and local parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTax {
    /// National income tax.
    pub national: Decimal,
    /// Local income-tax surcharge.
    pub local: Decimal,
    /// National plus local.
    pub total: Decimal,
}

impl IncomeTax {
    /// No tax due.
    pub fn zero() -> Self {
        Self {
            national: Decimal::ZERO,
            local: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// The solved gross salary and every component recomputed at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossUpResult {
    /// Monthly gross salary.
    pub gross_monthly: Decimal,
    /// Employee-side insurance total.
    pub employee_insurance_monthly: Decimal,
    /// Employee income tax including the local surcharge.
    pub employee_income_tax_monthly: Decimal,
    /// National portion of the employee income tax.
    pub national_income_tax_monthly: Decimal,
    /// Local surcharge portion of the employee income tax.
    pub local_income_tax_monthly: Decimal,
    /// Employer-side insurance total.
    pub employer_insurance_monthly: Decimal,
    /// Net pay recomputed from `gross_monthly`.
    pub net_monthly: Decimal,
    /// Full insurance breakdown for both sides.
    pub deductions: DeductionBreakdown,
    /// Bisection steps performed.
    pub iterations: u32,
    /// Steps recorded while solving.
    pub audit_steps: Vec<AuditStep>,
}
