//! Salary-to-welfare-fund conversion.
//!
//! Moving part of a taxable salary into the welfare fund saves the employee
//! insurance and income tax on that part. Under a defined-benefit plan whose
//! average wage drops with the salary, it also costs severance.

use rust_decimal::Decimal;

use crate::config::{RatePreset, TaxSchedule};
use crate::error::{EngineError, EngineResult};
use crate::models::{FundTaxMode, RaiseToFundInput, RaiseToFundResult, RetirementPlan};

use super::deductions::compute_deductions;
use super::income_tax::incremental_tax;
use super::rounding::round_won;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Simulates moving `input.shift_monthly` of taxable salary into the
/// welfare fund until retirement.
///
/// - Employee insurance saving: the annualized difference between insurance
///   on the current salary and on the reduced salary.
/// - Income-tax saving: in `Auto` mode the progressive tax on the shifted
///   annual amount stacked onto the current annual base; in `Bracket` mode
///   the flat rate on the shifted annual amount. The local surcharge is added
///   on top.
/// - Severance loss: only for a defined-benefit plan whose average wage is
///   affected, one month of the shift per year of total service.
///
/// `break_even_years` is the severance loss divided by the annual saving,
/// rounded to two decimal places rather than left as the raw ratio, or zero
/// when nothing is saved.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative salary or shift, a bracket rate
/// outside `[0, 1]`, or amounts and service years whose products overflow.
pub fn simulate_raise_to_fund(
    input: &RaiseToFundInput,
    preset: &RatePreset,
    schedule: &TaxSchedule,
) -> EngineResult<RaiseToFundResult> {
    if input.current_monthly_taxable < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "current_monthly_taxable",
            "salary must not be negative",
        ));
    }
    if input.shift_monthly < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "shift_monthly",
            "shifted amount must not be negative",
        ));
    }

    let current = round_won(input.current_monthly_taxable);
    let shift = round_won(input.shift_monthly);
    let shift_annual = shift
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| too_large("shift_monthly"))?;

    let current_insurance = compute_deductions(current, preset)?;
    let reduced_insurance = compute_deductions((current - shift).max(Decimal::ZERO), preset)?;
    let employee_insurance_saving_annual = (current_insurance.employee.total
        - reduced_insurance.employee.total)
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| too_large("current_monthly_taxable"))?;

    let income_tax_saving_annual = match input.tax_mode {
        FundTaxMode::Auto {
            current_tax_base_annual,
        } => {
            current_tax_base_annual
                .max(Decimal::ZERO)
                .checked_add(shift_annual)
                .ok_or_else(|| too_large("current_tax_base_annual"))?;
            round_won(incremental_tax(current_tax_base_annual, shift_annual, schedule))
        }
        FundTaxMode::Bracket { rate } => {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::invalid_input(
                    "rate",
                    format!("rate {} is outside [0, 1]", rate),
                ));
            }
            round_won(shift_annual * rate)
        }
    };
    let local_tax_saving_annual = round_won(income_tax_saving_annual * preset.local_tax_factor);

    let employee_total_saving_annual = employee_insurance_saving_annual
        .checked_add(income_tax_saving_annual)
        .and_then(|sum| sum.checked_add(local_tax_saving_annual))
        .ok_or_else(|| too_large("shift_monthly"))?;
    let cumulative_saving = employee_total_saving_annual
        .checked_mul(Decimal::from(input.years_to_retire))
        .ok_or_else(|| too_large("years_to_retire"))?;

    let severance_loss = match input.retirement_plan {
        RetirementPlan::DefinedBenefit if input.affects_average_wage => {
            let total_service =
                Decimal::from(input.years_served) + Decimal::from(input.years_to_retire);
            round_won(
                shift
                    .checked_mul(total_service)
                    .ok_or_else(|| too_large("years_to_retire"))?,
            )
        }
        _ => Decimal::ZERO,
    };
    let net_benefit = cumulative_saving
        .checked_sub(severance_loss)
        .ok_or_else(|| too_large("years_to_retire"))?;

    let break_even_years = if employee_total_saving_annual > Decimal::ZERO {
        (severance_loss / employee_total_saving_annual).round_dp(2)
    } else {
        Decimal::ZERO
    };

    Ok(RaiseToFundResult {
        employee_insurance_saving_annual,
        income_tax_saving_annual,
        local_tax_saving_annual,
        employee_total_saving_annual,
        cumulative_saving,
        severance_loss,
        net_benefit,
        break_even_years,
    })
}

fn too_large(field: &str) -> EngineError {
    EngineError::invalid_input(field, "amount is too large to simulate")
}
