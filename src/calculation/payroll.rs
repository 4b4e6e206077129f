//! Owner payroll simulation and health-rate shock.
//!
//! Builds on the gross-up solver to show what a guaranteed net salary costs
//! the practice owner, before and after the owner's own tax saving.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxSchedule;
use crate::models::{GrossUpRequest, HealthShockResult, PayrollSimulation};
use crate::error::EngineResult;

use super::gross_up::solve_gross_for_net;
use super::owner_tax::owner_tax_saving;
use super::rounding::round_won;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Simulates the owner's cost of guaranteeing `request.target_net_monthly`.
///
/// The owner cash-out (gross plus employer insurance) is deducted, annualized,
/// from `owner_tax_base_annual`, and the resulting tax saving lowers the
/// owner's after-tax monthly cost.
pub fn simulate_payroll(
    request: &GrossUpRequest<'_>,
    schedule: &TaxSchedule,
    owner_tax_base_annual: Decimal,
) -> EngineResult<PayrollSimulation> {
    let solved = solve_gross_for_net(request, schedule)?;
    let preset = request.preset;

    let owner_cash_out_monthly = solved.gross_monthly + solved.employer_insurance_monthly;
    let cash_out_annual = owner_cash_out_monthly * MONTHS_PER_YEAR;
    let owner_effect = owner_tax_saving(
        owner_tax_base_annual,
        cash_out_annual,
        schedule,
        preset.local_tax_factor,
    );

    Ok(PayrollSimulation {
        fiscal_year: preset.fiscal_year,
        gross_monthly: solved.gross_monthly,
        net_monthly: solved.net_monthly,
        owner_cover_monthly: solved.gross_monthly - solved.net_monthly,
        employee_insurance_monthly: solved.employee_insurance_monthly,
        employee_income_tax_monthly: solved.national_income_tax_monthly,
        employee_local_tax_monthly: solved.local_income_tax_monthly,
        employer_insurance_monthly: solved.employer_insurance_monthly,
        owner_cash_out_monthly,
        owner_tax_saving_annual: owner_effect.saving_annual,
        owner_after_tax_cost_monthly: round_won(
            (cash_out_annual - owner_effect.saving_annual) / MONTHS_PER_YEAR,
        ),
    })
}

/// Reruns [`simulate_payroll`] with the health rate raised by
/// `delta_percentage_points` and reports the change.
pub fn simulate_health_rate_shock(
    request: &GrossUpRequest<'_>,
    schedule: &TaxSchedule,
    owner_tax_base_annual: Decimal,
    delta_percentage_points: Decimal,
) -> EngineResult<HealthShockResult> {
    let baseline = simulate_payroll(request, schedule, owner_tax_base_annual)?;

    let shocked_preset = request.preset.with_health_rate_shift(delta_percentage_points);
    shocked_preset.validate()?;
    let shocked_request = GrossUpRequest {
        preset: &shocked_preset,
        ..*request
    };
    let shocked = simulate_payroll(&shocked_request, schedule, owner_tax_base_annual)?;

    let delta_owner_cash_out_monthly =
        shocked.owner_cash_out_monthly - baseline.owner_cash_out_monthly;
    debug!(
        %delta_percentage_points,
        %delta_owner_cash_out_monthly,
        "health-rate shock simulated"
    );

    Ok(HealthShockResult {
        delta_percentage_points,
        delta_owner_cash_out_monthly,
        delta_owner_cash_out_annual: delta_owner_cash_out_monthly * MONTHS_PER_YEAR,
        delta_gross_monthly: shocked.gross_monthly - baseline.gross_monthly,
        baseline,
        shocked,
    })
}
