//! Welfare-point comparison.
//!
//! Paying part of the take-home as a welfare point from the in-house welfare
//! fund takes that part out of payroll, so the salary that has to be grossed
//! up is smaller.

use rust_decimal::Decimal;

use crate::config::TaxSchedule;
use crate::error::{EngineError, EngineResult};
use crate::models::{ComparisonSide, GrossUpRequest, GrossUpResult, WelfareComparison};

use super::gross_up::solve_gross_for_net;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Compares paying the whole target as salary with paying
/// `welfare_point_monthly` of it as a welfare point.
///
/// # Errors
///
/// Returns `InvalidInput` when the welfare point is negative or larger than
/// the target, plus any error of the solver.
pub fn compare_with_welfare_point(
    request: &GrossUpRequest<'_>,
    welfare_point_monthly: Decimal,
    schedule: &TaxSchedule,
) -> EngineResult<WelfareComparison> {
    if welfare_point_monthly < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "welfare_point_monthly",
            format!("welfare point {} must not be negative", welfare_point_monthly),
        ));
    }
    if welfare_point_monthly > request.target_net_monthly {
        return Err(EngineError::invalid_input(
            "welfare_point_monthly",
            format!(
                "welfare point {} exceeds the net target {}",
                welfare_point_monthly, request.target_net_monthly
            ),
        ));
    }

    let before_solved = solve_gross_for_net(request, schedule)?;
    let before = side(&before_solved, request.target_net_monthly, Decimal::ZERO);

    let salary_target = (request.target_net_monthly - welfare_point_monthly).max(Decimal::ZERO);
    let after_request = GrossUpRequest {
        target_net_monthly: salary_target,
        ..*request
    };
    let after_solved = solve_gross_for_net(&after_request, schedule)?;
    let after = side(&after_solved, salary_target, welfare_point_monthly);

    let outflow_saving_monthly = before.outflow_monthly - after.outflow_monthly;

    Ok(WelfareComparison {
        before,
        after,
        outflow_saving_monthly,
        outflow_saving_annual: outflow_saving_monthly * MONTHS_PER_YEAR,
    })
}

fn side(
    solved: &GrossUpResult,
    net_target_monthly: Decimal,
    welfare_point_monthly: Decimal,
) -> ComparisonSide {
    ComparisonSide {
        net_target_monthly,
        gross_monthly: solved.gross_monthly,
        employee_insurance_monthly: solved.employee_insurance_monthly,
        employee_tax_monthly: solved.employee_income_tax_monthly,
        employer_insurance_monthly: solved.employer_insurance_monthly,
        welfare_point_monthly,
        outflow_monthly: solved.gross_monthly
            + solved.employer_insurance_monthly
            + welfare_point_monthly,
    }
}
