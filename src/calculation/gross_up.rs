//! Gross-up solver.
//!
//! Finds the smallest whole-won monthly gross salary whose take-home pay,
//! after employee insurance and income tax, reaches a target net amount.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{RatePreset, TaxSchedule};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, DeductionBreakdown, GrossUpRequest, GrossUpResult, IncomeTax, TaxMode};

use super::deductions::compute_deductions;
use super::income_tax::{apply_local_surcharge, compute_tax};
use super::rounding::round_won;

/// Number of bisection steps the solver always performs.
///
/// Each step halves the search interval, so any interval narrower than
/// 2^60 won (about 1.15e18) collapses to two adjacent whole-won candidates.
/// The initial interval is at most a few multiples of the target, which puts
/// every realistic salary far inside that bound.
pub const BISECTION_STEPS: u32 = 60;

/// How many times the upper bound may double before the target is
/// declared unreachable.
pub const MAX_BOUND_EXPANSIONS: u32 = 32;

/// Smallest upper bound the search starts from.
const MIN_UPPER_BOUND: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Largest monthly net target accepted, 10^15 won.
///
/// Keeps every doubled upper bound, and its annualized amount, well inside
/// the range of `Decimal`.
pub const MAX_TARGET_NET_MONTHLY: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Monthly employee income tax (national plus local) for a gross salary.
///
/// - `Advanced`: the progressive schedule on the annualized gross, divided
///   back to a month and rounded to the won.
/// - `Bracket`: the flat marginal rate on the monthly gross, rounded.
///
/// In both modes the local surcharge is applied once to the rounded
/// national amount.
///
/// # Errors
///
/// Returns `InvalidInput` when the flat marginal rate is outside `[0, 1]`,
/// and `CalculationError` when the annualized gross overflows.
pub fn monthly_income_tax(
    gross_monthly: Decimal,
    preset: &RatePreset,
    schedule: &TaxSchedule,
    tax_mode: TaxMode,
) -> EngineResult<IncomeTax> {
    let national = match tax_mode {
        TaxMode::Advanced => {
            let annual = gross_monthly.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
                EngineError::CalculationError {
                    message: format!("annualized gross of {} overflows", gross_monthly),
                }
            })?;
            compute_tax(annual, schedule) / MONTHS_PER_YEAR
        }
        TaxMode::Bracket { flat_marginal_rate } => {
            validate_flat_rate(flat_marginal_rate)?;
            gross_monthly * flat_marginal_rate
        }
    };

    Ok(apply_local_surcharge(national, preset.local_tax_factor))
}

/// Take-home pay for a gross salary: gross minus employee insurance minus
/// income tax.
pub fn net_of(
    gross_monthly: Decimal,
    preset: &RatePreset,
    schedule: &TaxSchedule,
    tax_mode: TaxMode,
) -> EngineResult<Decimal> {
    Ok(evaluate(gross_monthly, preset, schedule, tax_mode)?.net)
}

/// Every component derived from one candidate gross salary.
struct Evaluation {
    deductions: DeductionBreakdown,
    tax: IncomeTax,
    net: Decimal,
}

fn evaluate(
    gross_monthly: Decimal,
    preset: &RatePreset,
    schedule: &TaxSchedule,
    tax_mode: TaxMode,
) -> EngineResult<Evaluation> {
    let deductions = compute_deductions(gross_monthly, preset)?;
    let tax = monthly_income_tax(gross_monthly, preset, schedule, tax_mode)?;
    let net = gross_monthly - deductions.employee.total - tax.total;

    Ok(Evaluation {
        deductions,
        tax,
        net,
    })
}

fn validate_flat_rate(rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::invalid_input(
            "flat_marginal_rate",
            format!("rate {} is outside [0, 1]", rate),
        ));
    }
    Ok(())
}

/// Solves for the monthly gross salary that delivers the requested net pay.
///
/// The target is rounded to the whole won. The search runs exactly
/// [`BISECTION_STEPS`] halvings over whole-won candidates, keeping
/// `net(lo) < target <= net(hi)`, and returns `hi`. Insurance lines are
/// multiples of ten won and income tax is rounded to the won, all
/// non-decreasing in gross, so net pay rises by at most one won per won of
/// gross. Once `lo` and `hi` are adjacent, `net(hi)` therefore equals the
/// target exactly, while one won less falls short of it.
///
/// A target at or below the net of a zero salary returns a gross of zero.
///
/// # Errors
///
/// - `InvalidInput` for a negative target, a target above
///   [`MAX_TARGET_NET_MONTHLY`] or a flat marginal rate outside `[0, 1]`.
/// - `CalculationError` when no gross within [`MAX_BOUND_EXPANSIONS`]
///   doublings of the initial bound reaches the target, or the target is
///   too large to resolve to the won.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::solve_gross_for_net;
/// use netpay_engine::config::ConfigLoader;
/// use netpay_engine::models::{GrossUpRequest, TaxMode};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/kr")?;
/// let (_, preset) = loader.preset_for_year(2025)?;
///
/// let request = GrossUpRequest {
///     target_net_monthly: Decimal::from(3_000_000),
///     preset,
///     tax_mode: TaxMode::Advanced,
/// };
/// let result = solve_gross_for_net(&request, loader.schedule())?;
///
/// assert_eq!(result.net_monthly, Decimal::from(3_000_000));
/// assert!(result.gross_monthly > result.net_monthly);
/// # Ok::<(), netpay_engine::error::EngineError>(())
/// ```
pub fn solve_gross_for_net(
    request: &GrossUpRequest<'_>,
    schedule: &TaxSchedule,
) -> EngineResult<GrossUpResult> {
    let preset = request.preset;
    let mode = request.tax_mode;

    if request.target_net_monthly < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "target_net_monthly",
            format!("target {} must not be negative", request.target_net_monthly),
        ));
    }
    if request.target_net_monthly > MAX_TARGET_NET_MONTHLY {
        return Err(EngineError::invalid_input(
            "target_net_monthly",
            format!(
                "target {} exceeds the maximum of {}",
                request.target_net_monthly, MAX_TARGET_NET_MONTHLY
            ),
        ));
    }
    if let TaxMode::Bracket { flat_marginal_rate } = mode {
        validate_flat_rate(flat_marginal_rate)?;
    }

    let target = round_won(request.target_net_monthly);
    let mut audit_steps = Vec::new();

    let at_zero = evaluate(Decimal::ZERO, preset, schedule, mode)?;
    if at_zero.net >= target {
        debug!(%target, "target reached by a zero salary");
        audit_steps.push(AuditStep {
            step_number: 1,
            rule_id: "zero_salary".to_string(),
            rule_name: "Zero Salary".to_string(),
            input: serde_json::json!({ "target_net_monthly": target.to_string() }),
            output: serde_json::json!({ "gross_monthly": "0" }),
            reasoning: format!("Net pay of a zero salary ({}) already meets the target", at_zero.net),
        });
        return Ok(build_result(Decimal::ZERO, at_zero, 0, audit_steps));
    }

    let mut lo = Decimal::ZERO;
    let mut hi = (target * Decimal::from(3)).max(MIN_UPPER_BOUND);
    let initial_hi = hi;
    let mut expansions = 0;

    while evaluate(hi, preset, schedule, mode)?.net < target {
        if expansions == MAX_BOUND_EXPANSIONS {
            return Err(EngineError::CalculationError {
                message: format!(
                    "target net pay {} is unreachable: net at gross {} is still below it",
                    target, hi
                ),
            });
        }
        lo = hi;
        hi = hi.checked_mul(Decimal::TWO).ok_or_else(|| EngineError::CalculationError {
            message: format!("upper bound overflowed while searching for net pay {}", target),
        })?;
        expansions += 1;
        debug!(%hi, expansions, "expanded gross-up upper bound");
    }

    audit_steps.push(AuditStep {
        step_number: 1,
        rule_id: "search_bounds".to_string(),
        rule_name: "Search Bounds".to_string(),
        input: serde_json::json!({
            "target_net_monthly": target.to_string(),
            "initial_upper_bound": initial_hi.to_string(),
        }),
        output: serde_json::json!({
            "lo": lo.to_string(),
            "hi": hi.to_string(),
            "expansions": expansions,
        }),
        reasoning: format!(
            "hi = max(3 x {}, {}), doubled {} time(s) until net(hi) reaches the target",
            target, MIN_UPPER_BOUND, expansions
        ),
    });

    for _ in 0..BISECTION_STEPS {
        let mid = ((lo + hi) / Decimal::TWO).floor();
        if evaluate(mid, preset, schedule, mode)?.net >= target {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    if hi - lo > Decimal::ONE {
        return Err(EngineError::CalculationError {
            message: format!(
                "target net pay {} is too large to resolve to the won in {} steps",
                target, BISECTION_STEPS
            ),
        });
    }

    debug!(%target, gross = %hi, "gross-up converged");

    let final_eval = evaluate(hi, preset, schedule, mode)?;
    audit_steps.push(AuditStep {
        step_number: 2,
        rule_id: "bisection".to_string(),
        rule_name: "Bisection".to_string(),
        input: serde_json::json!({ "steps": BISECTION_STEPS }),
        output: serde_json::json!({
            "lo": lo.to_string(),
            "hi": hi.to_string(),
        }),
        reasoning: format!(
            "net({}) is below the target and net({}) meets it",
            lo, hi
        ),
    });
    audit_steps.push(AuditStep {
        step_number: 3,
        rule_id: "final_components".to_string(),
        rule_name: "Final Components".to_string(),
        input: serde_json::json!({ "gross_monthly": hi.to_string() }),
        output: serde_json::json!({
            "employee_insurance_monthly": final_eval.deductions.employee.total.to_string(),
            "income_tax_monthly": final_eval.tax.total.to_string(),
            "net_monthly": final_eval.net.to_string(),
        }),
        reasoning: format!(
            "{} - {} insurance - {} tax = {}",
            hi, final_eval.deductions.employee.total, final_eval.tax.total, final_eval.net
        ),
    });

    Ok(build_result(hi, final_eval, BISECTION_STEPS, audit_steps))
}

fn build_result(
    gross_monthly: Decimal,
    evaluation: Evaluation,
    iterations: u32,
    audit_steps: Vec<AuditStep>,
) -> GrossUpResult {
    let Evaluation {
        deductions,
        tax,
        net,
    } = evaluation;

    GrossUpResult {
        gross_monthly,
        employee_insurance_monthly: deductions.employee.total,
        employee_income_tax_monthly: tax.total,
        national_income_tax_monthly: tax.national,
        local_income_tax_monthly: tax.local,
        employer_insurance_monthly: deductions.employer.total,
        net_monthly: net,
        deductions,
        iterations,
        audit_steps,
    }
}
