//! Progressive income-tax calculation.
//!
//! Tax is accumulated bracket by bracket: each slice of income is taxed at
//! the marginal rate of the bracket it falls into. The local surcharge is
//! applied once, to the finished national amount.

use rust_decimal::Decimal;

use crate::config::TaxSchedule;
use crate::models::IncomeTax;

use super::rounding::round_won;

/// Computes national income tax on an annual taxable amount.
///
/// A negative taxable amount is floored to zero: there is no negative tax.
/// No rounding is applied; callers round where the result is paid.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::compute_tax;
/// use netpay_engine::config::{TaxBracket, TaxSchedule};
/// use rust_decimal::Decimal;
///
/// let schedule = TaxSchedule::new(vec![
///     TaxBracket { upper_bound: Some(Decimal::from(14_000_000)), marginal_rate: Decimal::new(6, 2) },
///     TaxBracket { upper_bound: None, marginal_rate: Decimal::new(15, 2) },
/// ])?;
///
/// // 14,000,000 x 6% + 6,000,000 x 15%
/// assert_eq!(compute_tax(Decimal::from(20_000_000), &schedule), Decimal::from(1_740_000));
/// # Ok::<(), netpay_engine::error::EngineError>(())
/// ```
pub fn compute_tax(annual_taxable: Decimal, schedule: &TaxSchedule) -> Decimal {
    let mut remaining = annual_taxable.max(Decimal::ZERO);
    let mut previous_ceiling = Decimal::ZERO;
    let mut tax = Decimal::ZERO;

    for bracket in schedule.brackets() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let amount_in_bracket = match bracket.upper_bound {
            Some(ceiling) => remaining.min(ceiling - previous_ceiling),
            None => remaining,
        };
        if amount_in_bracket <= Decimal::ZERO {
            break;
        }

        tax += amount_in_bracket * bracket.marginal_rate;
        remaining -= amount_in_bracket;

        if let Some(ceiling) = bracket.upper_bound {
            previous_ceiling = ceiling;
        }
    }

    tax
}

/// Tax attributable to `added_annual` stacked on top of `base_annual`.
///
/// Both amounts are floored to zero.
pub fn incremental_tax(
    base_annual: Decimal,
    added_annual: Decimal,
    schedule: &TaxSchedule,
) -> Decimal {
    let base = base_annual.max(Decimal::ZERO);
    let end = base + added_annual.max(Decimal::ZERO);
    compute_tax(end, schedule) - compute_tax(base, schedule)
}

/// Rounds a national tax amount to the won and adds the local surcharge.
pub fn apply_local_surcharge(national: Decimal, local_tax_factor: Decimal) -> IncomeTax {
    let national = round_won(national);
    let local = round_won(national * local_tax_factor);

    IncomeTax {
        national,
        local,
        total: national + local,
    }
}

/// National plus local tax on an annual taxable amount.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::total_tax_with_surcharge;
/// use netpay_engine::config::{TaxBracket, TaxSchedule};
/// use rust_decimal::Decimal;
///
/// let schedule = TaxSchedule::new(vec![
///     TaxBracket { upper_bound: None, marginal_rate: Decimal::new(6, 2) },
/// ])?;
///
/// let tax = total_tax_with_surcharge(Decimal::from(10_000_000), &schedule, Decimal::new(10, 2));
/// assert_eq!(tax.national, Decimal::from(600_000));
/// assert_eq!(tax.local, Decimal::from(60_000));
/// assert_eq!(tax.total, Decimal::from(660_000));
/// # Ok::<(), netpay_engine::error::EngineError>(())
/// ```
pub fn total_tax_with_surcharge(
    annual_taxable: Decimal,
    schedule: &TaxSchedule,
    local_tax_factor: Decimal,
) -> IncomeTax {
    apply_local_surcharge(compute_tax(annual_taxable, schedule), local_tax_factor)
}

/// Cumulative deduction constants of the shortcut formulation.
///
/// For income `x` inside bracket `i`, `x * rate_i - constants[i]` equals
/// [`compute_tax`]. The constant grows at each ceiling by the rate step
/// times that ceiling.
pub fn deduction_constants(schedule: &TaxSchedule) -> Vec<Decimal> {
    let mut constants = Vec::with_capacity(schedule.brackets().len());
    let mut constant = Decimal::ZERO;
    let mut previous_rate = Decimal::ZERO;
    let mut lower_bound = Decimal::ZERO;

    for bracket in schedule.brackets() {
        constant += (bracket.marginal_rate - previous_rate) * lower_bound;
        constants.push(constant);

        previous_rate = bracket.marginal_rate;
        if let Some(ceiling) = bracket.upper_bound {
            lower_bound = ceiling;
        }
    }

    constants
}

/// National tax via a single bracket lookup: `rate * x - constant`.
pub fn compute_tax_by_deduction(annual_taxable: Decimal, schedule: &TaxSchedule) -> Decimal {
    let x = annual_taxable.max(Decimal::ZERO);
    let constants = deduction_constants(schedule);

    let index = schedule
        .brackets()
        .iter()
        .position(|b| b.upper_bound.is_none_or(|ceiling| x < ceiling))
        .unwrap_or(constants.len() - 1);

    x * schedule.brackets()[index].marginal_rate - constants[index]
}
