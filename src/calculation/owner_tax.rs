//! Owner-side income tax and the saving from deducting payroll expense.

use rust_decimal::Decimal;

use crate::config::TaxSchedule;
use crate::models::{IncomeTax, OwnerTaxSaving};

use super::income_tax::total_tax_with_surcharge;

/// Annual national and local income tax on the owner's taxable base.
///
/// A negative base is taxed as zero.
pub fn owner_tax(
    taxable_annual: Decimal,
    schedule: &TaxSchedule,
    local_tax_factor: Decimal,
) -> IncomeTax {
    total_tax_with_surcharge(taxable_annual.max(Decimal::ZERO), schedule, local_tax_factor)
}

/// Owner tax before and after deducting `added_expense_annual` from the
/// owner's taxable base.
///
/// Negative inputs are treated as zero and the reduced base never drops
/// below zero, so the saving is never negative.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::owner_tax_saving;
/// use netpay_engine::config::{TaxBracket, TaxSchedule};
/// use rust_decimal::Decimal;
///
/// let schedule = TaxSchedule::new(vec![
///     TaxBracket { upper_bound: None, marginal_rate: Decimal::new(20, 2) },
/// ])?;
///
/// let effect = owner_tax_saving(
///     Decimal::from(100_000_000),
///     Decimal::from(10_000_000),
///     &schedule,
///     Decimal::new(10, 2),
/// );
/// assert_eq!(effect.saving_annual, Decimal::from(2_200_000));
/// # Ok::<(), netpay_engine::error::EngineError>(())
/// ```
pub fn owner_tax_saving(
    owner_tax_base_annual: Decimal,
    added_expense_annual: Decimal,
    schedule: &TaxSchedule,
    local_tax_factor: Decimal,
) -> OwnerTaxSaving {
    let base = owner_tax_base_annual.max(Decimal::ZERO);
    let expense = added_expense_annual.max(Decimal::ZERO);

    let before = owner_tax(base, schedule, local_tax_factor);
    let after = owner_tax((base - expense).max(Decimal::ZERO), schedule, local_tax_factor);

    OwnerTaxSaving {
        before,
        after,
        saving_annual: (before.total - after.total).max(Decimal::ZERO),
        applied_expense_annual: expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxBracket;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn schedule() -> TaxSchedule {
        let rows = [
            (Some("14000000"), "0.06"),
            (Some("50000000"), "0.15"),
            (Some("88000000"), "0.24"),
            (Some("150000000"), "0.35"),
            (Some("300000000"), "0.38"),
            (Some("500000000"), "0.40"),
            (Some("1000000000"), "0.42"),
            (None, "0.45"),
        ];
        TaxSchedule::new(
            rows.iter()
                .map(|(upper, rate)| TaxBracket {
                    upper_bound: upper.map(dec),
                    marginal_rate: dec(rate),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_saving_across_the_38_percent_bracket() {
        let effect = owner_tax_saving(dec("200000000"), dec("24000000"), &schedule(), dec("0.10"));

        assert_eq!(effect.before.national, dec("56060000"));
        assert_eq!(effect.before.total, dec("61666000"));
        assert_eq!(effect.after.national, dec("46940000"));
        assert_eq!(effect.after.total, dec("51634000"));
        assert_eq!(effect.saving_annual, dec("10032000"));
        assert_eq!(effect.applied_expense_annual, dec("24000000"));
    }

    #[test]
    fn test_expense_larger_than_base_saves_all_tax() {
        let effect = owner_tax_saving(dec("10000000"), dec("50000000"), &schedule(), dec("0.10"));

        assert_eq!(effect.after, IncomeTax::zero());
        assert_eq!(effect.saving_annual, effect.before.total);
    }

    #[test]
    fn test_negative_inputs_are_treated_as_zero() {
        let effect = owner_tax_saving(dec("-1"), dec("-5"), &schedule(), dec("0.10"));

        assert_eq!(effect.saving_annual, Decimal::ZERO);
        assert_eq!(effect.applied_expense_annual, Decimal::ZERO);
    }

    #[test]
    fn test_owner_tax_of_zero_base_is_zero() {
        assert_eq!(owner_tax(Decimal::ZERO, &schedule(), dec("0.10")), IncomeTax::zero());
    }
}
