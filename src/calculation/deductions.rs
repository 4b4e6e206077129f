//! Statutory insurance deduction calculation.
//!
//! This module computes the four statutory social-insurance lines (health,
//! long-term care, national pension and employment insurance) charged on a
//! monthly gross salary, for both the employee and the employer.

use rust_decimal::Decimal;

use crate::config::RatePreset;
use crate::error::{EngineError, EngineResult};
use crate::models::{DeductionBreakdown, InsuranceLines};

use super::rounding::{clamp, floor_to_ten};

/// Computes employee- and employer-side statutory insurance for a monthly
/// gross salary.
///
/// Each line is truncated to the 10-won unit:
/// - health: `gross * health_rate`, clamped to `[health_min, health_max]`,
///   charged in full to both sides (not split between them);
/// - long-term care: the health premium times `long_term_care_rate`;
/// - pension: `pension_rate` on the gross clamped to the contribution base
///   limits, identical for both sides;
/// - employment insurance: the only asymmetric line, with separate
///   employee and employer rates.
///
/// A gross of exactly zero means nobody is on payroll, so the premium and
/// contribution-base floors are not applied and every line is zero.
///
/// # Errors
///
/// Returns `InvalidInput` when `gross_monthly` is negative.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::compute_deductions;
/// use netpay_engine::config::RatePreset;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// let preset = RatePreset {
///     fiscal_year: 2025,
///     local_tax_factor: d("0.10"),
///     health_rate: d("0.03545"),
///     health_min: d("9890"),
///     health_max: d("1288940"),
///     long_term_care_rate: d("0.1295"),
///     pension_rate: d("0.045"),
///     pension_min_base: d("390000"),
///     pension_max_base: d("6170000"),
///     employment_insurance_employee_rate: d("0.009"),
///     employment_insurance_employer_rate: d("0.0115"),
/// };
///
/// let breakdown = compute_deductions(d("10000000"), &preset)?;
/// assert_eq!(breakdown.employee.health, d("354500"));
/// assert_eq!(breakdown.employee.pension, d("277650"));
/// assert_eq!(breakdown.employee.employment_insurance, d("90000"));
/// # Ok::<(), netpay_engine::error::EngineError>(())
/// ```
pub fn compute_deductions(
    gross_monthly: Decimal,
    preset: &RatePreset,
) -> EngineResult<DeductionBreakdown> {
    if gross_monthly < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "gross_monthly",
            format!("gross salary {} must not be negative", gross_monthly),
        ));
    }

    if gross_monthly.is_zero() {
        return Ok(DeductionBreakdown::zero());
    }

    let health = clamp(
        floor_to_ten(gross_monthly * preset.health_rate),
        preset.health_min,
        preset.health_max,
    );
    let long_term_care = floor_to_ten(health * preset.long_term_care_rate);

    let pension_base = clamp(
        gross_monthly,
        preset.pension_min_base,
        preset.pension_max_base,
    );
    let pension = floor_to_ten(pension_base * preset.pension_rate);

    let employment_employee =
        floor_to_ten(gross_monthly * preset.employment_insurance_employee_rate);
    let employment_employer =
        floor_to_ten(gross_monthly * preset.employment_insurance_employer_rate);

    Ok(DeductionBreakdown {
        employee: InsuranceLines::new(health, long_term_care, pension, employment_employee),
        employer: InsuranceLines::new(health, long_term_care, pension, employment_employer),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn preset() -> RatePreset {
        RatePreset {
            fiscal_year: 2025,
            local_tax_factor: dec("0.10"),
            health_rate: dec("0.03545"),
            health_min: dec("9890"),
            health_max: dec("1288940"),
            long_term_care_rate: dec("0.1295"),
            pension_rate: dec("0.045"),
            pension_min_base: dec("390000"),
            pension_max_base: dec("6170000"),
            employment_insurance_employee_rate: dec("0.009"),
            employment_insurance_employer_rate: dec("0.0115"),
        }
    }

    #[test]
    fn test_ten_million_gross_matches_statutory_lines() {
        let result = compute_deductions(dec("10000000"), &preset()).unwrap();

        assert_eq!(result.employee.health, dec("354500"));
        assert_eq!(result.employee.long_term_care, dec("45900"));
        assert_eq!(result.employee.pension, dec("277650"));
        assert_eq!(result.employee.employment_insurance, dec("90000"));
        assert_eq!(result.employee.total, dec("768050"));
    }

    #[test]
    fn test_employer_pays_same_health_and_pension() {
        let result = compute_deductions(dec("4000000"), &preset()).unwrap();

        assert_eq!(result.employer.health, result.employee.health);
        assert_eq!(result.employer.long_term_care, result.employee.long_term_care);
        assert_eq!(result.employer.pension, result.employee.pension);
    }

    #[test]
    fn test_employment_insurance_is_asymmetric() {
        let result = compute_deductions(dec("4000000"), &preset()).unwrap();

        assert_eq!(result.employee.employment_insurance, dec("36000"));
        assert_eq!(result.employer.employment_insurance, dec("46000"));
        assert_eq!(
            result.employer.total - result.employee.total,
            dec("10000")
        );
    }

    #[test]
    fn test_health_premium_floor_applies_to_small_gross() {
        let result = compute_deductions(dec("100000"), &preset()).unwrap();

        assert_eq!(result.employee.health, dec("9890"));
    }

    #[test]
    fn test_health_premium_ceiling_applies_to_large_gross() {
        let result = compute_deductions(dec("100000000"), &preset()).unwrap();

        assert_eq!(result.employee.health, dec("1288940"));
        assert_eq!(result.employee.long_term_care, dec("166910"));
    }

    #[test]
    fn test_health_premium_scales_between_clamps() {
        let low = compute_deductions(dec("2000000"), &preset()).unwrap();
        let high = compute_deductions(dec("4000000"), &preset()).unwrap();

        assert_eq!(low.employee.health, dec("70900"));
        assert_eq!(high.employee.health, dec("141800"));
    }

    #[test]
    fn test_pension_base_is_clamped_below() {
        let result = compute_deductions(dec("200000"), &preset()).unwrap();

        // 390,000 x 4.5% = 17,550
        assert_eq!(result.employee.pension, dec("17550"));
    }

    #[test]
    fn test_zero_gross_bypasses_floors() {
        let result = compute_deductions(Decimal::ZERO, &preset()).unwrap();

        assert_eq!(result, DeductionBreakdown::zero());
    }

    #[test]
    fn test_negative_gross_is_rejected() {
        let result = compute_deductions(dec("-1"), &preset());

        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "gross_monthly"),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    proptest! {
        #[test]
        fn prop_employee_total_is_non_decreasing(a in 1i64..1_000_000_000, b in 1i64..1_000_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let preset = preset();
            let low = compute_deductions(Decimal::from(lo), &preset).unwrap();
            let high = compute_deductions(Decimal::from(hi), &preset).unwrap();

            prop_assert!(low.employee.total <= high.employee.total);
            prop_assert!(low.employer.total <= high.employer.total);
        }

        #[test]
        fn prop_health_stays_within_clamps(gross in 1i64..10_000_000_000) {
            let preset = preset();
            let result = compute_deductions(Decimal::from(gross), &preset).unwrap();

            prop_assert!(result.employee.health >= preset.health_min);
            prop_assert!(result.employee.health <= preset.health_max);
        }
    }
}
