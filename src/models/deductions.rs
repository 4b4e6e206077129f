//! Statutory insurance breakdown models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One side's (employee or employer) monthly statutory insurance lines.
///
/// # Example
///
/// ```
/// use netpay_engine::models::InsuranceLines;
/// use rust_decimal::Decimal;
///
/// let lines = InsuranceLines::new(
///     Decimal::from(354_500),
///     Decimal::from(45_900),
///     Decimal::from(277_650),
///     Decimal::from(90_000),
/// );
/// assert_eq!(lines.total, Decimal::from(768_050));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceLines {
    /// National health insurance premium.
    pub health: Decimal,
    /// Long-term-care insurance premium.
    pub long_term_care: Decimal,
    /// National pension contribution.
    pub pension: Decimal,
    /// Employment insurance premium.
    pub employment_insurance: Decimal,
    /// Sum of the four lines.
    pub total: Decimal,
}

impl InsuranceLines {
    /// Builds the lines and their total.
    pub fn new(
        health: Decimal,
        long_term_care: Decimal,
        pension: Decimal,
        employment_insurance: Decimal,
    ) -> Self {
        Self {
            health,
            long_term_care,
            pension,
            employment_insurance,
            total: health + long_term_care + pension + employment_insurance,
        }
    }

    /// All-zero lines.
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    }
}

/// Employee- and employer-side statutory insurance for one gross salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Withheld from the employee's gross salary.
    pub employee: InsuranceLines,
    /// Paid by the employer on top of the gross salary.
    pub employer: InsuranceLines,
}

impl DeductionBreakdown {
    /// Breakdown with nothing charged to either side.
    pub fn zero() -> Self {
        Self {
            employee: InsuranceLines::zero(),
            employer: InsuranceLines::zero(),
        }
    }
}
