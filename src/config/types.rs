//! Configuration types for payroll calculations.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: engine metadata, the
//! per-year statutory rate presets and the income-tax schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The largest number of brackets a [`TaxSchedule`] may contain.
pub const MAX_TAX_BRACKETS: usize = 256;

/// Metadata about the configured jurisdiction.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Jurisdiction code (e.g., "KR").
    pub jurisdiction: String,
    /// The human-readable name of the configuration set.
    pub name: String,
    /// The version of the configuration set.
    pub version: String,
    /// Fiscal year used when a request does not name one.
    pub default_fiscal_year: i32,
}

/// Statutory rates for one fiscal year.
///
/// Constructed once from configuration and never mutated. Health and pension
/// amounts are monthly won values; all rates are fractions (0.045 = 4.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePreset {
    /// The fiscal year these rates apply to.
    pub fiscal_year: i32,
    /// Local income-tax surcharge as a multiplier on national tax.
    pub local_tax_factor: Decimal,
    /// Health-insurance rate applied to gross salary.
    pub health_rate: Decimal,
    /// Monthly health-insurance premium floor.
    pub health_min: Decimal,
    /// Monthly health-insurance premium ceiling.
    pub health_max: Decimal,
    /// Long-term-care rate, applied to the health premium.
    pub long_term_care_rate: Decimal,
    /// National pension rate applied to the clamped contribution base.
    pub pension_rate: Decimal,
    /// Lower clamp of the pension contribution base.
    pub pension_min_base: Decimal,
    /// Upper clamp of the pension contribution base.
    pub pension_max_base: Decimal,
    /// Employment-insurance rate paid by the employee.
    pub employment_insurance_employee_rate: Decimal,
    /// Employment-insurance rate paid by the employer.
    pub employment_insurance_employer_rate: Decimal,
}

impl RatePreset {
    /// Checks that every rate is a fraction and that both clamps are ordered.
    pub fn validate(&self) -> EngineResult<()> {
        let rates = [
            ("local_tax_factor", self.local_tax_factor),
            ("health_rate", self.health_rate),
            ("long_term_care_rate", self.long_term_care_rate),
            ("pension_rate", self.pension_rate),
            (
                "employment_insurance_employee_rate",
                self.employment_insurance_employee_rate,
            ),
            (
                "employment_insurance_employer_rate",
                self.employment_insurance_employer_rate,
            ),
        ];

        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::invalid_input(
                    field,
                    format!("rate {} is outside [0, 1]", rate),
                ));
            }
        }

        if self.health_min < Decimal::ZERO || self.health_min > self.health_max {
            return Err(EngineError::invalid_input(
                "health_min",
                format!(
                    "premium floor {} must be between 0 and the ceiling {}",
                    self.health_min, self.health_max
                ),
            ));
        }

        if self.pension_min_base < Decimal::ZERO || self.pension_min_base > self.pension_max_base
        {
            return Err(EngineError::invalid_input(
                "pension_min_base",
                format!(
                    "contribution base floor {} must be between 0 and the ceiling {}",
                    self.pension_min_base, self.pension_max_base
                ),
            ));
        }

        Ok(())
    }

    /// Returns a copy of this preset with the health rate raised by the given
    /// number of percentage points.
    pub fn with_health_rate_shift(&self, delta_percentage_points: Decimal) -> Self {
        let mut shocked = self.clone();
        shocked.health_rate += delta_percentage_points / Decimal::ONE_HUNDRED;
        shocked
    }
}

/// One row of a progressive schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Exclusive annual ceiling of this bracket; `None` for the top bracket.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate applied to income inside this bracket.
    pub marginal_rate: Decimal,
}

/// Income-tax schedule file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxScheduleConfig {
    /// Brackets in ascending order of ceiling.
    pub brackets: Vec<TaxBracket>,
}

/// An ordered, validated sequence of [`TaxBracket`]s.
///
/// Ceilings strictly increase and only the final bracket is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Builds a schedule, rejecting brackets that break the ordering rules.
    ///
    /// # Example
    ///
    /// ```
    /// use netpay_engine::config::{TaxBracket, TaxSchedule};
    /// use rust_decimal::Decimal;
    ///
    /// let schedule = TaxSchedule::new(vec![
    ///     TaxBracket { upper_bound: Some(Decimal::from(14_000_000)), marginal_rate: Decimal::new(6, 2) },
    ///     TaxBracket { upper_bound: None, marginal_rate: Decimal::new(15, 2) },
    /// ])?;
    /// assert_eq!(schedule.brackets().len(), 2);
    /// # Ok::<(), netpay_engine::error::EngineError>(())
    /// ```
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        if brackets.is_empty() {
            return Err(EngineError::InvalidSchedule {
                message: "schedule has no brackets".to_string(),
            });
        }

        if brackets.len() > MAX_TAX_BRACKETS {
            return Err(EngineError::InvalidSchedule {
                message: format!(
                    "schedule has {} brackets, at most {} are allowed",
                    brackets.len(),
                    MAX_TAX_BRACKETS
                ),
            });
        }

        let last = brackets.len() - 1;
        let mut previous_ceiling = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.marginal_rate < Decimal::ZERO || bracket.marginal_rate > Decimal::ONE {
                return Err(EngineError::InvalidSchedule {
                    message: format!(
                        "bracket {} has marginal rate {} outside [0, 1]",
                        index + 1,
                        bracket.marginal_rate
                    ),
                });
            }

            match bracket.upper_bound {
                Some(ceiling) if index == last => {
                    return Err(EngineError::InvalidSchedule {
                        message: format!("top bracket must be unbounded, found ceiling {}", ceiling),
                    });
                }
                Some(ceiling) => {
                    if ceiling <= previous_ceiling {
                        return Err(EngineError::InvalidSchedule {
                            message: format!(
                                "bracket {} ceiling {} does not exceed the previous ceiling {}",
                                index + 1,
                                ceiling,
                                previous_ceiling
                            ),
                        });
                    }
                    previous_ceiling = ceiling;
                }
                None if index != last => {
                    return Err(EngineError::InvalidSchedule {
                        message: format!("only the top bracket may be unbounded (bracket {})", index + 1),
                    });
                }
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl<'de> Deserialize<'de> for TaxSchedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let config = TaxScheduleConfig::deserialize(deserializer)?;
        TaxSchedule::new(config.brackets).map_err(serde::de::Error::custom)
    }
}

/// The complete tax configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a jurisdiction configuration directory.
#[derive(Debug, Clone)]
pub struct TaxConfig {
    /// Engine metadata.
    metadata: EngineMetadata,
    /// The income-tax schedule.
    schedule: TaxSchedule,
    /// Rate presets by fiscal year (sorted oldest first).
    presets: Vec<RatePreset>,
}

impl TaxConfig {
    /// Creates a new TaxConfig from its component parts.
    pub fn new(metadata: EngineMetadata, schedule: TaxSchedule, presets: Vec<RatePreset>) -> Self {
        let mut sorted_presets = presets;
        sorted_presets.sort_by_key(|p| p.fiscal_year);
        Self {
            metadata,
            schedule,
            presets: sorted_presets,
        }
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the income-tax schedule.
    pub fn schedule(&self) -> &TaxSchedule {
        &self.schedule
    }

    /// Returns all rate presets.
    pub fn presets(&self) -> &[RatePreset] {
        &self.presets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(upper_bound: Option<&str>, rate: &str) -> TaxBracket {
        TaxBracket {
            upper_bound: upper_bound.map(dec),
            marginal_rate: dec(rate),
        }
    }

    fn preset_2025() -> RatePreset {
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
    fn test_valid_schedule_is_accepted() {
        let schedule = TaxSchedule::new(vec![
            bracket(Some("14000000"), "0.06"),
            bracket(Some("50000000"), "0.15"),
            bracket(None, "0.24"),
        ]);
        assert!(schedule.is_ok());
        assert_eq!(schedule.unwrap().brackets().len(), 3);
    }

    #[test]
    fn test_empty_schedule_is_rejected() {
        let result = TaxSchedule::new(vec![]);
        assert!(matches!(result, Err(EngineError::InvalidSchedule { .. })));
    }

    #[test]
    fn test_non_increasing_ceilings_are_rejected() {
        let result = TaxSchedule::new(vec![
            bracket(Some("50000000"), "0.06"),
            bracket(Some("50000000"), "0.15"),
            bracket(None, "0.24"),
        ]);
        match result {
            Err(EngineError::InvalidSchedule { message }) => {
                assert!(message.contains("does not exceed"));
            }
            _ => panic!("Expected InvalidSchedule error"),
        }
    }

    #[test]
    fn test_bounded_top_bracket_is_rejected() {
        let result = TaxSchedule::new(vec![
            bracket(Some("14000000"), "0.06"),
            bracket(Some("50000000"), "0.15"),
        ]);
        match result {
            Err(EngineError::InvalidSchedule { message }) => {
                assert!(message.contains("top bracket must be unbounded"));
            }
            _ => panic!("Expected InvalidSchedule error"),
        }
    }

    #[test]
    fn test_unbounded_middle_bracket_is_rejected() {
        let result = TaxSchedule::new(vec![
            bracket(None, "0.06"),
            bracket(None, "0.15"),
        ]);
        assert!(matches!(result, Err(EngineError::InvalidSchedule { .. })));
    }

    #[test]
    fn test_rate_above_one_is_rejected() {
        let result = TaxSchedule::new(vec![bracket(None, "1.5")]);
        assert!(matches!(result, Err(EngineError::InvalidSchedule { .. })));
    }

    #[test]
    fn test_oversized_schedule_is_rejected() {
        let mut brackets: Vec<TaxBracket> = (1..=MAX_TAX_BRACKETS)
            .map(|i| TaxBracket {
                upper_bound: Some(Decimal::from(i as i64 * 1000)),
                marginal_rate: dec("0.1"),
            })
            .collect();
        brackets.push(bracket(None, "0.2"));

        let result = TaxSchedule::new(brackets);
        assert!(matches!(result, Err(EngineError::InvalidSchedule { .. })));
    }

    #[test]
    fn test_schedule_deserializes_null_as_unbounded() {
        let yaml = r#"
brackets:
  - upper_bound: "14000000"
    marginal_rate: "0.06"
  - upper_bound: null
    marginal_rate: "0.15"
"#;
        let schedule: TaxSchedule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schedule.brackets()[0].upper_bound, Some(dec("14000000")));
        assert_eq!(schedule.brackets()[1].upper_bound, None);
    }

    #[test]
    fn test_schedule_deserialization_enforces_invariants() {
        let yaml = r#"
brackets:
  - upper_bound: "14000000"
    marginal_rate: "0.06"
"#;
        let result: Result<TaxSchedule, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_valid_preset_passes_validation() {
        assert!(preset_2025().validate().is_ok());
    }

    #[test]
    fn test_negative_rate_fails_validation() {
        let mut preset = preset_2025();
        preset.pension_rate = dec("-0.045");

        match preset.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "pension_rate"),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_inverted_health_clamp_fails_validation() {
        let mut preset = preset_2025();
        preset.health_min = dec("2000000");

        match preset.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "health_min"),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_inverted_pension_clamp_fails_validation() {
        let mut preset = preset_2025();
        preset.pension_max_base = dec("100000");

        match preset.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "pension_min_base"),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_health_rate_shift_adds_percentage_points() {
        let shocked = preset_2025().with_health_rate_shift(dec("0.1"));
        assert_eq!(shocked.health_rate, dec("0.03645"));
        assert_eq!(shocked.pension_rate, dec("0.045"));
    }

    #[test]
    fn test_tax_config_sorts_presets_by_year() {
        let mut p2026 = preset_2025();
        p2026.fiscal_year = 2026;
        let mut p2024 = preset_2025();
        p2024.fiscal_year = 2024;

        let config = TaxConfig::new(
            EngineMetadata {
                jurisdiction: "KR".to_string(),
                name: "test".to_string(),
                version: "1".to_string(),
                default_fiscal_year: 2025,
            },
            TaxSchedule::new(vec![bracket(None, "0.06")]).unwrap(),
            vec![p2026, preset_2025(), p2024],
        );

        let years: Vec<i32> = config.presets().iter().map(|p| p.fiscal_year).collect();
        assert_eq!(years, vec![2024, 2025, 2026]);
    }
}
