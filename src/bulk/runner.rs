//! Runs the welfare-point comparison for every bulk row and totals the results.

use tracing::debug;

use crate::calculation::compare_with_welfare_point;
use crate::config::{RatePreset, TaxSchedule};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AggregateByRole, BulkResult, BulkRow, BulkRowResult, GrossUpRequest, Role, TaxMode,
};

/// Runs every row through the welfare-point comparison.
///
/// In bracket mode a row's own `bracket_rate` overrides the rate carried by
/// `tax_mode`. Totals are kept per role and over everyone.
///
/// # Errors
///
/// The first failing row aborts the run; its error is returned with the
/// 1-based row number prefixed to the field name.
pub fn run_bulk(
    rows: &[BulkRow],
    preset: &RatePreset,
    schedule: &TaxSchedule,
    tax_mode: TaxMode,
) -> EngineResult<BulkResult> {
    let mut results = Vec::with_capacity(rows.len());
    let mut aggregate = AggregateByRole::default();

    for (idx, row) in rows.iter().enumerate() {
        let row_mode = match (tax_mode, row.bracket_rate) {
            (TaxMode::Bracket { .. }, Some(rate)) => TaxMode::Bracket {
                flat_marginal_rate: rate,
            },
            (mode, _) => mode,
        };
        let request = GrossUpRequest {
            target_net_monthly: row.net_target_monthly,
            preset,
            tax_mode: row_mode,
        };

        let comparison = compare_with_welfare_point(&request, row.welfare_point_monthly, schedule)
            .map_err(|e| with_row_number(e, idx + 1))?;

        match row.role {
            Role::Doctor => aggregate.doctor.add(&comparison),
            Role::Staff => aggregate.staff.add(&comparison),
        }
        aggregate.total.add(&comparison);

        results.push(BulkRowResult {
            name: row.name.clone(),
            role: row.role,
            comparison,
        });
    }

    debug!(rows = results.len(), "bulk run complete");

    Ok(BulkResult {
        rows: results,
        aggregate,
    })
}

fn with_row_number(error: EngineError, row: usize) -> EngineError {
    match error {
        EngineError::InvalidInput { field, message } => EngineError::InvalidInput {
            field: format!("row {}: {}", row, field),
            message,
        },
        EngineError::CalculationError { message } => EngineError::CalculationError {
            message: format!("row {}: {}", row, message),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxBracket;
    use rust_decimal::Decimal;
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

    fn schedule() -> TaxSchedule {
        TaxSchedule::new(vec![TaxBracket {
            upper_bound: None,
            marginal_rate: dec("0.15"),
        }])
        .unwrap()
    }

    fn row(name: &str, role: Role, net: &str, welfare_point: &str, rate: Option<&str>) -> BulkRow {
        BulkRow {
            name: name.to_string(),
            role,
            net_target_monthly: dec(net),
            welfare_point_monthly: dec(welfare_point),
            bracket_rate: rate.map(dec),
        }
    }

    fn rows() -> Vec<BulkRow> {
        vec![
            row("Kim", Role::Doctor, "10000000", "500000", Some("0.38")),
            row("Lee", Role::Staff, "3000000", "200000", None),
            row("Park", Role::Staff, "2500000", "0", None),
        ]
    }

    #[test]
    fn test_aggregates_split_by_role() {
        let result = run_bulk(&rows(), &preset(), &schedule(), TaxMode::Advanced).unwrap();

        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.aggregate.doctor.headcount, 1);
        assert_eq!(result.aggregate.staff.headcount, 2);
        assert_eq!(result.aggregate.total.headcount, 3);
        assert_eq!(result.aggregate.total.welfare_point_monthly, dec("700000"));
    }

    #[test]
    fn test_total_is_sum_of_roles() {
        let result = run_bulk(&rows(), &preset(), &schedule(), TaxMode::Advanced).unwrap();
        let agg = result.aggregate;

        assert_eq!(
            agg.total.before_outflow_monthly,
            agg.doctor.before_outflow_monthly + agg.staff.before_outflow_monthly
        );
        assert_eq!(
            agg.total.saving_outflow_monthly,
            agg.doctor.saving_outflow_monthly + agg.staff.saving_outflow_monthly
        );
        assert_eq!(
            agg.total.saving_outflow_monthly,
            agg.total.before_outflow_monthly - agg.total.after_outflow_monthly
        );
    }

    #[test]
    fn test_row_bracket_rate_overrides_default_in_bracket_mode() {
        let mode = TaxMode::Bracket {
            flat_marginal_rate: dec("0.15"),
        };
        let bulk = run_bulk(&rows(), &preset(), &schedule(), mode).unwrap();
        let default_only = run_bulk(
            &[row("Kim", Role::Doctor, "10000000", "500000", None)],
            &preset(),
            &schedule(),
            mode,
        )
        .unwrap();

        assert!(
            bulk.rows[0].comparison.before.gross_monthly
                > default_only.rows[0].comparison.before.gross_monthly
        );
    }

    #[test]
    fn test_row_bracket_rate_is_ignored_in_advanced_mode() {
        let with_rate = run_bulk(&rows()[..1], &preset(), &schedule(), TaxMode::Advanced).unwrap();
        let without_rate = run_bulk(
            &[row("Kim", Role::Doctor, "10000000", "500000", None)],
            &preset(),
            &schedule(),
            TaxMode::Advanced,
        )
        .unwrap();

        assert_eq!(with_rate, without_rate);
    }

    #[test]
    fn test_failing_row_is_reported_by_number() {
        let mut input = rows();
        input[1].welfare_point_monthly = dec("9000000");

        match run_bulk(&input, &preset(), &schedule(), TaxMode::Advanced) {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "row 2: welfare_point_monthly")
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_gives_empty_aggregate() {
        let result = run_bulk(&[], &preset(), &schedule(), TaxMode::Advanced).unwrap();

        assert!(result.rows.is_empty());
        assert_eq!(result.aggregate, AggregateByRole::default());
    }
}
