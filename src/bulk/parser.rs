//! CSV parsing for bulk input.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Whitespace
//! around cells is trimmed.
//!
//! | Column                  | Type    | Notes                                     |
//! |-------------------------|---------|-------------------------------------------|
//! | `name`                  | string  |                                           |
//! | `role`                  | string  | `doctor` / `의사`; anything else is staff |
//! | `net_target_monthly`    | decimal | thousands separators allowed              |
//! | `welfare_point_monthly` | decimal | empty means zero                          |
//! | `bracket_rate`          | decimal | empty means the request default           |
//!
//! Amount cells that are empty or cannot be read as a number count as zero.
//!
//! ```csv
//! name,role,net_target_monthly,welfare_point_monthly,bracket_rate
//! Kim,doctor,"10,000,000",500000,0.35
//! Lee,staff,3000000,200000,
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{BulkRow, Role};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    net_target_monthly: String,
    #[serde(default)]
    welfare_point_monthly: String,
    #[serde(default)]
    bracket_rate: String,
}

/// Reads an amount cell, ignoring thousands separators and spaces.
fn parse_amount(cell: &str) -> Option<Decimal> {
    let cleaned: String = cell
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '_'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

impl From<CsvRow> for BulkRow {
    fn from(row: CsvRow) -> Self {
        BulkRow {
            role: Role::parse(&row.role),
            net_target_monthly: parse_amount(&row.net_target_monthly).unwrap_or(Decimal::ZERO),
            welfare_point_monthly: parse_amount(&row.welfare_point_monthly)
                .unwrap_or(Decimal::ZERO),
            bracket_rate: parse_amount(&row.bracket_rate),
            name: row.name,
        }
    }
}

/// Parses CSV text into bulk rows, in file order.
///
/// # Errors
///
/// Returns `InvalidInput` (field `csv`) when the text is not well-formed CSV,
/// naming the 1-based data row that failed.
pub fn parse_bulk_csv(input: &str) -> EngineResult<Vec<BulkRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            result.map(BulkRow::from).map_err(|e| {
                EngineError::invalid_input("csv", format!("row {}: {}", idx + 1, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const BULK_CSV: &str = "\
name,role,net_target_monthly,welfare_point_monthly,bracket_rate
Kim,doctor,\"10,000,000\",500000,0.35
Lee, staff ,3000000,200000,
Park,의사,8000000,,
";

    #[test]
    fn test_rows_parse_in_file_order() {
        let rows = parse_bulk_csv(BULK_CSV).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Kim");
        assert_eq!(rows[1].name, "Lee");
        assert_eq!(rows[2].name, "Park");
    }

    #[test]
    fn test_thousands_separators_are_ignored() {
        let rows = parse_bulk_csv(BULK_CSV).unwrap();

        assert_eq!(rows[0].net_target_monthly, dec("10000000"));
        assert_eq!(rows[0].bracket_rate, Some(dec("0.35")));
    }

    #[test]
    fn test_roles_are_recognised() {
        let rows = parse_bulk_csv(BULK_CSV).unwrap();

        assert_eq!(rows[0].role, Role::Doctor);
        assert_eq!(rows[1].role, Role::Staff);
        assert_eq!(rows[2].role, Role::Doctor);
    }

    #[test]
    fn test_empty_cells_default() {
        let rows = parse_bulk_csv(BULK_CSV).unwrap();

        assert_eq!(rows[2].welfare_point_monthly, Decimal::ZERO);
        assert_eq!(rows[1].bracket_rate, None);
    }

    #[test]
    fn test_unreadable_amount_counts_as_zero() {
        let csv = "name,role,net_target_monthly,welfare_point_monthly,bracket_rate\nChoi,staff,abc,12x,\n";
        let rows = parse_bulk_csv(csv).unwrap();

        assert_eq!(rows[0].net_target_monthly, Decimal::ZERO);
        assert_eq!(rows[0].welfare_point_monthly, Decimal::ZERO);
    }

    #[test]
    fn test_columns_match_by_name() {
        let csv = "net_target_monthly,name,role\n4000000,Jung,doctor\n";
        let rows = parse_bulk_csv(csv).unwrap();

        assert_eq!(rows[0].name, "Jung");
        assert_eq!(rows[0].net_target_monthly, dec("4000000"));
        assert_eq!(rows[0].welfare_point_monthly, Decimal::ZERO);
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let csv = "name,role,net_target_monthly\nKim,doctor\n";

        match parse_bulk_csv(csv) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "csv");
                assert!(message.starts_with("row 1"));
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        let rows = parse_bulk_csv("name,role,net_target_monthly\n").unwrap();

        assert!(rows.is_empty());
    }
}
