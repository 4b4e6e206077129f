//! Bulk gross-up over a whole staff list.
//!
//! A CSV upload is parsed into [`BulkRow`](crate::models::BulkRow)s, each row
//! runs the welfare-point comparison, and the results are totalled per role.

mod parser;
mod runner;

pub use parser::parse_bulk_csv;
pub use runner::run_bulk;
