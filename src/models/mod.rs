//! Core data models for the net-pay engine.
//!
//! This module contains all the domain value objects used throughout the
//! engine. None of them has a lifecycle beyond a single calculation call.

mod audit;
mod bulk;
mod deductions;
mod gross_up;
mod simulation;

pub use audit::AuditStep;
pub use bulk::{AggregateByRole, BulkResult, BulkRow, BulkRowResult, Role, RoleAggregate};
pub use deductions::{DeductionBreakdown, InsuranceLines};
pub use gross_up::{GrossUpRequest, GrossUpResult, IncomeTax, TaxMode};
pub use simulation::{
    ComparisonSide, FundTaxMode, HealthShockResult, OwnerTaxSaving, PayrollSimulation,
    RaiseToFundInput, RaiseToFundResult, RetirementPlan, WelfareComparison,
};
