//! Calculation logic for the net-pay engine.
//!
//! This module contains the statutory insurance and progressive income-tax
//! calculators, the gross-up solver built on them, and the advisory
//! simulations layered over the solver: owner payroll cost, health-rate
//! shock, welfare-point comparison and salary-to-fund conversion.

mod deductions;
mod gross_up;
mod income_tax;
mod owner_tax;
mod payroll;
mod raise_to_fund;
mod rounding;
mod welfare;

pub use deductions::compute_deductions;
pub use gross_up::{
    BISECTION_STEPS, MAX_BOUND_EXPANSIONS, MAX_TARGET_NET_MONTHLY, monthly_income_tax, net_of,
    solve_gross_for_net,
};
pub use income_tax::{
    apply_local_surcharge, compute_tax, compute_tax_by_deduction, deduction_constants,
    incremental_tax, total_tax_with_surcharge,
};
pub use owner_tax::{owner_tax, owner_tax_saving};
pub use payroll::{simulate_health_rate_shock, simulate_payroll};
pub use raise_to_fund::simulate_raise_to_fund;
pub use rounding::{clamp, floor_to_ten, round_won};
pub use welfare::compare_with_welfare_point;
