//! Net-pay gross-up engine for Korean payroll.
//!
//! This crate estimates the gross monthly salary an employer must pay so that
//! an employee takes home a given net amount after statutory social insurance
//! and progressive income tax, together with the employer-side cost of that
//! payroll and a set of advisory simulations built on the solver.

#![warn(missing_docs)]

pub mod api;
pub mod bulk;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
