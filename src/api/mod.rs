//! HTTP API module for the net-pay engine.
//!
//! This module exposes the gross-up solver and the advisory simulations as
//! JSON endpoints over the shared, read-only rate configuration.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BulkMode, BulkQuery, CompareApiRequest, GrossUpApiRequest, RaiseToFundApiRequest,
    SimulateApiRequest,
};
pub use response::{ApiError, ApiErrorResponse, CalculationEnvelope, SimulateResponse};
pub use state::AppState;
