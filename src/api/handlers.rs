//! HTTP request handlers for the net-pay engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::bulk::{parse_bulk_csv, run_bulk};
use crate::calculation::{
    compare_with_welfare_point, simulate_health_rate_shock, simulate_payroll,
    simulate_raise_to_fund, solve_gross_for_net,
};
use crate::error::EngineResult;
use crate::models::{GrossUpRequest, RaiseToFundInput};

use super::request::{
    BulkQuery, CompareApiRequest, GrossUpApiRequest, RaiseToFundApiRequest, SimulateApiRequest,
};
use super::response::{ApiError, ApiErrorResponse, CalculationEnvelope, SimulateResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/gross-up", post(gross_up_handler))
        .route("/simulate", post(simulate_handler))
        .route("/compare", post(compare_handler))
        .route("/raise-to-fund", post(raise_to_fund_handler))
        .route("/bulk", post(bulk_handler))
        .with_state(state)
}

/// Handler for POST /gross-up.
///
/// Solves for the gross salary that delivers the requested net pay.
async fn gross_up_handler(
    State(state): State<AppState>,
    payload: Result<Json<GrossUpApiRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing gross-up request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let started = Instant::now();
    let outcome = state.preset(request.fiscal_year).and_then(|(year, preset)| {
        let gross_up = GrossUpRequest {
            target_net_monthly: request.target_net_monthly,
            preset,
            tax_mode: request.tax_mode,
        };
        Ok((year, solve_gross_for_net(&gross_up, state.schedule())?))
    });

    finish(correlation_id, "gross_up", started, outcome)
}

/// Handler for POST /simulate.
///
/// Runs the owner payroll simulation, plus a health-rate shock when
/// `health_shock_pp` is given.
async fn simulate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SimulateApiRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll simulation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let started = Instant::now();
    let outcome = state.preset(request.fiscal_year).and_then(|(year, preset)| {
        let gross_up = GrossUpRequest {
            target_net_monthly: request.target_net_monthly,
            preset,
            tax_mode: request.tax_mode,
        };
        let response = match request.health_shock_pp {
            Some(delta) => {
                let shock = simulate_health_rate_shock(
                    &gross_up,
                    state.schedule(),
                    request.owner_tax_base_annual,
                    delta,
                )?;
                SimulateResponse {
                    payroll: shock.baseline.clone(),
                    health_shock: Some(shock),
                }
            }
            None => SimulateResponse {
                payroll: simulate_payroll(
                    &gross_up,
                    state.schedule(),
                    request.owner_tax_base_annual,
                )?,
                health_shock: None,
            },
        };
        Ok((year, response))
    });

    finish(correlation_id, "simulate", started, outcome)
}

/// Handler for POST /compare.
///
/// Compares paying the target as salary with paying part of it as a
/// welfare point.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompareApiRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing welfare-point comparison request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let started = Instant::now();
    let outcome = state.preset(request.fiscal_year).and_then(|(year, preset)| {
        let gross_up = GrossUpRequest {
            target_net_monthly: request.target_net_monthly,
            preset,
            tax_mode: request.tax_mode,
        };
        let comparison = compare_with_welfare_point(
            &gross_up,
            request.welfare_point_monthly,
            state.schedule(),
        )?;
        Ok((year, comparison))
    });

    finish(correlation_id, "compare", started, outcome)
}

/// Handler for POST /raise-to-fund.
async fn raise_to_fund_handler(
    State(state): State<AppState>,
    payload: Result<Json<RaiseToFundApiRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing raise-to-fund request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let started = Instant::now();
    let fiscal_year = request.fiscal_year;
    let input: RaiseToFundInput = request.into();
    let outcome = state.preset(fiscal_year).and_then(|(year, preset)| {
        Ok((year, simulate_raise_to_fund(&input, preset, state.schedule())?))
    });

    finish(correlation_id, "raise_to_fund", started, outcome)
}

/// Handler for POST /bulk.
///
/// Accepts a CSV body; the tax mode and preset year come from the query
/// string.
async fn bulk_handler(
    State(state): State<AppState>,
    query: Result<Query<BulkQuery>, QueryRejection>,
    body: String,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing bulk request");

    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Query string rejected"
            );
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };

    let started = Instant::now();
    let outcome = parse_bulk_csv(&body).and_then(|rows| {
        let (year, preset) = state.preset(query.fiscal_year)?;
        info!(
            correlation_id = %correlation_id,
            rows = rows.len(),
            fiscal_year = year,
            "Bulk input parsed"
        );
        Ok((year, run_bulk(&rows, preset, state.schedule(), query.tax_mode())?))
    });

    finish(correlation_id, "bulk", started, outcome)
}

/// Wraps a successful result in the envelope, or maps the error.
fn finish<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
    outcome: EngineResult<(i32, T)>,
) -> Response {
    match outcome {
        Ok((fiscal_year, result)) => {
            let duration_us = started.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                operation,
                fiscal_year,
                duration_us,
                "Calculation completed successfully"
            );
            let envelope = CalculationEnvelope {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                fiscal_year,
                duration_us,
                result,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(envelope),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse::bad_request(error)
}
