//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_annual_pay_with_policy, calculate_pay_with_policy, classify_pay_day,
    pay_day_notices,
};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, Employee, PayCalculation, PayDetail, PayMonth, PayPeriod,
    WorkLog,
};
use crate::transfer::{TransferLink, build_transfer_link};

use super::request::{
    AnnualPayRequest, MonthlyPayRequest, PayDayNoticesRequest, TransferLinkRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, EmployeePayDay, HolidayResponse, PayDayNoticesResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/pay/monthly", post(monthly_pay_handler))
        .route("/pay/annual", post(annual_pay_handler))
        .route("/pay-day/notices", post(pay_day_notices_handler))
        .route("/transfer/link", post(transfer_link_handler))
        .route("/holidays/:date", get(holiday_handler))
        .with_state(state)
}

/// Unwraps a JSON body, mapping extractor rejections to API errors.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
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
    Err(ApiErrorResponse::bad_request(error))
}

fn validate_employee(employee: &Employee, correlation_id: Uuid) -> Result<(), ApiErrorResponse> {
    employee.validate().map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            employee_id = %employee.id,
            error = %err,
            "Invalid employee"
        );
        err.into()
    })
}

fn validate_work_logs(logs: &[WorkLog], correlation_id: Uuid) -> Result<(), ApiErrorResponse> {
    logs.iter().try_for_each(WorkLog::check_bounds).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid work log");
        err.into()
    })
}

/// Rejects months whose covering weeks fall outside the calendar.
fn ensure_calculable(
    months: &[Option<PayMonth>],
    what: String,
    correlation_id: Uuid,
) -> Result<(), ApiErrorResponse> {
    if months
        .iter()
        .all(|month| month.is_some_and(|m| m.has_full_weeks()))
    {
        return Ok(());
    }
    warn!(correlation_id = %correlation_id, period = %what, "Period out of range");
    Err(ApiErrorResponse::bad_request(ApiError::validation_error(
        format!("{} is out of range", what),
    )))
}

fn pay_calculation(
    employee_id: &str,
    period: PayPeriod,
    detail: PayDetail,
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
    duration_us: u64,
) -> PayCalculation {
    PayCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee_id.to_string(),
        period,
        detail,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    }
}

/// Handler for `POST /pay/monthly`.
async fn monthly_pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyPayRequest>, JsonRejection>,
) -> ApiResult<PayCalculation> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly pay request");

    let request = parse_body(payload, correlation_id)?;
    validate_employee(&request.employee, correlation_id)?;
    validate_work_logs(&request.work_logs, correlation_id)?;
    let month = PayMonth::containing(request.reference_date);
    ensure_calculable(
        &[Some(month)],
        format!("referenceDate {}", request.reference_date),
        correlation_id,
    )?;

    let start_time = Instant::now();
    let result = calculate_pay_with_policy(
        &request.employee,
        &request.work_logs,
        request.reference_date,
        state.config().policy(),
    );
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee.id,
        logs_count = request.work_logs.len(),
        net_pay = %result.detail.net_pay,
        warnings = result.warnings.len(),
        duration_us,
        "Monthly pay calculated"
    );

    Ok(Json(pay_calculation(
        &request.employee.id,
        month.into(),
        result.detail,
        result.audit_steps,
        result.warnings,
        duration_us,
    )))
}

/// Handler for `POST /pay/annual`.
async fn annual_pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnnualPayRequest>, JsonRejection>,
) -> ApiResult<PayCalculation> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing annual pay request");

    let request = parse_body(payload, correlation_id)?;
    validate_employee(&request.employee, correlation_id)?;
    validate_work_logs(&request.work_logs, correlation_id)?;
    ensure_calculable(
        &[PayMonth::new(request.year, 1), PayMonth::new(request.year, 12)],
        format!("year {}", request.year),
        correlation_id,
    )?;

    let start_time = Instant::now();
    let result = calculate_annual_pay_with_policy(
        &request.employee,
        &request.work_logs,
        request.year,
        state.config().policy(),
    );
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee.id,
        year = request.year,
        final_pay = %result.detail.final_pay,
        duration_us,
        "Annual pay calculated"
    );

    Ok(Json(pay_calculation(
        &request.employee.id,
        PayPeriod::Year { year: request.year },
        result.detail,
        result.audit_steps,
        result.warnings,
        duration_us,
    )))
}

/// Handler for `POST /pay-day/notices`.
async fn pay_day_notices_handler(
    payload: Result<Json<PayDayNoticesRequest>, JsonRejection>,
) -> ApiResult<PayDayNoticesResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;

    let notices = pay_day_notices(&request.employees, request.today);
    let statuses = request
        .employees
        .iter()
        .map(|employee| EmployeePayDay {
            employee_id: employee.id.clone(),
            status: employee
                .pay_day()
                .and_then(|pay_day| classify_pay_day(pay_day, request.today)),
        })
        .collect();

    info!(
        correlation_id = %correlation_id,
        employees = request.employees.len(),
        due_today = notices.due_today.len(),
        due_tomorrow = notices.due_tomorrow.len(),
        "Pay-day notices computed"
    );

    Ok(Json(PayDayNoticesResponse { notices, statuses }))
}

/// Handler for `POST /transfer/link`.
async fn transfer_link_handler(
    payload: Result<Json<TransferLinkRequest>, JsonRejection>,
) -> ApiResult<TransferLink> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;

    let link = build_transfer_link(&request.employee, request.amount).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Transfer link rejected");
        ApiErrorResponse::from(err)
    })?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee.id,
        bank_code = %link.bank_code,
        "Transfer link built"
    );
    Ok(Json(link))
}

/// Handler for `GET /holidays/:date`.
async fn holiday_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<HolidayResponse> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        ApiErrorResponse::bad_request(ApiError::validation_error(format!(
            "'{}' is not a YYYY-MM-DD date",
            date
        )))
    })?;

    match state.config().holidays().name_for(date) {
        Some(name) => Ok(Json(HolidayResponse {
            date,
            name: name.to_string(),
        })),
        None => Err(ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError::holiday_not_found(date),
        }),
    }
}
