//! Response types for the payroll engine API.
//!
//! This module defines the response bodies and the mapping from engine
//! errors to HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{PayDayNotices, PayDayStatus};
use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a holiday not found error response.
    pub fn holiday_not_found(date: NaiveDate) -> Self {
        Self::new(
            "HOLIDAY_NOT_FOUND",
            format!("{} is not a public holiday", date),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration parse error", message),
            ),
            EngineError::InvalidEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    "The employee data contains invalid information",
                ),
            ),
            EngineError::InvalidWorkLog { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_WORK_LOG",
                    message,
                    "The work log data contains invalid information",
                ),
            ),
            EngineError::WorkLogNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("WORK_LOG_NOT_FOUND", message),
            ),
            EngineError::WorkLogLocked { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "WORK_LOG_LOCKED",
                    message,
                    "Unlock the month before changing its logs",
                ),
            ),
            EngineError::InvalidSchedule { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_SCHEDULE", message),
            ),
            EngineError::InvalidBackup { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_BACKUP", message),
            ),
            EngineError::UnknownBank { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNKNOWN_BANK",
                    message,
                    "Use a known bank name, e.g. 국민, 토스, 신한",
                ),
            ),
            EngineError::InvalidTransferAmount { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_TRANSFER_AMOUNT", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// An employee's pay-day badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayDay {
    /// The employee's ID.
    pub employee_id: String,
    /// The classification, or `None` when the employee has no valid pay day.
    pub status: Option<PayDayStatus>,
}

/// Response body for `POST /pay-day/notices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayDayNoticesResponse {
    /// Employees due today and tomorrow.
    pub notices: PayDayNotices,
    /// One badge per requested employee, in request order.
    pub statuses: Vec<EmployeePayDay>,
}

/// Response body for `GET /holidays/{date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayResponse {
    /// The holiday date.
    pub date: NaiveDate,
    /// The holiday name.
    pub name: String,
}
