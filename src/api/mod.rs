//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for monthly and annual pay,
//! pay-day notices, transfer links and holiday lookup.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AnnualPayRequest, MonthlyPayRequest, PayDayNoticesRequest, TransferLinkRequest};
pub use response::{
    ApiError, ApiErrorResponse, EmployeePayDay, HolidayResponse, PayDayNoticesResponse,
};
pub use state::AppState;
