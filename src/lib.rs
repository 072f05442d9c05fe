//! Payroll engine for small businesses
//!
//! This crate calculates monthly and annual pay for hourly, daily and
//! per-task employees from their work logs: the night-shift premium, the
//! weekly holiday allowance, withholding tax and salary advances. It also
//! classifies upcoming pay days, keeps the work-log ledger rules (month
//! locks, repeat schedules, backups) and builds bank transfer links.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod ledger;
pub mod models;
pub mod transfer;
