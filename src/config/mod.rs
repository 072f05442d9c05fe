//! Configuration loading and management for the payroll engine.
//!
//! This module loads the pay policy (night multiplier, weekly holiday
//! allowance thresholds, tax truncation) and the public holiday calendar
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kr").unwrap();
//! println!("Night multiplier: {}", config.policy().night_shift_multiplier);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HolidayCalendar, HolidayYear, PayPolicy, PublicHoliday, WeeklyAllowancePolicy};
