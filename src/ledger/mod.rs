//! In-memory work-log ledger operations.
//!
//! Month locking, editing and deleting logs, repeat schedules, and backup
//! documents. These functions work on plain collections; persistence is the
//! caller's concern.

mod backup;
mod edit;
mod lock;
mod schedule;

pub use backup::{Backup, DEFAULT_BUSINESS_ID};
pub use edit::{DeleteScope, delete_logs, update_log};
pub use lock::{ensure_editable, is_month_locked, lock_month, unlock_month};
pub use schedule::{MAX_SCHEDULE_MONTHS, RepeatOutcome, RepeatSchedule};
