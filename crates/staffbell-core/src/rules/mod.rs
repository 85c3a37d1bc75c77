//! Pure notification rules.
//!
//! Each rule takes an employee and the pass's "today" and returns what should
//! happen. Nothing here reads the clock or touches storage.

pub mod birthday;
pub mod salary;

/// How many days ahead of an event the advance reminder fires.
pub const REMINDER_LEAD_DAYS: i64 = 30;
