//! Consecutive leave-date selection and validation for the HR frontend.
//!
//! The engine owns one picker session's selected dates and month cursor,
//! validates every toggle against the consecutive-range rules, and hands
//! committed snapshots to the caller synchronously. Calendar grid assembly,
//! the disabled-date policy, the injected clock, public-holiday records,
//! and the accountant's expense grouping live alongside it.

mod calendar_grid;
mod clock;
mod date_policy;
mod date_selection;
mod expense_report;
mod public_holiday;

pub use calendar_grid::*;
pub use clock::*;
pub use date_policy::*;
pub use date_policy::*;
pub use date_selection::*;
pub use expense_report::*;
pub use public_holiday::*;
