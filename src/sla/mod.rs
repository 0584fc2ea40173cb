//! SLA business-hours arithmetic
//!
//! Deadlines are measured in business minutes on a [`WorkWeek`] calendar:
//! working days (inclusive, possibly wrapping), working hours, holidays and a
//! fixed local offset.

mod calendar;
mod deadline;

pub use calendar::WorkWeek;
pub use deadline::{
    MAX_BUSINESS_MINUTES, Priority, SUPPORTED_YEARS, SlaEvaluation, SlaPolicy, SlaStatus,
};
