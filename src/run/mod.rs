//! Run state: the economy that persists across rounds.
//!
//! - `RunState`: cash, heat, owned deck, advisors, calendar
//! - `Calendar`: quarter/month progression, quota, quarter boss

pub mod calendar;
pub mod state;

pub use calendar::{month_multiplier, quota_for, Calendar, CalendarAdvance, BOSS_MONTH, MONTHS_PER_QUARTER};
pub use state::{HeatStatus, LaunderOutcome, RunSnapshot, RunState};
