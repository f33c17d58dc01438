//! Run calendar: quarters, months, quota and the quarter boss.
//!
//! Three months make a quarter. Month 3 is the boss month: the market event
//! drawn at the start of the quarter is live for that month only, and is
//! visible as a forecast during months 1 and 2.
//!
//! Quota: `round(base × 2^(quarter−1) × m)` with `m` = 1.0, 1.5, 2.0 for
//! months 1, 2, 3.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, EventId};
use crate::core::rng::GameRng;

/// Months per quarter.
pub const MONTHS_PER_QUARTER: u8 = 3;

/// Month in which the quarter boss is active.
pub const BOSS_MONTH: u8 = 3;

/// Quota multiplier for a month of the quarter.
#[must_use]
pub fn month_multiplier(month: u8) -> f64 {
    match month {
        1 => 1.0,
        2 => 1.5,
        _ => 2.0,
    }
}

/// Quota for a calendar position.
///
/// Saturates at `u64::MAX` for absurd quarters instead of overflowing.
#[must_use]
pub fn quota_for(base: u64, quarter: u32, month: u8) -> u64 {
    let exponent = quarter.saturating_sub(1).min(i32::MAX as u32) as i32;
    let raw = base as f64 * 2f64.powi(exponent) * month_multiplier(month);
    // Same half-away-from-zero policy as scoring; the cast saturates.
    raw.round() as u64
}

/// What changed when the calendar advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarAdvance {
    pub quarter: u32,
    pub month: u8,
    pub quota: u64,
    /// Set when a new quarter began; carries its freshly drawn boss.
    pub new_quarter_boss: Option<Option<EventId>>,
}

/// Calendar position plus the current quarter's boss.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    quarter: u32,
    month: u8,
    quota: u64,
    base_quota: u64,
    boss: Option<EventId>,
}

impl Calendar {
    /// Quarter 1, month 1, no boss drawn yet.
    #[must_use]
    pub fn new(base_quota: u64) -> Self {
        Self {
            quarter: 1,
            month: 1,
            quota: quota_for(base_quota, 1, 1),
            base_quota,
            boss: None,
        }
    }

    #[must_use]
    pub fn quarter(&self) -> u32 {
        self.quarter
    }

    #[must_use]
    pub fn month(&self) -> u8 {
        self.month
    }

    #[must_use]
    pub fn quota(&self) -> u64 {
        self.quota
    }

    #[must_use]
    pub fn is_boss_month(&self) -> bool {
        self.month == BOSS_MONTH
    }

    /// This quarter's boss, whether or not it is live yet.
    #[must_use]
    pub fn boss_forecast(&self) -> Option<EventId> {
        self.boss
    }

    /// The event that modifies scoring right now.
    #[must_use]
    pub fn active_event(&self) -> Option<EventId> {
        if self.is_boss_month() {
            self.boss
        } else {
            None
        }
    }

    /// Draw this quarter's boss uniformly from the catalog's events.
    ///
    /// Leaves no boss when the catalog has no events.
    pub fn draw_boss(&mut self, catalog: &CardCatalog, rng: &mut GameRng) -> Option<EventId> {
        let events = catalog.events_sorted();
        self.boss = rng.choose(&events).map(|e| e.id);
        tracing::info!(quarter = self.quarter, boss = ?self.boss, "quarter boss drawn");
        self.boss
    }

    /// Replace the boss (debug override).
    pub fn force_boss(&mut self, event: EventId) {
        tracing::debug!(quarter = self.quarter, boss = %event, "quarter boss forced");
        self.boss = Some(event);
    }

    /// Move to the next month, rolling into a new quarter after month 3.
    pub fn advance(&mut self, catalog: &CardCatalog, rng: &mut GameRng) -> CalendarAdvance {
        self.month += 1;
        let mut new_quarter_boss = None;
        if self.month > MONTHS_PER_QUARTER {
            self.month = 1;
            self.quarter = self.quarter.saturating_add(1);
            new_quarter_boss = Some(self.draw_boss(catalog, rng));
        }
        self.quota = quota_for(self.base_quota, self.quarter, self.month);

        tracing::info!(
            quarter = self.quarter,
            month = self.month,
            quota = self.quota,
            "calendar advanced"
        );
        CalendarAdvance {
            quarter: self.quarter,
            month: self.month,
            quota: self.quota,
            new_quarter_boss,
        }
    }
}
