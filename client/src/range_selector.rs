//! Date-range selection state machine for the booking dialog.
//!
//! Accumulates calendar clicks into a validated inclusive range:
//! two clicks pick start and end, a same-date double click within
//! 300 ms selects a single day, and blocked dates can neither be
//! clicked nor spanned. The double-click detection is explicit state
//! (last click date plus timestamp), not a timer callback.

use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::availability::AvailabilityIndex;

/// Two clicks on the same date within this window count as a
/// double click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// An inclusive date range that is ordered by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Returns None if the range is reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive day count; at least 1.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Current selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Empty,
    StartSet(NaiveDate),
    Range(DateRange),
}

/// What a click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Selection now has a start date (fresh or restarted)
    Started(NaiveDate),
    /// Selection is a complete range
    Completed(DateRange),
    /// Click ignored: the date itself is blocked
    RejectedBlocked,
    /// Click ignored: the range would span a blocked date
    RejectedSpansBlocked,
}

#[derive(Debug)]
pub struct RangeSelector {
    selection: Selection,
    /// Explicit double-click state: date and instant of the last
    /// accepted click
    last_click: Option<(NaiveDate, Instant)>,
}

impl RangeSelector {
    pub fn new() -> Self {
        Self {
            selection: Selection::Empty,
            last_click: None,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The completed range, if the selection is one.
    pub fn range(&self) -> Option<DateRange> {
        match self.selection {
            Selection::Range(range) => Some(range),
            _ => None,
        }
    }

    /// Handle a calendar cell click at the current wall-clock instant.
    pub fn click(&mut self, date: NaiveDate, blocked: &AvailabilityIndex) -> ClickOutcome {
        self.click_at(date, Instant::now(), blocked)
    }

    /// Handle a click with an explicit timestamp (the UI loop passes
    /// `Instant::now()`; tests pass synthetic instants).
    pub fn click_at(
        &mut self,
        date: NaiveDate,
        at: Instant,
        blocked: &AvailabilityIndex,
    ) -> ClickOutcome {
        if blocked.is_blocked(date) {
            // No transition, and a blocked click does not arm the
            // double-click state either.
            return ClickOutcome::RejectedBlocked;
        }

        let is_double_click = matches!(
            self.last_click,
            Some((last_date, last_at))
                if last_date == date && at.duration_since(last_at) <= DOUBLE_CLICK_WINDOW
        );
        self.last_click = Some((date, at));

        // Same-date double click: single-day range, overriding the
        // normal accumulation. From a completed range this only applies
        // when the fast second click lands on the end date the range
        // was just completed with; the range collapses to that day.
        let single_day_shortcut = is_double_click
            && match self.selection {
                Selection::Range(range) => range.end() == date,
                _ => true,
            };
        if single_day_shortcut {
            self.selection = Selection::Range(DateRange::single(date));
            return ClickOutcome::Completed(DateRange::single(date));
        }

        match self.selection {
            Selection::Empty => {
                self.selection = Selection::StartSet(date);
                ClickOutcome::Started(date)
            }
            Selection::StartSet(start) => {
                if date < start {
                    // Earlier click restarts with the new, earlier start
                    self.selection = Selection::StartSet(date);
                    ClickOutcome::Started(date)
                } else if blocked.blocks_range(start, date) {
                    // End click rejected; start stays armed
                    ClickOutcome::RejectedSpansBlocked
                } else {
                    let range = DateRange { start, end: date };
                    self.selection = Selection::Range(range);
                    ClickOutcome::Completed(range)
                }
            }
            Selection::Range(_) => {
                // Any further click starts over
                self.selection = Selection::StartSet(date);
                ClickOutcome::Started(date)
            }
        }
    }

    /// External reset (dialog closed, teacher switched): discard
    /// everything unconditionally.
    pub fn reset(&mut self) {
        self.selection = Selection::Empty;
        self.last_click = None;
    }
}

impl Default for RangeSelector {
    fn default() -> Self {
        Self::new()
    }
}
