use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calendar_grid::{build_month_grid, MonthCursor, MonthDirection};
use crate::clock::Clock;
use crate::date_policy::{is_weekend, DisabledDatePolicy};

// --- Selection records ---

/// How much of a day a selected date covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftType {
    #[default]
    FullDay,
    FirstHalf,
}

impl ShiftType {
    /// Day-count weight of one entry: a first half counts as half a day.
    pub fn day_weight(self) -> Decimal {
        match self {
            ShiftType::FullDay => dec!(1),
            ShiftType::FirstHalf => dec!(0.5),
        }
    }
}

/// One chosen date together with its shift type. The emitted snapshot is a
/// date-ascending sequence of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedDate {
    pub date: NaiveDate,
    pub shift_type: ShiftType,
}

// --- Rejections ---

/// Why a toggle was refused. Rejected input, not a failure: the selection
/// is left untouched and the message is fit to show the user directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionRejection {
    #[error("Please select consecutive dates (weekends can be skipped)")]
    NonConsecutive,
    #[error("You can only select up to {max_days} days")]
    MaxDaysExceeded { max_days: u32 },
}

// --- Configuration ---

/// Options accepted at engine construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    /// Seeds the selection; sorted and de-duplicated by date on entry.
    pub initial_selection: Vec<SelectedDate>,
    /// Dates always forbidden (consumed holidays etc.), on top of the
    /// weekend and past-date rules.
    pub disabled_dates: HashSet<NaiveDate>,
    /// Comp-off pickers hold at most one date; selecting replaces it.
    pub comp_off: bool,
    /// Range-mode cap on the number of selected entries.
    pub max_days: Option<u32>,
    /// Earliest selectable date. Only consulted when `honor_min_date` is
    /// set; the historical behavior compares against today regardless.
    pub min_date: Option<NaiveDate>,
    pub honor_min_date: bool,
    /// Shift type applied to newly selected dates.
    pub shift_type: ShiftType,
}

// --- Engine ---

type ChangeListener = Box<dyn Fn(&[SelectedDate])>;

/// Owns one picker session's selection and month cursor, and enforces the
/// consecutive-range rules before committing any change.
///
/// Every committed change is handed to the registered listener as a
/// date-ascending snapshot, synchronously, before the mutating call
/// returns. Rejected toggles leave the selection untouched and do not
/// notify.
pub struct DateSelectionEngine {
    selection: Vec<SelectedDate>,
    cursor: MonthCursor,
    shift_type: ShiftType,
    policy: DisabledDatePolicy,
    comp_off: bool,
    max_days: Option<u32>,
    clock: Arc<dyn Clock>,
    on_change: Option<ChangeListener>,
}

impl DateSelectionEngine {
    pub fn new(config: PickerConfig, clock: Arc<dyn Clock>) -> Self {
        let mut selection = config.initial_selection;
        selection.sort_by_key(|entry| entry.date);
        selection.dedup_by_key(|entry| entry.date);
        if !selection.is_empty() {
            info!("Seeding selection with {} date(s)", selection.len());
        }

        let policy = DisabledDatePolicy {
            disabled_dates: config.disabled_dates,
            min_date: config.min_date,
            honor_min_date: config.honor_min_date,
        };
        let cursor = MonthCursor::for_date(clock.now_date());

        Self {
            selection,
            cursor,
            shift_type: config.shift_type,
            policy,
            comp_off: config.comp_off,
            max_days: config.max_days,
            clock,
            on_change: None,
        }
    }

    /// Registers the snapshot listener. At most one; a second call replaces
    /// the first.
    pub fn on_change(mut self, listener: impl Fn(&[SelectedDate]) + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    // --- Render queries ---

    pub fn selection(&self) -> &[SelectedDate] {
        &self.selection
    }

    pub fn month_cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selection.iter().any(|entry| entry.date == date)
    }

    /// Policy check against the injected clock; `None` is a padding cell.
    pub fn is_disabled(&self, date: Option<NaiveDate>) -> bool {
        self.policy.is_disabled(date, self.clock.now_date())
    }

    /// Cell sequence for the currently displayed month.
    pub fn month_grid(&self) -> Vec<Option<NaiveDate>> {
        build_month_grid(self.cursor)
    }

    /// True when `date` lies between the earliest and latest selected dates
    /// inclusive. Needs at least two selections to form a range.
    pub fn is_in_range(&self, date: NaiveDate) -> bool {
        if self.selection.len() < 2 {
            return false;
        }
        match (self.selection.first(), self.selection.last()) {
            (Some(first), Some(last)) => first.date <= date && date <= last.date,
            _ => false,
        }
    }

    /// True when `date` is the earliest or latest selected date.
    pub fn is_range_endpoint(&self, date: NaiveDate) -> bool {
        match (self.selection.first(), self.selection.last()) {
            (Some(first), Some(last)) => date == first.date || date == last.date,
            _ => false,
        }
    }

    /// Day total of the current selection, counting half days as 0.5.
    pub fn total_days(&self) -> Decimal {
        self.selection
            .iter()
            .map(|entry| entry.shift_type.day_weight())
            .sum()
    }

    // --- Mutations ---

    /// Selects or deselects `candidate`, enforcing the range rules.
    ///
    /// Disabled cells are ignored with one carve-out: weekends are greyed
    /// out by the policy yet still clickable, because a weekend may be
    /// selected explicitly or bridge a gap in a range. A rejected toggle
    /// returns the reason and leaves the selection exactly as it was.
    pub fn toggle_date(
        &mut self,
        candidate: NaiveDate,
    ) -> Result<Vec<SelectedDate>, SelectionRejection> {
        if self.is_disabled(Some(candidate)) && !is_weekend(candidate) {
            debug!("Ignoring click on disabled date {}", candidate);
            return Ok(self.selection.clone());
        }

        if self.comp_off {
            if self.is_selected(candidate) {
                debug!("Comp-off toggle cleared selection (was {})", candidate);
                self.selection.clear();
            } else {
                debug!("Comp-off toggle replaced selection with {}", candidate);
                self.selection = vec![SelectedDate {
                    date: candidate,
                    shift_type: self.shift_type,
                }];
            }
            self.emit();
            return Ok(self.selection.clone());
        }

        if self.is_selected(candidate) {
            self.selection.retain(|entry| entry.date != candidate);
            debug!("Deselected {} ({} remaining)", candidate, self.selection.len());
            self.emit();
            return Ok(self.selection.clone());
        }

        if !self.selection.is_empty() {
            let mut dates: Vec<NaiveDate> =
                self.selection.iter().map(|entry| entry.date).collect();
            dates.push(candidate);
            dates.sort();
            for pair in dates.windows(2) {
                let gap = (pair[1] - pair[0]).num_days();
                // A gap is only allowed when it is at most 3 days and the
                // day right after the earlier date is a weekend day. Only
                // that single day is inspected, so a Thursday-to-Monday
                // jump is refused even though just a weekend separates the
                // workdays.
                if gap > 3 || (gap > 1 && !is_weekend(pair[0] + Duration::days(1))) {
                    warn!(
                        "Rejecting {}: gap of {} day(s) after {} breaks the range",
                        candidate, gap, pair[0]
                    );
                    return Err(SelectionRejection::NonConsecutive);
                }
            }
        }

        if let Some(max_days) = self.max_days {
            if self.selection.len() as u32 >= max_days {
                warn!(
                    "Rejecting {}: selection already holds the maximum of {} day(s)",
                    candidate, max_days
                );
                return Err(SelectionRejection::MaxDaysExceeded { max_days });
            }
        }

        self.selection.push(SelectedDate {
            date: candidate,
            shift_type: self.shift_type,
        });
        self.selection.sort_by_key(|entry| entry.date);
        debug!("Selected {} ({} total)", candidate, self.selection.len());
        self.emit();
        Ok(self.selection.clone())
    }

    /// Removes the entry matching `target` by date. Never re-validates the
    /// remainder: a removal in the middle of a range legally leaves a
    /// non-consecutive rest. Removing an absent date is a no-op.
    pub fn remove_date(&mut self, target: NaiveDate) -> Vec<SelectedDate> {
        let before = self.selection.len();
        self.selection.retain(|entry| entry.date != target);
        if self.selection.len() != before {
            debug!("Removed {} ({} remaining)", target, self.selection.len());
            self.emit();
        }
        self.selection.clone()
    }

    /// Sets the shift type for future selections and rewrites every
    /// already-selected entry to the new type.
    pub fn set_shift_type(&mut self, new_type: ShiftType) -> Vec<SelectedDate> {
        self.shift_type = new_type;
        for entry in &mut self.selection {
            entry.shift_type = new_type;
        }
        debug!(
            "Shift type set to {:?} across {} entries",
            new_type,
            self.selection.len()
        );
        self.emit();
        self.selection.clone()
    }

    /// Moves the displayed month one step; the selection is untouched.
    pub fn navigate_month(&mut self, direction: MonthDirection) -> MonthCursor {
        self.cursor = self.cursor.advance(direction);
        debug!(
            "Month cursor moved to {}-{:02}",
            self.cursor.year, self.cursor.month
        );
        self.cursor
    }

    fn emit(&self) {
        if let Some(listener) = &self.on_change {
            listener(&self.selection);
        }
    }
}
