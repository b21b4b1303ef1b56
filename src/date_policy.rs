use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

/// Returns true for Saturday and Sunday.
///
/// Kept as a free function because the selection logic needs the weekend
/// test on its own: weekend cells are greyed out by the policy below, yet a
/// click on one must still reach the selection logic (weekends can be
/// selected explicitly or bridge a gap in a range).
pub fn is_weekend(date: NaiveDate) -> bool {
    let weekday = date.weekday();
    weekday == Weekday::Sat || weekday == Weekday::Sun
}

/// Decides which calendar cells reject interaction.
///
/// The policy is pure: it owns the externally supplied disabled set and the
/// min-date configuration, and takes "today" as an argument so callers
/// re-evaluate it against the injected clock on every pass.
#[derive(Debug, Clone, Default)]
pub struct DisabledDatePolicy {
    pub disabled_dates: HashSet<NaiveDate>,
    pub min_date: Option<NaiveDate>,
    pub honor_min_date: bool,
}

impl DisabledDatePolicy {
    pub fn new(disabled_dates: HashSet<NaiveDate>) -> Self {
        Self {
            disabled_dates,
            min_date: None,
            honor_min_date: false,
        }
    }

    /// Lower bound for selectable dates. Historically the picker compared
    /// against today no matter what min date the caller passed; that stays
    /// the default, and `honor_min_date` opts into the configured bound.
    fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        if self.honor_min_date {
            self.min_date.unwrap_or(today)
        } else {
            today
        }
    }

    /// A cell is disabled when it is padding, a weekend, strictly before
    /// the cutoff, or in the disabled set.
    pub fn is_disabled(&self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        let date = match date {
            Some(d) => d,
            None => return true,
        };
        if is_weekend(date) {
            return true;
        }
        if date < self.cutoff(today) {
            return true;
        }
        self.disabled_dates.contains(&date)
    }
}
