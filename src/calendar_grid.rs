use chrono::{Datelike, Days, NaiveDate};

/// Which way a month navigation arrow points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDirection {
    Previous,
    Next,
}

/// The (year, month) pair a picker is currently displaying.
///
/// Navigation moves exactly one month per step and wraps year boundaries.
/// The cursor is display state only; it never touches the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32, // 1-12
}

impl MonthCursor {
    pub fn of(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month), "month out of range: {}", month);
        Self { year, month }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("Invalid year/month in cursor")
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn advance(self, direction: MonthDirection) -> Self {
        match direction {
            MonthDirection::Previous => self.prev(),
            MonthDirection::Next => self.next(),
        }
    }

    pub fn days_in_month(&self) -> u32 {
        let first_day = self.first_day();
        let first_day_next_month = self.next().first_day();
        first_day_next_month
            .signed_duration_since(first_day)
            .num_days() as u32
    }
}

/// Flat cell sequence for rendering the cursor's month: one leading `None`
/// per weekday slot before day 1 (column 0 is Sunday), then every day of
/// the month in order. No trailing padding; renderers chunk this by 7.
pub fn build_month_grid(cursor: MonthCursor) -> Vec<Option<NaiveDate>> {
    let first_day = cursor.first_day();
    let leading = first_day.weekday().num_days_from_sunday() as usize;
    let day_count = cursor.days_in_month() as usize;

    let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
    cells.extend((0..day_count).map(|i| first_day.checked_add_days(Days::new(i as u64))));
    cells
}
