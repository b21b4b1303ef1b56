use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Company public holiday as served by the backend's holiday list.
///
/// These records are what callers feed into the picker's disabled-date set:
/// a holiday that is already a day off must not be selectable as leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicHoliday {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
}

/// Collapses holiday records into the date set the disabled-date policy
/// consumes. Duplicate dates (two holidays on one day) collapse to one.
pub fn holiday_dates(holidays: &[PublicHoliday]) -> HashSet<NaiveDate> {
    holidays.iter().map(|holiday| holiday.date).collect()
}

/// Parses the backend's holiday list payload.
pub fn parse_holiday_list(json: &str) -> Result<Vec<PublicHoliday>, serde_json::Error> {
    let holidays: Vec<PublicHoliday> = serde_json::from_str(json)?;
    debug!("Parsed {} public holiday record(s)", holidays.len());
    Ok(holidays)
}
