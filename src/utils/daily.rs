// src/utils/daily.rs

use chrono::{Datelike, NaiveDate, Utc};

/// Today's calendar date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Picks the item of the day: `day_of_year mod len`.
///
/// `day_of_year` counts from "January 0", so January 1st is day 1.
/// Returns `None` for an empty list.
pub fn select_for_today<T>(items: &[T], today: NaiveDate) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let day_of_year = today.ordinal() as usize;
    items.get(day_of_year % items.len())
}
