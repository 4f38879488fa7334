//! String libraries.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use regex::Regex;

/// The date format used by the developer `birthdate` field.
pub const DATE_FORMAT: &'static str = "%d/%m/%Y";

/// To check if the E-mail address is valid.
pub fn is_email(email: &str) -> bool {
    let email_regex = Regex::new(
        r"^([a-z0-9_+]([a-z0-9_+.]*[a-z0-9_+])?)@([a-z0-9]+([\-\.]{1}[a-z0-9]+)*\.[a-z]{2,6})$",
    )
    .unwrap();

    email_regex.is_match(email)
}

/// To parse a `DD/MM/YYYY` date string as the UTC midnight of that day.
pub fn parse_date_str(date: &str) -> Result<DateTime<Utc>, &'static str> {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Err(_) => Err("invalid date format"),
        Ok(date) => Ok(date.and_time(NaiveTime::MIN).and_utc()),
    }
}

/// To convert time to the `DD/MM/YYYY` date string.
pub fn date_str(time: &DateTime<Utc>) -> String {
    time.format(DATE_FORMAT).to_string()
}

/// Completed years between the specified time and now. [`None`] if the time is in the future.
pub fn age(time: &DateTime<Utc>) -> Option<u32> {
    Utc::now().date_naive().years_since(time.date_naive())
}

/// To convert time to ISO8601 format with milliseconds precision (`YYYY-MM-DDThh:mm:ss.SSSZ`).
pub fn time_str(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
