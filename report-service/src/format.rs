//! Finnish number and date rendering for report text.

use time::{Date, Month};

use crate::pipeline::ReportError;

/// Two decimals with a decimal comma: `39.9` → `"39,90"`.
///
/// Values that round to zero render as `"0,00"`, never `"-0,00"`.
pub fn format_amount(value: f64) -> String {
    let mut text = format!("{value:.2}");
    if text.starts_with('-') && text[1..].bytes().all(|b| b == b'0' || b == b'.') {
        text.remove(0);
    }
    text.replace('.', ",")
}

/// `d.m.yyyy` without zero padding: `"5.3.2025"`.
pub fn format_date(date: Date) -> String {
    format!("{}.{}.{}", date.day(), u8::from(date.month()), date.year())
}

/// Like [`format_amount`], `-` when no temperature was recorded.
pub fn format_temperature(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_amount)
}

/// Parse caller input in `d.m.yyyy` form.
pub fn parse_date(input: &str) -> Result<Date, ReportError> {
    let invalid = || ReportError::InvalidRange(format!("'{}' is not a date of the form d.m.yyyy", input.trim()));

    let mut parts = input.trim().split('.');
    let (Some(day), Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let day: u8 = day.trim().parse().map_err(|_| invalid())?;
    let month: u8 = month.trim().parse().map_err(|_| invalid())?;
    let year: i32 = year.trim().parse().map_err(|_| invalid())?;
    let month = Month::try_from(month).map_err(|_| invalid())?;

    Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}
