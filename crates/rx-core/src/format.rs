//! Display formatting for dates, times, phone numbers and ready estimates.

use crate::constants::DELIVERY_EXTRA_MINUTES;
use crate::prescription::DeliveryOption;
use crate::validation::{parse_date, parse_time};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

/// Renders a `YYYY-MM-DD` (or RFC 3339) date as `Jan 15, 2024`.
///
/// Unparseable input is returned unchanged.
pub fn format_date(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// Renders a 24-hour `HH:MM` time on a 12-hour clock: `14:00` becomes `2:00 PM`.
///
/// Unparseable input is returned unchanged.
pub fn format_time(time: &str) -> String {
    match parse_time(time) {
        Some(t) => twelve_hour(t.hour(), t.minute()),
        None => time.to_string(),
    }
}

fn twelve_hour(hour: u32, minute: u32) -> String {
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {meridiem}")
}

/// Reformats a phone number with exactly ten digits as `(555) 123-4567`.
///
/// Anything else is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 10 {
        return phone.to_string();
    }
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

/// Age in whole years on `today`, one less if this year's birthday has not happened yet.
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Clock time at which a prescription should be ready, given the pharmacy fill time.
///
/// Delivery orders add [`DELIVERY_EXTRA_MINUTES`] on top of the fill time. Returns `None` when
/// the fill time is too large to land on a representable clock time.
pub fn estimate_ready_time(
    fill_minutes: i64,
    option: DeliveryOption,
    now: NaiveDateTime,
) -> Option<String> {
    let extra = match option {
        DeliveryOption::Delivery => DELIVERY_EXTRA_MINUTES,
        DeliveryOption::Pickup => 0,
    };
    let minutes = fill_minutes.max(0).checked_add(extra)?;
    let ready = now.checked_add_signed(Duration::try_minutes(minutes)?)?;
    Some(twelve_hour(ready.hour(), ready.minute()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        parse_date(date).unwrap().and_time(parse_time(time).unwrap())
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-15"), "Jan 15, 2024");
        assert_eq!(format_date("2024-11-03T09:00:00Z"), "Nov 3, 2024");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("14:00"), "2:00 PM");
        assert_eq!(format_time("00:30"), "12:30 AM");
        assert_eq!(format_time("12:05"), "12:05 PM");
        assert_eq!(format_time("09:15"), "9:15 AM");
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("5551234567"), "(555) 123-4567");
        assert_eq!(format_phone("555.123.4567"), "(555) 123-4567");
        assert_eq!(format_phone("12345"), "12345");
    }

    #[test]
    fn test_calculate_age_respects_birthday() {
        let dob = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        assert_eq!(
            calculate_age(dob, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()),
            33
        );
        assert_eq!(
            calculate_age(dob, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()),
            34
        );
    }

    #[test]
    fn test_estimate_ready_time() {
        let now = at("2024-03-01", "14:45");
        assert_eq!(
            estimate_ready_time(30, DeliveryOption::Pickup, now).as_deref(),
            Some("3:15 PM")
        );
        assert_eq!(
            estimate_ready_time(30, DeliveryOption::Delivery, now).as_deref(),
            Some("4:15 PM")
        );
        assert_eq!(
            estimate_ready_time(45, DeliveryOption::Delivery, at("2024-03-01", "22:30"))
                .as_deref(),
            Some("12:15 AM")
        );
    }

    #[test]
    fn test_estimate_ready_time_out_of_range_is_none() {
        let now = at("2024-03-01", "14:45");
        assert_eq!(
            estimate_ready_time(1_000_000_000_000, DeliveryOption::Pickup, now),
            None
        );
        assert_eq!(
            estimate_ready_time(i64::MAX, DeliveryOption::Delivery, now),
            None
        );
    }
}
