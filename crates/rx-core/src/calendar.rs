//! Month grids and date bucketing for the appointment calendar.

use crate::appointment::Appointment;
use crate::validation::parse_date;
use chrono::{Datelike, NaiveDate};

/// Cells of a Sunday-first month grid.
///
/// Leading `None` cells pad the first week up to the weekday of the 1st; the remaining cells are
/// the day numbers in order. Returns `None` for an invalid year/month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<Option<u32>>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days = days_in_month(first)?;
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells = vec![None; leading];
    cells.extend((1..=days).map(Some));
    Some(cells)
}

fn days_in_month(first: NaiveDate) -> Option<u32> {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Appointments on `date`, sorted by time.
pub fn appointments_on(appointments: &[Appointment], date: NaiveDate) -> Vec<&Appointment> {
    let mut matched: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| parse_date(&a.date) == Some(date))
        .collect();
    matched.sort_by(|a, b| a.time.cmp(&b.time));
    matched
}

/// Appointments falling in the given month, sorted by date then time.
pub fn appointments_in_month(
    appointments: &[Appointment],
    year: i32,
    month: u32,
) -> Vec<&Appointment> {
    let mut matched: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| {
            parse_date(&a.date).is_some_and(|d| d.year() == year && d.month() == month)
        })
        .collect();
    matched.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
    matched
}
