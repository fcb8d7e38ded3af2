use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::models::Task;

const GRID_DAYS: i64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub tasks: Vec<&'a Task>,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn previous_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

/// First of the month `offset` months away from the month containing `date`.
/// Stays on `date`'s month when the shift would leave chrono's date range.
pub fn shift_month(date: NaiveDate, offset: i32) -> NaiveDate {
    let first = first_of_month(date);
    let months = Months::new(offset.unsigned_abs());
    let shifted = if offset < 0 {
        first.checked_sub_months(months)
    } else {
        first.checked_add_months(months)
    };
    shifted.unwrap_or(first)
}

/// Tasks whose due date falls on `day` (UTC calendar date).
pub fn tasks_on(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.due_date.date_naive() == day)
        .collect()
}

/// Six weeks of days covering the month containing `month`, starting on the
/// Sunday on or before the 1st. The grid is cut short at the edges of chrono's
/// date range.
pub fn month_grid<'a>(tasks: &'a [Task], month: NaiveDate, today: NaiveDate) -> Vec<CalendarDay<'a>> {
    let first = first_of_month(month);
    let lead = first.weekday().num_days_from_sunday() as i64;
    let start = first.checked_sub_signed(Duration::days(lead)).unwrap_or(first);

    (0..GRID_DAYS)
        .filter_map(|offset| start.checked_add_signed(Duration::days(offset)))
        .map(|date| CalendarDay {
            date,
            in_month: date.month() == first.month() && date.year() == first.year(),
            is_today: date == today,
            tasks: tasks_on(tasks, date),
        })
        .collect()
}
