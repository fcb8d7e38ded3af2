//! Pure projections of a task collection. Nothing here caches: every call
//! recomputes from the slice it is given, and time-dependent views take
//! `now` explicitly.

pub mod calendar;
pub mod filter;
pub mod group;
pub mod sort;
pub mod stats;

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::models::{Task, UnknownVariant};

pub use calendar::{
    CalendarDay, month_grid, next_month, previous_month, shift_month, tasks_on,
};
pub use filter::{DueFilter, TaskFilter, filter_tasks};
pub use group::{GroupBy, TaskGroup, group_tasks};
pub use sort::{SortKey, sort_tasks};
pub use stats::{TaskStats, compute_stats};

/// Filter, sort and group in one pass, the way a list view consumes them.
pub fn task_view(
    tasks: &[Task],
    filter: &TaskFilter,
    sort: SortKey,
    group_by: GroupBy,
    now: DateTime<Utc>,
) -> Vec<TaskGroup> {
    let mut visible = filter_tasks(tasks, filter, now);
    sort_tasks(&mut visible, sort);
    group_tasks(visible, group_by)
}

/// Parses a selector value where `all` means "no constraint".
pub fn parse_selector<T>(value: &str) -> Result<Option<T>, UnknownVariant>
where
    T: FromStr<Err = UnknownVariant>,
{
    match value {
        "all" => Ok(None),
        other => other.parse().map(Some),
    }
}
