use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Category, Priority, Task};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    /// Whole percent, 0 for an empty collection.
    pub completion_rate: u32,
    pub overdue: usize,
    /// Open tasks due within the next seven days.
    pub upcoming: usize,
    /// Only values that occur are present.
    pub by_priority: BTreeMap<Priority, usize>,
    pub by_category: BTreeMap<Category, usize>,
}

pub fn compute_stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let week_out = now + Duration::days(7);
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };

    for task in tasks {
        if task.completed {
            stats.completed += 1;
        } else if task.due_date < now {
            stats.overdue += 1;
        } else if task.due_date <= week_out {
            stats.upcoming += 1;
        }
        *stats.by_priority.entry(task.priority).or_default() += 1;
        *stats.by_category.entry(task.category).or_default() += 1;
    }

    stats.completion_rate = completion_rate(stats.completed, stats.total);
    stats
}

fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 * 100.0 / total as f64).round() as u32
}
