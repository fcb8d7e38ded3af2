use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Category, Priority, Status, Task, UnknownVariant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
    Overdue,
}

impl DueFilter {
    pub const ALL: [DueFilter; 5] = [
        DueFilter::All,
        DueFilter::Today,
        DueFilter::Week,
        DueFilter::Month,
        DueFilter::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DueFilter::All => "all",
            DueFilter::Today => "today",
            DueFilter::Week => "week",
            DueFilter::Month => "month",
            DueFilter::Overdue => "overdue",
        }
    }

    fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        let due = task.due_date;
        match self {
            DueFilter::All => true,
            DueFilter::Today => due.date_naive() == now.date_naive(),
            DueFilter::Week => due >= now && due <= now + Duration::days(7),
            DueFilter::Month => {
                let horizon = now.checked_add_months(Months::new(1)).unwrap_or(now);
                due >= now && due <= horizon
            }
            DueFilter::Overdue => due < now && !task.completed,
        }
    }
}

impl FromStr for DueFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DueFilter::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                allowed: "all, today, week, month, overdue".to_string(),
            })
    }
}

/// Per-field constraints, combined with AND. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub due: DueFilter,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        self.category.is_none_or(|c| task.category == c)
            && self.status.is_none_or(|s| task.status == s)
            && self.priority.is_none_or(|p| task.priority == p)
            && self.due.matches(task, now)
    }
}

pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter, now: DateTime<Utc>) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task, now))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn due_at(due_date: DateTime<Utc>) -> Task {
        Task {
            id: "t1".to_string(),
            title: "Pay rent".to_string(),
            description: "Transfer before the end of the month".to_string(),
            due_date,
            priority: Priority::Medium,
            completed: false,
            category: Category::Personal,
            tags: Vec::new(),
            reminder_date: None,
            notes: None,
            status: Status::NotStarted,
            created_at: due_date,
            updated_at: due_date,
        }
    }

    #[test]
    fn week_and_month_windows_include_their_end() {
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap();
        let week_end = now + Duration::days(7);
        let month_end = Utc.with_ymd_and_hms(2026, 11, 15, 12, 0, 0).unwrap();

        assert!(DueFilter::Week.matches(&due_at(week_end), now));
        assert!(!DueFilter::Week.matches(&due_at(week_end + Duration::seconds(1)), now));
        assert!(DueFilter::Month.matches(&due_at(month_end), now));
        assert!(!DueFilter::Month.matches(&due_at(month_end + Duration::seconds(1)), now));
        assert!(!DueFilter::Month.matches(&due_at(now - Duration::seconds(1)), now));
    }

    #[test]
    fn month_window_clamps_to_the_shorter_month() {
        let now = Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap();
        let feb_28 = Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap();

        assert!(DueFilter::Month.matches(&due_at(feb_28), now));
        assert!(!DueFilter::Month.matches(&due_at(feb_28 + Duration::seconds(1)), now));
        assert!(!DueFilter::Month.matches(&due_at(now + Duration::days(29)), now));
    }
}
