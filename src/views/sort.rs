use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Task, UnknownVariant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    DueDate,
    Priority,
    Status,
    Category,
    CreatedAt,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::DueDate,
        SortKey::Priority,
        SortKey::Status,
        SortKey::Category,
        SortKey::CreatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DueDate => "dueDate",
            SortKey::Priority => "priority",
            SortKey::Status => "status",
            SortKey::Category => "category",
            SortKey::CreatedAt => "createdAt",
        }
    }

    /// `createdAt` is the one key that sorts newest first.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::DueDate => a.due_date.cmp(&b.due_date),
            SortKey::Priority => a.priority.cmp(&b.priority),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            SortKey::Category => a.category.as_str().cmp(b.category.as_str()),
            SortKey::CreatedAt => b.created_at.cmp(&a.created_at),
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                allowed: "dueDate, priority, status, category, createdAt".to_string(),
            })
    }
}

/// Stable: tasks that compare equal keep their relative order.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    tasks.sort_by(|a, b| key.compare(a, b));
}
