use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Task, UnknownVariant};

pub const ALL_TASKS_LABEL: &str = "All Tasks";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    None,
    Category,
    Priority,
    Status,
}

impl GroupBy {
    fn key(&self, task: &Task) -> &'static str {
        match self {
            GroupBy::None => ALL_TASKS_LABEL,
            GroupBy::Category => task.category.as_str(),
            GroupBy::Priority => task.priority.as_str(),
            GroupBy::Status => task.status.as_str(),
        }
    }
}

impl FromStr for GroupBy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(GroupBy::None),
            "category" => Ok(GroupBy::Category),
            "priority" => Ok(GroupBy::Priority),
            "status" => Ok(GroupBy::Status),
            _ => Err(UnknownVariant {
                allowed: "none, category, priority, status".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskGroup {
    pub key: String,
    pub tasks: Vec<Task>,
}

/// Partitions already filtered and sorted tasks. Groups come out in the
/// order their first task appears; tasks keep their order within a group.
/// `GroupBy::None` always yields exactly one group, even when empty.
pub fn group_tasks(tasks: Vec<Task>, group_by: GroupBy) -> Vec<TaskGroup> {
    if group_by == GroupBy::None {
        return vec![TaskGroup {
            key: ALL_TASKS_LABEL.to_string(),
            tasks,
        }];
    }

    let mut groups: Vec<TaskGroup> = Vec::new();
    for task in tasks {
        let key = group_by.key(&task);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.tasks.push(task),
            None => groups.push(TaskGroup {
                key: key.to_string(),
                tasks: vec![task],
            }),
        }
    }
    groups
}
