use chrono::{DateTime, NaiveDate, Utc};

use super::TaskStore;
use crate::client::GatewayError;
use crate::models::{Category, Priority, Status, Task, TaskDraft, ValidationErrors, parse_date_time, validate};

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    Submitting,
    Succeeded(Task),
    Failed(GatewayError),
}

/// A create or edit form bound to a draft. Submission walks
/// `Idle -> Submitting -> Succeeded | Failed`; a draft that fails local
/// checks goes straight to `Failed` without a request.
#[derive(Debug, Clone)]
pub struct TaskForm {
    mode: FormMode,
    draft: TaskDraft,
    state: FormState,
}

impl TaskForm {
    pub fn create(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Create,
            draft: default_draft(today),
            state: FormState::Idle,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit {
                id: task.id.clone(),
            },
            draft: TaskDraft::from_task(task),
            state: FormState::Idle,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Editing the draft returns a settled form to `Idle`.
    pub fn draft_mut(&mut self) -> &mut TaskDraft {
        if self.state != FormState::Submitting {
            self.state = FormState::Idle;
        }
        &mut self.draft
    }

    /// Model validation plus the form-only rule that due and reminder dates
    /// may not lie before the current day.
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut errors = match validate(&self.draft) {
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let today = now.date_naive();
        let in_past = |raw: Option<&str>| {
            raw.and_then(parse_date_time)
                .is_some_and(|date| date.date_naive() < today)
        };
        if in_past(self.draft.due_date.as_deref()) {
            errors.add("dueDate", "cannot be in the past");
        }
        if in_past(self.draft.reminder_date.as_ref().and_then(|r| r.as_deref())) {
            errors.add("reminderDate", "cannot be in the past");
        }

        errors.into_result(())
    }

    pub async fn submit(&mut self, store: &mut TaskStore, now: DateTime<Utc>) -> &FormState {
        if let Err(errors) = self.check(now) {
            self.state = FormState::Failed(GatewayError::Validation(errors));
            return &self.state;
        }

        self.state = FormState::Submitting;
        let result = match &self.mode {
            FormMode::Create => store.add(self.draft.clone()).await,
            FormMode::Edit { id } => store.update(id, self.draft.clone()).await,
        };

        self.state = match result {
            Ok(task) => {
                if self.mode == FormMode::Create {
                    self.draft = default_draft(now.date_naive());
                }
                FormState::Succeeded(task)
            }
            Err(e) => FormState::Failed(e),
        };
        &self.state
    }
}

fn default_draft(today: NaiveDate) -> TaskDraft {
    TaskDraft {
        title: Some(String::new()),
        description: Some(String::new()),
        due_date: Some(today.format("%Y-%m-%d").to_string()),
        priority: Some(Priority::Medium.to_string()),
        completed: Some(false),
        category: Some(Category::Other.to_string()),
        tags: Some(Vec::new()),
        reminder_date: Some(None),
        notes: Some(None),
        status: Some(Status::NotStarted.to_string()),
    }
}
