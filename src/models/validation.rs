use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::task::{Category, NewTask, Priority, Status, TaskDraft};

pub const TITLE_LEN: (usize, usize) = (3, 50);
pub const DESCRIPTION_LEN: (usize, usize) = (10, 200);
pub const TAG_MAX_LEN: usize = 20;
pub const NOTES_MAX_LEN: usize = 500;

/// Violated constraints keyed by the field's wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (i, (field, message)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{field} {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a create candidate, or the result of merging a partial update
/// onto an existing task. Every violated constraint is reported.
pub fn validate(draft: &TaskDraft) -> Result<NewTask, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let checked = check(draft, &mut errors, true);

    match (checked.title, checked.description, checked.due_date, checked.priority) {
        (Some(title), Some(description), Some(due_date), Some(priority)) if errors.is_empty() => {
            Ok(NewTask {
                title,
                description,
                due_date,
                priority,
                completed: draft.completed.unwrap_or(false),
                category: checked.category.unwrap_or_default(),
                tags: checked.tags.unwrap_or_default(),
                reminder_date: checked.reminder_date.flatten(),
                notes: checked.notes.flatten(),
                status: checked.status.unwrap_or_default(),
            })
        }
        _ => Err(errors),
    }
}

/// Checks only the fields present in a partial update.
pub fn validate_patch(draft: &TaskDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check(draft, &mut errors, false);
    errors.into_result(())
}

/// Accepts RFC 3339 date-times, `YYYY-MM-DDTHH:MM[:SS]` (taken as UTC) and
/// plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Default)]
struct Checked {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    priority: Option<Priority>,
    category: Option<Category>,
    tags: Option<Vec<String>>,
    reminder_date: Option<Option<DateTime<Utc>>>,
    notes: Option<Option<String>>,
    status: Option<Status>,
}

fn check(draft: &TaskDraft, errors: &mut ValidationErrors, full: bool) -> Checked {
    Checked {
        title: bounded_text(errors, "title", draft.title.as_deref(), full, TITLE_LEN),
        description: bounded_text(
            errors,
            "description",
            draft.description.as_deref(),
            full,
            DESCRIPTION_LEN,
        ),
        due_date: date_field(errors, "dueDate", draft.due_date.as_deref(), full),
        priority: choice(errors, "priority", draft.priority.as_deref(), full),
        category: choice(errors, "category", draft.category.as_deref(), false),
        tags: draft.tags.as_ref().map(|tags| check_tags(errors, tags)),
        reminder_date: draft.reminder_date.as_ref().map(|value| {
            value
                .as_deref()
                .and_then(|v| date_field(errors, "reminderDate", Some(v), false))
        }),
        notes: draft.notes.as_ref().map(|value| {
            let trimmed = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
            if trimmed.chars().count() > NOTES_MAX_LEN {
                errors.add("notes", format!("must be at most {NOTES_MAX_LEN} characters"));
            }
            Some(trimmed.to_string())
        }),
        status: choice(errors, "status", draft.status.as_deref(), false),
    }
}

fn bounded_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    required: bool,
    (min, max): (usize, usize),
) -> Option<String> {
    let Some(value) = value.map(str::trim) else {
        if required {
            errors.add(field, "is required");
        }
        return None;
    };
    if value.is_empty() {
        errors.add(field, "is required");
        return None;
    }
    let len = value.chars().count();
    if len < min || len > max {
        errors.add(field, format!("must be between {min} and {max} characters"));
        return None;
    }
    Some(value.to_string())
}

fn date_field(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    required: bool,
) -> Option<DateTime<Utc>> {
    match value {
        None if required => {
            errors.add(field, "is required");
            None
        }
        None => None,
        Some(raw) if raw.trim().is_empty() => {
            if required {
                errors.add(field, "is required");
            }
            None
        }
        Some(raw) => {
            let parsed = parse_date_time(raw);
            if parsed.is_none() {
                errors.add(field, "is not a valid date");
            }
            parsed
        }
    }
}

fn choice<T>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    required: bool,
) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let Some(raw) = value else {
        if required {
            errors.add(field, "is required");
        }
        return None;
    };
    match raw.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            errors.add(field, e.to_string());
            None
        }
    }
}

fn check_tags(errors: &mut ValidationErrors, tags: &[String]) -> Vec<String> {
    let tags: Vec<String> = tags.iter().map(|t| t.trim().to_string()).collect();
    if let Some(tag) = tags.iter().find(|t| t.chars().count() > TAG_MAX_LEN) {
        errors.add(
            "tags",
            format!("tag \"{tag}\" must be at most {TAG_MAX_LEN} characters"),
        );
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> TaskDraft {
        TaskDraft {
            title: Some("  Buy groceries ".into()),
            description: Some("Milk, eggs and bread for the week".into()),
            due_date: Some("2026-10-20".into()),
            priority: Some("medium".into()),
            ..TaskDraft::default()
        }
    }

    #[test]
    fn fills_defaults_and_trims() {
        let task = validate(&candidate()).unwrap();
        assert_eq!(task.title, "Buy groceries");
        assert_eq!(task.category, Category::Other);
        assert_eq!(task.status, Status::NotStarted);
        assert!(!task.completed);
        assert!(task.tags.is_empty());
        assert_eq!(task.due_date.to_rfc3339(), "2026-10-20T00:00:00+00:00");
    }

    #[test]
    fn reports_every_violated_field() {
        let draft = TaskDraft {
            title: Some("ab".into()),
            description: None,
            due_date: Some("next tuesday".into()),
            priority: Some("urgent".into()),
            category: Some("errands".into()),
            ..TaskDraft::default()
        };
        let errors = validate(&draft).unwrap_err();
        for field in ["title", "description", "dueDate", "priority", "category"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert_eq!(errors.get("description"), Some("is required"));
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let mut draft = candidate();
        draft.title = Some("  ab   ".into());
        let errors = validate(&draft).unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some("must be between 3 and 50 characters")
        );
    }

    #[test]
    fn long_tags_and_notes_are_rejected() {
        let mut draft = candidate();
        draft.tags = Some(vec!["ok".into(), "x".repeat(21)]);
        draft.notes = Some(Some("n".repeat(501)));
        let errors = validate(&draft).unwrap_err();
        assert!(errors.contains("tags"));
        assert!(errors.contains("notes"));
    }

    #[test]
    fn patch_only_checks_present_fields() {
        assert!(validate_patch(&TaskDraft::completion(true)).is_ok());
        let patch = TaskDraft {
            status: Some("done".into()),
            ..TaskDraft::default()
        };
        assert!(validate_patch(&patch).unwrap_err().contains("status"));
    }

    #[test]
    fn reminder_date_must_parse_but_may_be_blank() {
        let mut draft = candidate();
        draft.reminder_date = Some(Some("sometime soon".into()));
        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.get("reminderDate"), Some("is not a valid date"));
        assert_eq!(errors.fields().len(), 1);

        draft.reminder_date = Some(Some("  ".into()));
        assert_eq!(validate(&draft).unwrap().reminder_date, None);

        let mut draft = candidate();
        draft.due_date = Some("".into());
        assert_eq!(validate(&draft).unwrap_err().get("dueDate"), Some("is required"));
    }

    #[test]
    fn parses_supported_date_forms() {
        assert!(parse_date_time("2026-10-15T08:30:00Z").is_some());
        assert!(parse_date_time("2026-10-15T08:30:00+02:00").is_some());
        assert!(parse_date_time("2026-10-15T08:30").is_some());
        assert!(parse_date_time("2026-10-15").is_some());
        assert!(parse_date_time("15/10/2026").is_none());
    }
}
