pub mod task;
pub mod validation;

pub use task::{Category, NewTask, Priority, Status, Task, TaskDraft, UnknownVariant};
pub use validation::{ValidationErrors, parse_date_time, validate, validate_patch};
