pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Task, TaskDraft, ValidationErrors};

pub use http::HttpTaskGateway;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
}

impl GatewayError {
    pub fn is_validation(&self) -> bool {
        matches!(self, GatewayError::Validation(_))
    }
}

/// The task resource as seen from the client. Each call is one request and
/// one typed response; there is no retry or cancellation.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, GatewayError>;
    async fn read(&self, id: &str) -> Result<Task, GatewayError>;
    async fn create(&self, candidate: &TaskDraft) -> Result<Task, GatewayError>;
    async fn update(&self, id: &str, changes: &TaskDraft) -> Result<Task, GatewayError>;
    async fn delete(&self, id: &str) -> Result<(), GatewayError>;
}
