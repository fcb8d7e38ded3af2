//! Client-side cache of the task collection.
//!
//! The store owns the only in-memory copy of the tasks and is the single
//! writer to it. Every mutation goes through the gateway first; the cached
//! collection changes only after the gateway confirms, so a failed call
//! leaves it exactly as it was. When two updates to the same task overlap,
//! whichever response is applied last wins.

pub mod form;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::{GatewayError, TaskGateway};
use crate::models::{Task, TaskDraft, validate, validate_patch};

pub use form::{FormMode, FormState, TaskForm};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
    Error(String),
}

pub struct TaskStore {
    gateway: Arc<dyn TaskGateway>,
    tasks: Vec<Task>,
    state: LoadState,
}

impl TaskStore {
    /// A store that has not fetched anything yet.
    pub fn new(gateway: Arc<dyn TaskGateway>) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            state: LoadState::Loading,
        }
    }

    /// Creates the store and performs the initial `list()`. A failed fetch is
    /// kept as the store's error state.
    pub async fn connect(gateway: Arc<dyn TaskGateway>) -> Self {
        let mut store = Self::new(gateway);
        if let Err(e) = store.load().await {
            warn!("initial task fetch failed: {}", e);
        }
        store
    }

    pub async fn load(&mut self) -> Result<(), GatewayError> {
        self.state = LoadState::Loading;
        match self.gateway.list().await {
            Ok(tasks) => {
                debug!("store loaded {} tasks", tasks.len());
                self.tasks = tasks;
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(e) => {
                self.tasks.clear();
                self.state = LoadState::Error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Validates locally, then creates through the gateway and appends the
    /// persisted task.
    pub async fn add(&mut self, candidate: TaskDraft) -> Result<Task, GatewayError> {
        validate(&candidate)?;
        let result = self.gateway.create(&candidate).await;
        let task = self.settle(result)?;
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub async fn update(&mut self, id: &str, changes: TaskDraft) -> Result<Task, GatewayError> {
        match self.get(id) {
            Some(current) => {
                validate(&changes.merged_onto(&TaskDraft::from_task(current)))?;
            }
            None => validate_patch(&changes)?,
        }

        let result = self.gateway.update(id, &changes).await;
        let task = self.settle(result)?;
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
            *slot = task.clone();
        }
        Ok(task)
    }

    pub async fn remove(&mut self, id: &str) -> Result<(), GatewayError> {
        let result = self.gateway.delete(id).await;
        self.settle(result)?;
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }

    /// Flips `completed`. Returns `Ok(None)` without touching the network
    /// when the task is not in the cached collection.
    pub async fn toggle_completion(&mut self, id: &str) -> Result<Option<Task>, GatewayError> {
        let Some(current) = self.get(id) else {
            debug!("toggle ignored, task {} is not cached", id);
            return Ok(None);
        };
        let changes = TaskDraft::completion(!current.completed);
        self.update(id, changes).await.map(Some)
    }

    /// Records the outcome of a gateway call. Validation rejections stay with
    /// the caller; any other failure becomes the store's error state.
    fn settle<T>(&mut self, result: Result<T, GatewayError>) -> Result<T, GatewayError> {
        match result {
            Ok(value) => {
                self.state = LoadState::Ready;
                Ok(value)
            }
            Err(e) if e.is_validation() => Err(e),
            Err(e) => {
                warn!("task mutation failed: {}", e);
                self.state = LoadState::Error(e.to_string());
                Err(e)
            }
        }
    }
}
