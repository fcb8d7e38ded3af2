use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{GatewayError, TaskGateway};
use crate::config::ClientConfig;
use crate::error::ErrorResponse;
use crate::models::{Task, TaskDraft, ValidationErrors};

pub struct HttpTaskGateway {
    client: Client,
    config: ClientConfig,
}

impl HttpTaskGateway {
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Maps a response onto the gateway's error taxonomy. `id` names the
    /// task a 404 refers to.
    async fn check(response: Response, id: Option<&str>) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&body).ok();

        match status {
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound(id.unwrap_or_default().to_string())),
            StatusCode::BAD_REQUEST => {
                let mut errors = ValidationErrors::new();
                match parsed {
                    Some(ErrorResponse { fields: Some(fields), .. }) => {
                        for (field, message) in fields {
                            errors.add(&field, message);
                        }
                    }
                    Some(ErrorResponse { message, .. }) => errors.add("body", message),
                    None => errors.add("body", body),
                }
                warn!("task rejected by server: {}", errors);
                Err(GatewayError::Validation(errors))
            }
            _ => Err(GatewayError::Server {
                status: status.as_u16(),
                message: parsed.map(|p| p.message).unwrap_or(body),
            }),
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Network(format!("Failed to parse response: {}", e)))
    }
}

fn transport(e: reqwest::Error) -> GatewayError {
    GatewayError::Network(e.to_string())
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn list(&self) -> Result<Vec<Task>, GatewayError> {
        let response = self
            .client
            .get(self.config.tasks_url())
            .send()
            .await
            .map_err(transport)?;
        let tasks: Vec<Task> = Self::decode(Self::check(response, None).await?).await?;
        debug!("fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn read(&self, id: &str) -> Result<Task, GatewayError> {
        let response = self
            .client
            .get(self.config.task_url(id))
            .send()
            .await
            .map_err(transport)?;
        Self::decode(Self::check(response, Some(id)).await?).await
    }

    async fn create(&self, candidate: &TaskDraft) -> Result<Task, GatewayError> {
        let response = self
            .client
            .post(self.config.tasks_url())
            .json(candidate)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(Self::check(response, None).await?).await
    }

    async fn update(&self, id: &str, changes: &TaskDraft) -> Result<Task, GatewayError> {
        let response = self
            .client
            .put(self.config.task_url(id))
            .json(changes)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(Self::check(response, Some(id)).await?).await
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.config.task_url(id))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }
}
