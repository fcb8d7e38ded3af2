use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://taskboard.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is not a socket address: {}", e)))?;

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base of the task resource, e.g. `http://127.0.0.1:5000/api`.
    pub api_base_url: String,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self { api_base_url }
    }

    pub fn new_from_env() -> Self {
        Self::new(env::var("TASKBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))
    }

    pub fn tasks_url(&self) -> String {
        format!("{}/tasks", self.api_base_url)
    }

    pub fn task_url(&self, id: &str) -> String {
        format!("{}/tasks/{}", self.api_base_url, id)
    }
}
