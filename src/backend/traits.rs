//! Trait abstraction for the backend client to enable mocking in tests

use async_trait::async_trait;
use serde_json::Value;

use super::BackendError;

/// Row API and remote function calls
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendClientTrait: Send + Sync {
    /// Check if the backend is reachable with the configured key
    async fn check_connection(&self) -> bool;

    /// Insert a row and return it as stored
    async fn insert_row(&self, table: &str, row: Value) -> Result<Value, BackendError>;

    /// Patch the row with the given id and return it as stored
    async fn update_row(&self, table: &str, id: &str, patch: Value) -> Result<Value, BackendError>;

    /// Call a named remote function with a JSON body
    async fn invoke_function(&self, name: &str, body: Value) -> Result<Value, BackendError>;
}
