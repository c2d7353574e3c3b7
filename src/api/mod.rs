mod types;
mod client;
mod mock;
pub mod time;

use async_trait::async_trait;

pub use types::*;
pub use client::TodoClient;
pub use mock::MockTodoApi;
#[cfg(test)]
pub use mock::{sample_todos, MockBehaviour};

/// The backend collaborator. Every call answers with the full task list
/// as the server sees it after the request.
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// GET /api/todo
    async fn list(&self) -> Result<Vec<Todo>, ApiError>;
    /// POST /api/todo
    async fn create(&self, form: &TodoForm) -> Result<Vec<Todo>, ApiError>;
    /// PUT /api/todo/:id
    async fn update(&self, id: &str, update: &TodoUpdate) -> Result<Vec<Todo>, ApiError>;
    /// PATCH /api/todo/:id
    async fn toggle(&self, id: &str) -> Result<Vec<Todo>, ApiError>;
    /// DELETE /api/todo/:id
    async fn delete(&self, id: &str) -> Result<Vec<Todo>, ApiError>;
}
