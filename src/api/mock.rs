//! In-process stand-in for the `/api/todo` backend.
//!
//! Every call answers with the same envelope a real server would send, so the
//! store cannot tell the two apart. Failures can be injected per call with
//! [`MockBehaviour`].

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::types::*;
use super::TodoApi;

/// Describes how the mock answers the next calls.
///
/// `(m, n)` lets `m` calls succeed, then fails the following `n` ones.
#[derive(Default, Clone, Copy, Debug)]
pub struct MockBehaviour {
    pub calls: (u32, u32),
}

impl MockBehaviour {
    /// Every call fails at once, `n_fails` times
    #[allow(dead_code)]
    pub fn fail_now(n_fails: u32) -> Self {
        Self { calls: (0, n_fails) }
    }

    fn allow(&mut self, descr: &str) -> bool {
        let (successes, failures) = self.calls;
        if successes > 0 {
            self.calls.0 -= 1;
            true
        } else if failures > 0 {
            self.calls.1 -= 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, self.calls);
            false
        } else {
            true
        }
    }
}

pub struct MockTodoApi {
    todos: Mutex<Vec<Todo>>,
    behaviour: Mutex<MockBehaviour>,
    latency: Duration,
    requests: AtomicU32,
}

impl MockTodoApi {
    /// Empty backend without latency
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_todos(Vec::new())
    }

    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Mutex::new(todos),
            behaviour: Mutex::new(MockBehaviour::default()),
            latency: Duration::ZERO,
            requests: AtomicU32::new(0),
        }
    }

    /// Backend preloaded with a few sample tasks
    pub fn seeded() -> Self {
        Self::with_todos(sample_todos())
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[allow(dead_code)]
    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        if let Ok(mut current) = self.behaviour.lock() {
            *current = behaviour;
        }
    }

    /// Number of requests received so far
    #[allow(dead_code)]
    pub fn request_count(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }

    /// Current server-side state
    #[allow(dead_code)]
    pub fn todos(&self) -> Vec<Todo> {
        self.todos.lock().map(|t| t.clone()).unwrap_or_default()
    }

    async fn respond(
        &self,
        descr: &str,
        apply: impl FnOnce(&mut Vec<Todo>) -> ApiResponse + Send,
    ) -> Result<Vec<Todo>, ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let allowed = self
            .behaviour
            .lock()
            .map(|mut b| b.allow(descr))
            .unwrap_or(true);
        if !allowed {
            return ApiResponse::failure(500, format!("mocked failure of {}", descr)).into_result();
        }

        let response = match self.todos.lock() {
            Ok(mut todos) => apply(&mut todos),
            Err(_) => ApiResponse::failure(500, "todo storage unavailable"),
        };
        response.into_result()
    }
}

impl Default for MockTodoApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: &str) -> ApiResponse {
    ApiResponse::failure(404, format!("todo {} not found", id))
}

#[async_trait]
impl TodoApi for MockTodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        self.respond("list", |todos| ApiResponse::ok(todos.clone(), "todos loaded"))
            .await
    }

    async fn create(&self, form: &TodoForm) -> Result<Vec<Todo>, ApiError> {
        let todo = Todo {
            id: uuid::Uuid::new_v4().to_string(),
            name: form.name.clone(),
            date: form.date.clone().unwrap_or_default(),
            start_time: form.start_time.clone(),
            end_time: form.end_time.clone(),
            done: false,
        };
        self.respond("create", move |todos| {
            todos.push(todo);
            ApiResponse::ok(todos.clone(), "todo added")
        })
        .await
    }

    async fn update(&self, id: &str, update: &TodoUpdate) -> Result<Vec<Todo>, ApiError> {
        self.respond("update", |todos| {
            let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
                return not_found(id);
            };
            todo.name = update.name.clone();
            todo.date = update.date.clone();
            if let Some(start) = &update.start_time {
                todo.start_time = start.clone();
            }
            if let Some(end) = &update.end_time {
                todo.end_time = end.clone();
            }
            ApiResponse::ok(todos.clone(), "todo updated")
        })
        .await
    }

    async fn toggle(&self, id: &str) -> Result<Vec<Todo>, ApiError> {
        self.respond("toggle", |todos| {
            let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
                return not_found(id);
            };
            todo.done = !todo.done;
            ApiResponse::ok(todos.clone(), "todo status toggled")
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<Vec<Todo>, ApiError> {
        self.respond("delete", |todos| {
            let before = todos.len();
            todos.retain(|t| t.id != id);
            if todos.len() == before {
                return not_found(id);
            }
            ApiResponse::ok(todos.clone(), "todo deleted")
        })
        .await
    }
}

pub fn sample_todos() -> Vec<Todo> {
    let todo = |id: &str, name: &str, done: bool, date: &str, start: &str, end: &str| Todo {
        id: id.to_string(),
        name: name.to_string(),
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        done,
    };

    vec![
        todo("1", "Learn Vue 2", true, "2025-02-26", "09:00", "12:00"),
        todo("2", "Learn Vue 3", false, "2025-02-26", "14:00", "15:00"),
        todo("3", "Learn React", false, "2025-02-27", "10:00", "12:00"),
        todo("4", "Build something awesome", false, "2025-02-28", "16:00", "20:00"),
    ]
}
