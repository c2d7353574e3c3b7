//! The task list as last reported by the backend, plus the views derived from it.
//!
//! The store never edits a task locally. Every request answers with the full
//! list and that list replaces `tasks` wholesale, so whichever response
//! completes last is what the user sees.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use chrono::{Duration, Local, NaiveDate};

use super::notify::{NoticeKind, Notifier};
use crate::api::time::time_ranges_overlap;
use crate::api::{ApiError, Todo, TodoApi, TodoForm, TodoUpdate};
use crate::calendar;

/// The kinds of request the store can have in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoOp {
    Fetch,
    Add,
    Update,
    Delete,
    Toggle,
}

impl TodoOp {
    fn success_message(self) -> Option<&'static str> {
        match self {
            TodoOp::Fetch => None,
            TodoOp::Add => Some("todo added"),
            TodoOp::Update => Some("todo updated"),
            TodoOp::Delete => Some("todo deleted"),
            TodoOp::Toggle => Some("todo status changed"),
        }
    }

    /// Shown when the server gave no message of its own
    fn failure_message(self) -> &'static str {
        match self {
            TodoOp::Fetch => "failed to fetch todos",
            TodoOp::Add => "failed to add todo",
            TodoOp::Update => "failed to update todo",
            TodoOp::Delete => "failed to delete todo",
            TodoOp::Toggle => "failed to change todo status",
        }
    }
}

/// One request to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoRequest {
    Fetch,
    Add(TodoForm),
    Update { id: String, update: TodoUpdate },
    Delete(String),
    Toggle(String),
}

impl TodoRequest {
    pub fn op(&self) -> TodoOp {
        match self {
            TodoRequest::Fetch => TodoOp::Fetch,
            TodoRequest::Add(_) => TodoOp::Add,
            TodoRequest::Update { .. } => TodoOp::Update,
            TodoRequest::Delete(_) => TodoOp::Delete,
            TodoRequest::Toggle(_) => TodoOp::Toggle,
        }
    }

    pub async fn send(&self, api: &dyn TodoApi) -> Result<Vec<Todo>, ApiError> {
        match self {
            TodoRequest::Fetch => api.list().await,
            TodoRequest::Add(form) => api.create(form).await,
            TodoRequest::Update { id, update } => api.update(id, update).await,
            TodoRequest::Delete(id) => api.delete(id).await,
            TodoRequest::Toggle(id) => api.toggle(id).await,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadingFlags {
    pub fetching: bool,
    pub adding: bool,
    pub updating: bool,
    pub deleting: bool,
    pub toggling: bool,
}

impl LoadingFlags {
    pub fn is_set(&self, op: TodoOp) -> bool {
        match op {
            TodoOp::Fetch => self.fetching,
            TodoOp::Add => self.adding,
            TodoOp::Update => self.updating,
            TodoOp::Delete => self.deleting,
            TodoOp::Toggle => self.toggling,
        }
    }

    pub fn any(&self) -> bool {
        self.fetching || self.adding || self.updating || self.deleting || self.toggling
    }

    fn flag_mut(&mut self, op: TodoOp) -> &mut bool {
        match op {
            TodoOp::Fetch => &mut self.fetching,
            TodoOp::Add => &mut self.adding,
            TodoOp::Update => &mut self.updating,
            TodoOp::Delete => &mut self.deleting,
            TodoOp::Toggle => &mut self.toggling,
        }
    }
}

/// Tasks of one date, split by completion
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TodoGroup {
    pub done: Vec<Todo>,
    pub not_done: Vec<Todo>,
}

impl TodoGroup {
    pub fn is_empty(&self) -> bool {
        self.done.is_empty() && self.not_done.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct TodoStore {
    tasks: Vec<Todo>,
    loading: LoadingFlags,
    last_error: Option<String>,
    pub search_keyword: String,
    week_start: NaiveDate,
    /// Bumped whenever the backend is replaced
    generation: u64,
}

impl TodoStore {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tasks: Vec::new(),
            loading: LoadingFlags::default(),
            last_error: None,
            search_keyword: String::new(),
            week_start: calendar::week_start(today),
            generation: 0,
        }
    }

    pub fn tasks(&self) -> &[Todo] {
        &self.tasks
    }

    pub fn loading(&self) -> LoadingFlags {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[allow(dead_code)]
    pub fn find(&self, id: &str) -> Option<&Todo> {
        self.tasks.iter().find(|t| t.id == id)
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    /// Mark `op` as in flight. Returns false if one is already pending.
    pub fn begin(&mut self, op: TodoOp) -> bool {
        let flag = self.loading.flag_mut(op);
        if *flag {
            log::debug!("{:?} already in flight, ignoring", op);
            return false;
        }
        *flag = true;
        self.last_error = None;
        true
    }

    /// Apply the outcome of a request started with [`TodoStore::begin`]
    pub fn complete(
        &mut self,
        op: TodoOp,
        result: Result<Vec<Todo>, ApiError>,
        notifier: &mut dyn Notifier,
    ) -> bool {
        *self.loading.flag_mut(op) = false;

        match result {
            Ok(tasks) => {
                log::debug!("{:?} completed with {} todos", op, tasks.len());
                self.tasks = tasks;
                self.last_error = None;
                if let Some(message) = op.success_message() {
                    notifier.notify(NoticeKind::Success, message);
                }
                true
            }
            Err(e) => {
                if e.is_transport() {
                    log::error!("{:?} failed: {}", op, e);
                } else {
                    log::warn!("{:?} rejected: {}", op, e);
                }
                let message = e
                    .server_message()
                    .unwrap_or(op.failure_message())
                    .to_string();
                notifier.notify(NoticeKind::Error, &message);
                self.last_error = Some(message);
                false
            }
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Forget every request sent to the previous backend.
    /// Loading flags are cleared so the new backend can be queried at once.
    pub fn switch_backend(&mut self) {
        self.generation += 1;
        self.loading = LoadingFlags::default();
        log::debug!("Switched backend, generation {}", self.generation);
    }

    /// Like [`TodoStore::complete`] for a request started under `generation`.
    /// Completions from an earlier backend are dropped and yield `None`.
    pub fn complete_from(
        &mut self,
        generation: u64,
        op: TodoOp,
        result: Result<Vec<Todo>, ApiError>,
        notifier: &mut dyn Notifier,
    ) -> Option<bool> {
        if generation != self.generation {
            log::debug!("Dropping stale {:?} from generation {}", op, generation);
            return None;
        }
        Some(self.complete(op, result, notifier))
    }

    /// Send `request` and apply its response. Returns whether it succeeded.
    #[allow(dead_code)]
    pub async fn dispatch(
        &mut self,
        api: &dyn TodoApi,
        request: TodoRequest,
        notifier: &mut dyn Notifier,
    ) -> bool {
        let op = request.op();
        if !self.begin(op) {
            return false;
        }
        let result = request.send(api).await;
        self.complete(op, result, notifier)
    }

    #[allow(dead_code)]
    pub async fn fetch_todos(&mut self, api: &dyn TodoApi, notifier: &mut dyn Notifier) -> bool {
        self.dispatch(api, TodoRequest::Fetch, notifier).await
    }

    #[allow(dead_code)]
    pub async fn add_todo(
        &mut self,
        api: &dyn TodoApi,
        form: TodoForm,
        notifier: &mut dyn Notifier,
    ) -> bool {
        self.dispatch(api, TodoRequest::Add(form), notifier).await
    }

    #[allow(dead_code)]
    pub async fn update_todo(
        &mut self,
        api: &dyn TodoApi,
        id: &str,
        update: TodoUpdate,
        notifier: &mut dyn Notifier,
    ) -> bool {
        let request = TodoRequest::Update {
            id: id.to_string(),
            update,
        };
        self.dispatch(api, request, notifier).await
    }

    #[allow(dead_code)]
    pub async fn delete_todo(&mut self, api: &dyn TodoApi, id: &str, notifier: &mut dyn Notifier) -> bool {
        self.dispatch(api, TodoRequest::Delete(id.to_string()), notifier).await
    }

    #[allow(dead_code)]
    pub async fn toggle_done(&mut self, api: &dyn TodoApi, id: &str, notifier: &mut dyn Notifier) -> bool {
        self.dispatch(api, TodoRequest::Toggle(id.to_string()), notifier).await
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// All tasks grouped by date, dates ascending
    pub fn todos_by_date(&self) -> BTreeMap<String, TodoGroup> {
        group_by_date(self.tasks.iter())
    }

    /// [`TodoStore::todos_by_date`] restricted to names containing the search keyword
    pub fn filtered_todos_by_date(&self) -> BTreeMap<String, TodoGroup> {
        if self.search_keyword.trim().is_empty() {
            return self.todos_by_date();
        }

        let keyword = self.search_keyword.to_lowercase();
        self.todos_by_date()
            .into_iter()
            .filter_map(|(date, group)| {
                let keep = |todo: &Todo| todo.name.to_lowercase().contains(&keyword);
                let filtered = TodoGroup {
                    done: group.done.into_iter().filter(|t| keep(t)).collect(),
                    not_done: group.not_done.into_iter().filter(|t| keep(t)).collect(),
                };
                (!filtered.is_empty()).then_some((date, filtered))
            })
            .collect()
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    /// Move the week window to the week containing `date`
    pub fn set_week(&mut self, date: NaiveDate) {
        self.week_start = calendar::week_start(date);
    }

    /// Tasks dated inside the week window, both ends inclusive
    pub fn todos_by_week(&self) -> Vec<&Todo> {
        let start = self.week_start;
        let end = start + Duration::days(6);
        self.tasks
            .iter()
            .filter(|t| t.naive_date().is_some_and(|d| start <= d && d <= end))
            .collect()
    }

    pub fn completed_todos(&self) -> Vec<&Todo> {
        self.todos_by_week().into_iter().filter(|t| t.done).collect()
    }

    pub fn on_progress_todos(&self) -> Vec<&Todo> {
        self.todos_by_week().into_iter().filter(|t| !t.done).collect()
    }

    /// Tasks on one day, in collection order
    pub fn todos_on(&self, date: NaiveDate) -> Vec<&Todo> {
        self.tasks
            .iter()
            .filter(|t| t.naive_date() == Some(date))
            .collect()
    }

    /// Tasks on `date` whose time range overlaps `start..end`, skipping `except_id`
    pub fn overlapping(&self, date: &str, start: &str, end: &str, except_id: Option<&str>) -> Vec<&Todo> {
        self.tasks
            .iter()
            .filter(|t| t.date == date && Some(t.id.as_str()) != except_id)
            .filter(|t| time_ranges_overlap(start, end, &t.start_time, &t.end_time))
            .collect()
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

fn group_by_date<'a>(todos: impl Iterator<Item = &'a Todo>) -> BTreeMap<String, TodoGroup> {
    let mut grouped: BTreeMap<String, TodoGroup> = BTreeMap::new();
    for todo in todos {
        let group = grouped.entry(todo.date.clone()).or_default();
        if todo.done {
            group.done.push(todo.clone());
        } else {
            group.not_done.push(todo.clone());
        }
    }
    grouped
}

/// Percentage of done tasks, rounded; 0 for an empty list
pub fn completion_rate<T: Borrow<Todo>>(todos: &[T]) -> u32 {
    if todos.is_empty() {
        return 0;
    }
    let done = todos.iter().filter(|t| Borrow::<Todo>::borrow(*t).done).count();
    (100.0 * done as f64 / todos.len() as f64).round() as u32
}
