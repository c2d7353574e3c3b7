use chrono::NaiveDateTime;

use super::notify::Notifier;
use super::store::TodoRequest;
use super::validate::validate_form;
use crate::api::time::{current_rounded_time, default_end_time};
use crate::api::{Todo, TodoForm, TodoUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Add,
    Edit { id: String },
}

/// Editable copy of a task while the dialog is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub date: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub done: bool,
}

impl Default for Draft {
    fn default() -> Self {
        let form = TodoForm::default();
        Self {
            name: form.name,
            date: form.date,
            start_time: form.start_time,
            end_time: form.end_time,
            done: false,
        }
    }
}

impl Draft {
    pub fn to_form(&self) -> TodoForm {
        TodoForm {
            name: self.name.trim().to_string(),
            date: self.date.clone(),
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
        }
    }
}

/// Add/edit dialog state: closed, or open on a draft
#[derive(Debug, Default)]
pub struct DialogController {
    mode: Option<DialogMode>,
    pub draft: Draft,
    /// Counts openings, so a late completion can tell which dialog it belongs to
    session: u64,
}

impl DialogController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn mode(&self) -> Option<&DialogMode> {
        self.mode.as_ref()
    }

    /// Identifies the current opening; `None` while closed
    pub fn session(&self) -> Option<u64> {
        self.mode.as_ref().map(|_| self.session)
    }

    /// Id of the task being edited
    pub fn target_id(&self) -> Option<&str> {
        match &self.mode {
            Some(DialogMode::Edit { id }) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            Some(DialogMode::Edit { .. }) => "Edit todo",
            _ => "New todo",
        }
    }

    /// Open on an empty draft for `date`. Without a start time the next half-hour slot is used.
    pub fn open_for_add(&mut self, date: &str, start_time: Option<&str>) {
        let start = start_time
            .map(str::to_string)
            .unwrap_or_else(current_rounded_time);
        self.draft = Draft {
            date: Some(date.to_string()),
            end_time: default_end_time(&start),
            start_time: start,
            ..Draft::default()
        };
        self.mode = Some(DialogMode::Add);
        self.session += 1;
    }

    pub fn open_for_edit(&mut self, todo: &Todo) {
        self.draft = Draft {
            name: todo.name.clone(),
            date: Some(todo.date.clone()),
            start_time: todo.start_time.clone(),
            end_time: todo.end_time.clone(),
            done: todo.done,
        };
        self.mode = Some(DialogMode::Edit { id: todo.id.clone() });
        self.session += 1;
    }

    pub fn close(&mut self) {
        self.mode = None;
        self.reset();
    }

    /// Close only if the dialog is still the opening identified by `session`
    pub fn close_session(&mut self, session: u64) -> bool {
        if self.session() != Some(session) {
            return false;
        }
        self.close();
        true
    }

    /// Clear the draft back to its empty default
    pub fn reset(&mut self) {
        self.draft = Draft::default();
    }

    #[allow(dead_code)]
    pub fn snapshot(&self) -> Draft {
        self.draft.clone()
    }

    #[allow(dead_code)]
    pub fn restore(&mut self, draft: Draft) {
        self.draft = draft;
    }

    /// Validate the draft and turn it into a request.
    /// `None` when the dialog is closed or validation failed; the dialog stays open.
    pub fn commit(&self, now: NaiveDateTime, notifier: &mut dyn Notifier) -> Option<TodoRequest> {
        let mode = self.mode.as_ref()?;
        let form = self.draft.to_form();
        if !validate_form(&form, now, notifier) {
            return None;
        }

        let request = match mode {
            DialogMode::Add => TodoRequest::Add(form),
            DialogMode::Edit { id } => TodoRequest::Update {
                id: id.clone(),
                update: TodoUpdate {
                    name: form.name,
                    date: form.date.unwrap_or_default(),
                    start_time: Some(form.start_time),
                    end_time: Some(form.end_time),
                },
            },
        };
        Some(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{sample_todos, MockTodoApi};
    use crate::todo::notify::{NoticeKind, NoticeLog};
    use crate::todo::store::TodoStore;
    use chrono::{NaiveDate, NaiveTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 25)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn starts_closed_with_empty_draft() {
        let dialog = DialogController::new();
        assert!(!dialog.is_open());
        assert_eq!(dialog.draft.date, None);
        assert_eq!(dialog.draft.start_time, "00:00");
        assert_eq!(dialog.draft.end_time, "00:00");
    }

    #[test]
    fn add_with_explicit_start() {
        let mut dialog = DialogController::new();
        dialog.open_for_add("2025-02-26", Some("09:30"));

        assert_eq!(dialog.mode(), Some(&DialogMode::Add));
        assert_eq!(dialog.draft.date.as_deref(), Some("2025-02-26"));
        assert_eq!(dialog.draft.start_time, "09:30");
        assert_eq!(dialog.draft.end_time, "10:30");
        assert_eq!(dialog.target_id(), None);
    }

    #[test]
    fn add_defaults_to_next_slot() {
        let mut dialog = DialogController::new();
        dialog.open_for_add("2025-02-26", None);

        let start = NaiveTime::parse_from_str(&dialog.draft.start_time, "%H:%M").unwrap();
        assert!(start.format("%M").to_string() == "00" || start.format("%M").to_string() == "30");
        assert_eq!(dialog.draft.end_time, default_end_time(&dialog.draft.start_time));
    }

    #[test]
    fn edit_copies_the_task_and_close_resets() {
        let todo = sample_todos().remove(0);
        let mut dialog = DialogController::new();
        dialog.open_for_edit(&todo);

        assert_eq!(dialog.target_id(), Some("1"));
        assert_eq!(dialog.title(), "Edit todo");
        assert_eq!(dialog.draft.name, "Learn Vue 2");
        assert_eq!(dialog.draft.start_time, "09:00");
        assert!(dialog.draft.done);

        dialog.close();
        assert!(!dialog.is_open());
        assert_eq!(dialog.target_id(), None);
        assert_eq!(dialog.draft, Draft::default());
    }

    #[test]
    fn reopening_reinitializes() {
        let todo = sample_todos().remove(1);
        let mut dialog = DialogController::new();
        dialog.open_for_edit(&todo);
        dialog.open_for_add("2025-03-01", Some("08:00"));

        assert_eq!(dialog.mode(), Some(&DialogMode::Add));
        assert!(dialog.draft.name.is_empty());
        assert!(!dialog.draft.done);
    }

    #[test]
    fn late_close_leaves_a_newer_opening_alone() {
        let mut dialog = DialogController::new();
        assert_eq!(dialog.session(), None);

        dialog.open_for_add("2025-02-26", Some("09:00"));
        let first = dialog.session().unwrap();
        dialog.close();
        assert!(!dialog.close_session(first));

        dialog.open_for_add("2025-02-27", Some("10:00"));
        dialog.draft.name = "Unsaved".to_string();
        assert!(!dialog.close_session(first));
        assert!(dialog.is_open());
        assert_eq!(dialog.draft.name, "Unsaved");

        let second = dialog.session().unwrap();
        assert_ne!(first, second);
        assert!(dialog.close_session(second));
        assert!(!dialog.is_open());
    }

    #[test]
    fn snapshot_and_restore() {
        let mut dialog = DialogController::new();
        dialog.open_for_add("2025-02-26", Some("09:00"));
        dialog.draft.name = "Draft".to_string();
        let saved = dialog.snapshot();

        dialog.reset();
        assert!(dialog.draft.name.is_empty());
        dialog.restore(saved);
        assert_eq!(dialog.draft.name, "Draft");
    }

    #[test]
    fn commit_builds_requests() {
        let mut log = NoticeLog::default();
        let mut dialog = DialogController::new();
        assert_eq!(dialog.commit(now(), &mut log), None);

        dialog.open_for_add("2025-02-26", Some("09:00"));
        dialog.draft.name = "  Plan sprint ".to_string();
        match dialog.commit(now(), &mut log) {
            Some(TodoRequest::Add(form)) => {
                assert_eq!(form.name, "Plan sprint");
                assert_eq!(form.end_time, "10:00");
            }
            other => panic!("unexpected {:?}", other),
        }

        let todo = sample_todos().remove(2);
        dialog.open_for_edit(&todo);
        match dialog.commit(now(), &mut log) {
            Some(TodoRequest::Update { id, update }) => {
                assert_eq!(id, "3");
                assert_eq!(update.date, "2025-02-27");
                assert_eq!(update.start_time.as_deref(), Some("10:00"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(log.notices.is_empty());
    }

    #[tokio::test]
    async fn invalid_range_never_reaches_the_server() {
        let api = MockTodoApi::seeded();
        let mut store = TodoStore::new(now().date());
        let mut log = NoticeLog::default();
        let mut dialog = DialogController::new();

        dialog.open_for_add("2025-02-26", Some("09:00"));
        dialog.draft.name = "Backwards".to_string();
        dialog.draft.end_time = "08:00".to_string();

        if let Some(request) = dialog.commit(now(), &mut log) {
            store.dispatch(&api, request, &mut log).await;
        }

        assert_eq!(api.request_count(), 0);
        assert!(dialog.is_open());
        assert_eq!(
            log.last(),
            Some(&(NoticeKind::Error, "start must be before end".to_string()))
        );
    }

    #[tokio::test]
    async fn valid_draft_round_trips_through_the_store() {
        let api = MockTodoApi::seeded();
        let mut store = TodoStore::new(now().date());
        let mut log = NoticeLog::default();
        let mut dialog = DialogController::new();

        dialog.open_for_add("2025-02-26", Some("16:00"));
        dialog.draft.name = "Review".to_string();
        let request = dialog.commit(now(), &mut log).unwrap();
        assert!(store.dispatch(&api, request, &mut log).await);
        dialog.close();

        assert_eq!(store.tasks().len(), 5);
        assert_eq!(store.todos_by_date()["2025-02-26"].not_done.len(), 2);
    }
}
