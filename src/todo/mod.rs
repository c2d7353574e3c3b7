pub mod dialog;
pub mod notify;
pub mod store;
pub mod validate;

pub use dialog::DialogController;
pub use notify::{NoticeKind, Notifier};
pub use store::{completion_rate, TodoGroup, TodoOp, TodoRequest, TodoStore};
