/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// Sink for user-facing messages; how they are shown is up to the implementor
pub trait Notifier {
    fn notify(&mut self, kind: NoticeKind, text: &str);
}

/// Keeps every notice, newest last
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct NoticeLog {
    pub notices: Vec<(NoticeKind, String)>,
}

#[cfg(test)]
impl NoticeLog {
    pub fn last(&self) -> Option<&(NoticeKind, String)> {
        self.notices.last()
    }
}

#[cfg(test)]
impl Notifier for NoticeLog {
    fn notify(&mut self, kind: NoticeKind, text: &str) {
        match kind {
            NoticeKind::Error => log::warn!("{}", text),
            _ => log::info!("{}", text),
        }
        self.notices.push((kind, text.to_string()));
    }
}
