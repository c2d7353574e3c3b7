use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use super::notify::{NoticeKind, Notifier};
use crate::api::time::parse_time_to_minutes;
use crate::api::TodoForm;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("fill in all fields")]
    MissingFields,
    #[error("invalid date or time")]
    InvalidDateTime,
    #[error("time cannot be earlier than now")]
    StartInPast,
    #[error("start must be before end")]
    StartNotBeforeEnd,
}

/// Check a draft against `now`. Checks run in order and stop at the first failure.
pub fn check_form(form: &TodoForm, now: NaiveDateTime) -> Result<(), ValidationError> {
    let date = form.date.as_deref().unwrap_or("").trim();
    if form.name.trim().is_empty()
        || date.is_empty()
        || form.start_time.trim().is_empty()
        || form.end_time.trim().is_empty()
    {
        return Err(ValidationError::MissingFields);
    }

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDateTime)?;
    let start = NaiveTime::parse_from_str(form.start_time.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidDateTime)?;
    if date.and_time(start) < now {
        return Err(ValidationError::StartInPast);
    }

    if parse_time_to_minutes(&form.start_time) >= parse_time_to_minutes(&form.end_time) {
        return Err(ValidationError::StartNotBeforeEnd);
    }

    Ok(())
}

/// Validate a draft, reporting the first problem through `notifier`
pub fn validate_form(form: &TodoForm, now: NaiveDateTime, notifier: &mut dyn Notifier) -> bool {
    match check_form(form, now) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Rejected draft {:?}: {}", form, e);
            notifier.notify(NoticeKind::Error, &e.to_string());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::notify::NoticeLog;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 25)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn form(name: &str, date: Option<&str>, start: &str, end: &str) -> TodoForm {
        TodoForm {
            name: name.to_string(),
            date: date.map(String::from),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    #[test]
    fn accepts_a_future_task() {
        let draft = form("Learn Rust", Some("2025-02-26"), "09:00", "10:00");
        assert_eq!(check_form(&draft, now()), Ok(()));
    }

    #[test]
    fn every_field_is_required() {
        let cases = [
            form("", Some("2025-02-26"), "09:00", "10:00"),
            form("   ", Some("2025-02-26"), "09:00", "10:00"),
            form("x", None, "09:00", "10:00"),
            form("x", Some(""), "09:00", "10:00"),
            form("x", Some("2025-02-26"), "", "10:00"),
            form("x", Some("2025-02-26"), "09:00", ""),
        ];
        for draft in &cases {
            assert_eq!(check_form(draft, now()), Err(ValidationError::MissingFields), "{:?}", draft);
        }
    }

    #[test]
    fn start_in_the_past_is_rejected() {
        let earlier_today = form("x", Some("2025-02-25"), "11:30", "13:00");
        assert_eq!(check_form(&earlier_today, now()), Err(ValidationError::StartInPast));

        let exactly_now = form("x", Some("2025-02-25"), "12:00", "13:00");
        assert_eq!(check_form(&exactly_now, now()), Ok(()));
    }

    #[test]
    fn start_must_precede_end() {
        let reversed = form("x", Some("2025-02-26"), "09:00", "08:00");
        assert_eq!(check_form(&reversed, now()), Err(ValidationError::StartNotBeforeEnd));

        let empty_range = form("x", Some("2025-02-26"), "09:00", "09:00");
        assert_eq!(check_form(&empty_range, now()), Err(ValidationError::StartNotBeforeEnd));

        // end past midnight is still after the start
        let late = form("x", Some("2025-02-26"), "23:30", "24:30");
        assert_eq!(check_form(&late, now()), Ok(()));
    }

    #[test]
    fn past_check_runs_before_range_check() {
        let both_wrong = form("x", Some("2025-02-24"), "09:00", "08:00");
        assert_eq!(check_form(&both_wrong, now()), Err(ValidationError::StartInPast));
    }

    #[test]
    fn unparsable_values_are_rejected() {
        let bad_date = form("x", Some("26/02/2025"), "09:00", "10:00");
        assert_eq!(check_form(&bad_date, now()), Err(ValidationError::InvalidDateTime));

        let bad_time = form("x", Some("2025-02-26"), "nine", "10:00");
        assert_eq!(check_form(&bad_time, now()), Err(ValidationError::InvalidDateTime));
    }

    #[test]
    fn failures_are_notified() {
        let mut log = NoticeLog::default();
        let draft = form("x", Some("2025-02-26"), "09:00", "08:00");
        assert!(!validate_form(&draft, now(), &mut log));
        assert_eq!(
            log.last(),
            Some(&(NoticeKind::Error, "start must be before end".to_string()))
        );

        let draft = form("x", Some("2025-02-26"), "09:00", "10:00");
        assert!(validate_form(&draft, now(), &mut log));
        assert_eq!(log.notices.len(), 1);
    }
}
