use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single time-boxed task as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub name: String,
    pub date: String,
    #[serde(rename = "startTime", default)]
    pub start_time: String,
    #[serde(rename = "endTime", default)]
    pub end_time: String,
    #[serde(default)]
    pub done: bool,
}

impl Todo {
    /// Parsed calendar date, `None` when the stored string is not "YYYY-MM-DD"
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoForm {
    pub name: String,
    pub date: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

impl Default for TodoForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            date: None,
            start_time: "00:00".to_string(),
            end_time: "00:00".to_string(),
        }
    }
}

/// Body of an update request; time fields are only replaced when present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    pub name: String,
    pub date: String,
    #[serde(rename = "startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// Response envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub code: u16,
    #[serde(default)]
    pub data: Vec<Todo>,
    #[serde(default)]
    pub message: String,
}

impl ApiResponse {
    pub fn ok(data: Vec<Todo>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: 200,
            data,
            message: message.into(),
        }
    }

    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            data: Vec::new(),
            message: message.into(),
        }
    }

    /// Unwrap the snapshot, treating `success: false` as an error
    pub fn into_result(self) -> Result<Vec<Todo>, ApiError> {
        if self.success {
            Ok(self.data)
        } else if self.code == 404 {
            Err(ApiError::NotFound(self.message))
        } else {
            Err(ApiError::Rejected {
                code: self.code,
                message: self.message,
            })
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{message}")]
    Rejected { code: u16, message: String },
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    /// Message suitable for the user: the server's own text when it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } | ApiError::NotFound(message)
                if !message.trim().is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Whether the failure happened below the envelope (network, HTTP, JSON)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(_) | ApiError::Status { .. } | ApiError::Decode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_uses_camel_case_on_the_wire() {
        let json = r#"{"id":"1","name":"Learn Vue 2","done":true,"date":"2025-02-26","startTime":"09:00","endTime":"12:00"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.start_time, "09:00");
        assert_eq!(todo.end_time, "12:00");
        assert!(todo.done);
        assert_eq!(todo.naive_date(), NaiveDate::from_ymd_opt(2025, 2, 26));

        let back = serde_json::to_value(&todo).unwrap();
        assert_eq!(back["startTime"], "09:00");
    }

    #[test]
    fn update_omits_missing_times() {
        let update = TodoUpdate {
            name: "Walk".to_string(),
            date: "2025-02-26".to_string(),
            start_time: None,
            end_time: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert!(value.get("startTime").is_none());
        assert_eq!(value["name"], "Walk");
    }

    #[test]
    fn envelope_failures_map_to_errors() {
        let rejected = ApiResponse::failure(500, "boom").into_result().unwrap_err();
        assert!(matches!(rejected, ApiError::Rejected { code: 500, .. }));
        assert_eq!(rejected.server_message(), Some("boom"));
        assert!(!rejected.is_transport());

        let missing = ApiResponse::failure(404, "todo not found").into_result().unwrap_err();
        assert!(matches!(missing, ApiError::NotFound(_)));

        let body = r#"{"success":false,"code":503,"message":""}"#;
        let response: ApiResponse = serde_json::from_str(body).unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.server_message(), None);
    }
}
