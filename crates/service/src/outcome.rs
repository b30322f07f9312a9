//! Uniform result record of the mutating service operations.

use serde::{Deserialize, Serialize};

pub const NOTIFICATION: &str = "Notification!";
pub const ALERT: &str = "Alert!";
pub const ERROR: &str = "Error!";

/// Toast severity shown by the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: bool,
    pub message: String,
    pub level: Level,
    pub title: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self { status: true, message: message.into(), level: Level::Success, title: NOTIFICATION.into() }
    }

    /// The store reported no effect, or rejected the input.
    pub fn failure(message: impl Into<String>) -> Self {
        Self { status: false, message: message.into(), level: Level::Error, title: ALERT.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: false, message: message.into(), level: Level::Warning, title: ALERT.into() }
    }

    /// Unexpected error; `message` is the error's own text.
    pub fn exception(message: impl Into<String>) -> Self {
        Self { status: false, message: message.into(), level: Level::Warning, title: ERROR.into() }
    }

    pub fn is_success(&self) -> bool { self.status }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_follow_the_toast_contract() {
        let ok = Outcome::success("New Organization Created");
        assert!(ok.is_success());
        assert_eq!((ok.level, ok.title.as_str()), (Level::Success, NOTIFICATION));

        let failed = Outcome::failure("New Organization Creation Failed");
        assert!(!failed.status);
        assert_eq!((failed.level, failed.title.as_str()), (Level::Error, ALERT));

        let missing = Outcome::not_found("Organization Model Not Found");
        assert_eq!((missing.level, missing.title.as_str()), (Level::Warning, ALERT));

        let boom = Outcome::exception("database error: disk full");
        assert_eq!((boom.level, boom.title.as_str()), (Level::Warning, ERROR));
        assert_eq!(boom.message, "database error: disk full");
    }

    #[test]
    fn serializes_with_lowercase_level() {
        let v = serde_json::to_value(Outcome::success("Market is Restored")).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"status": true, "message": "Market is Restored", "level": "success", "title": "Notification!"})
        );
    }
}
