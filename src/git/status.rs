//! Outcome status of a per-repository action

use serde::Serialize;

/// Terminal state of one repository in a dispatch cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// git was invoked and succeeded
    Ok,
    /// git was invoked and failed, or timed out
    Failed,
    /// The eligibility rule excluded the repository; git was not invoked
    Skipped,
}

impl Status {
    /// Returns the text representation of this status
    pub fn text(&self) -> &str {
        match self {
            Status::Ok => "ok",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
        }
    }

    /// Bracketed form used on outcome lines, e.g. `[failed]`
    pub fn tag(&self) -> String {
        format!("[{}]", self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Ok.text(), "ok");
        assert_eq!(Status::Failed.text(), "failed");
        assert_eq!(Status::Skipped.text(), "skipped");
    }

    #[test]
    fn test_status_tag_is_bracketed() {
        assert_eq!(Status::Failed.tag(), "[failed]");
        assert_eq!(Status::Skipped.tag(), "[skipped]");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&Status::Skipped).expect("serialize");
        assert_eq!(json, "\"skipped\"");
    }
}
