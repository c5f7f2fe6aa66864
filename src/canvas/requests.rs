//! Typed request payloads for the mutations that need more than a field bag

use crate::ids::UserId;
use crate::types::{DEFAULT_ENROLLMENT_ROLE, DEFAULT_ENROLLMENT_STATE};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A grade: points or a letter/percentage string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    /// Numeric score
    Points(serde_json::Number),
    /// Letter grade, percentage ("85%"), "pass"/"fail", ...
    Text(String),
}

/// Posting a grade (and optional comment) on a submission
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRequest {
    pub grade: Grade,
    /// Passed to Canvas as `text_comment` without type checks
    pub comment: Option<Value>,
}

impl GradeRequest {
    pub(crate) fn to_body(&self) -> Value {
        let mut submission = json!({ "posted_grade": self.grade });
        if let Some(comment) = &self.comment {
            submission["comment"] = json!({ "text_comment": comment });
        }
        json!({ "submission": submission })
    }
}

/// Enrolling a user in a course
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentRequest {
    pub user_id: UserId,
    pub role: Option<Value>,
    pub enrollment_state: Option<Value>,
}

impl EnrollmentRequest {
    /// Enroll as an active student
    pub fn student(user_id: UserId) -> Self {
        Self {
            user_id,
            role: None,
            enrollment_state: None,
        }
    }

    pub(crate) fn to_body(&self) -> Value {
        json!({
            "enrollment": {
                "user_id": self.user_id,
                "type": self.role.clone().unwrap_or_else(|| json!(DEFAULT_ENROLLMENT_ROLE)),
                "enrollment_state": self
                    .enrollment_state
                    .clone()
                    .unwrap_or_else(|| json!(DEFAULT_ENROLLMENT_STATE)),
            }
        })
    }
}

/// Submitting an assignment on behalf of a user
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    /// `online_text_entry`, `online_url`, `online_upload`, ...
    pub submission_type: String,
    /// Text body or URL, depending on the submission type
    pub body: Option<Value>,
}

impl SubmissionRequest {
    pub(crate) fn to_body(&self) -> Value {
        let mut submission = json!({ "submission_type": self.submission_type });
        if let Some(body) = &self.body {
            submission["body"] = body.clone();
        }
        json!({ "submission": submission })
    }
}
