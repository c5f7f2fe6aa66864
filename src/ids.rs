//! Entity identifiers
//!
//! Canvas identifies every entity with a positive integer. Each id domain gets
//! its own newtype so a course id can never be passed where a user id is
//! expected. Values arrive from callers as either JSON numbers or numeric
//! strings (some Canvas endpoints accept both), so decoding goes through the
//! explicit [`IdInput`] union and is validated before any request is built.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw identifier as supplied by a caller
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    /// A JSON number
    Number(serde_json::Number),
    /// A string that should hold a number
    Text(String),
}

impl IdInput {
    /// The value as a positive integer, if it is one
    pub fn as_positive_integer(&self) -> Option<u64> {
        match self {
            Self::Number(n) => {
                if let Some(v) = n.as_u64() {
                    return (v > 0).then_some(v);
                }
                // 42.0 is still an integer
                let f = n.as_f64()?;
                (f.fract() == 0.0 && f >= 1.0 && f <= u64::MAX as f64).then(|| f as u64)
            }
            Self::Text(s) => s.trim().parse::<u64>().ok().filter(|v| *v > 0),
        }
    }
}

impl fmt::Display for IdInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for IdInput {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for IdInput {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for IdInput {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for IdInput {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map_or_else(|| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<&str> for IdInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&JsonValue> for IdInput {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Number(n) => Self::Number(n.clone()),
            JsonValue::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal, $validate:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "IdInput", into = "u64")]
        pub struct $name(u64);

        impl $name {
            /// Human-readable name of this id domain
            pub const LABEL: &'static str = $label;

            /// Wrap a raw value, rejecting zero
            pub fn new(value: u64) -> Result<Self> {
                $validate(value)
            }

            /// The underlying integer
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl TryFrom<IdInput> for $name {
            type Error = Error;

            fn try_from(input: IdInput) -> Result<Self> {
                input
                    .as_positive_integer()
                    .map(Self)
                    .ok_or_else(|| invalid_id($label, &input))
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        #[doc = concat!("Validate a ", $label, " id: it must be a positive integer")]
        pub fn $validate(value: impl Into<IdInput>) -> Result<$name> {
            $name::try_from(value.into())
        }
    };
}

fn invalid_id(label: &str, input: &IdInput) -> Error {
    Error::validation(format!("Invalid {label} ID: {input}"))
}

entity_id!(
    /// Course identifier
    CourseId,
    "course",
    validate_course_id
);
entity_id!(
    /// Assignment identifier
    AssignmentId,
    "assignment",
    validate_assignment_id
);
entity_id!(
    /// User identifier
    UserId,
    "user",
    validate_user_id
);
entity_id!(
    /// Enrollment identifier
    EnrollmentId,
    "enrollment",
    validate_enrollment_id
);
entity_id!(
    /// Quiz identifier
    QuizId,
    "quiz",
    validate_quiz_id
);
entity_id!(
    /// Module identifier
    ModuleId,
    "module",
    validate_module_id
);
entity_id!(
    /// Module item identifier
    ModuleItemId,
    "module item",
    validate_module_item_id
);
entity_id!(
    /// Discussion topic identifier
    TopicId,
    "discussion topic",
    validate_topic_id
);
entity_id!(
    /// File identifier
    FileId,
    "file",
    validate_file_id
);
entity_id!(
    /// Account identifier
    AccountId,
    "account",
    validate_account_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(1 ; "one")]
    #[test_case(42 ; "small")]
    #[test_case(9_007_199_254_740_991 ; "large")]
    fn test_positive_ids_pass_through(value: u64) {
        assert_eq!(validate_course_id(value).unwrap().get(), value);
        assert_eq!(validate_assignment_id(value).unwrap().get(), value);
        assert_eq!(validate_user_id(value).unwrap().get(), value);
        assert_eq!(validate_enrollment_id(value).unwrap().get(), value);
    }

    #[test_case(IdInput::from(0u64), "0" ; "zero")]
    #[test_case(IdInput::from(-3i64), "-3" ; "negative")]
    #[test_case(IdInput::from(1.5f64), "1.5" ; "fraction")]
    #[test_case(IdInput::from("abc"), "abc" ; "text")]
    #[test_case(IdInput::from(""), "" ; "empty")]
    fn test_invalid_ids_name_the_value(input: IdInput, shown: &str) {
        let err = validate_course_id(input).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
        assert_eq!(err.to_string(), format!("Invalid course ID: {shown}"));
    }

    #[test]
    fn test_error_message_uses_domain_label() {
        let err = validate_enrollment_id(0u64).unwrap_err();
        assert_eq!(err.to_string(), "Invalid enrollment ID: 0");

        let err = validate_topic_id(-1i64).unwrap_err();
        assert_eq!(err.to_string(), "Invalid discussion topic ID: -1");
    }

    #[test]
    fn test_numeric_strings_and_whole_floats_are_accepted() {
        assert_eq!(validate_course_id("17").unwrap().get(), 17);
        assert_eq!(validate_course_id(17.0f64).unwrap().get(), 17);
        assert_eq!(validate_user_id(&json!("9")).unwrap().get(), 9);
    }

    #[test]
    fn test_non_scalar_json_is_rejected() {
        let err = validate_user_id(&json!([1])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid user ID: [1]");

        let err = validate_user_id(&json!(true)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid user ID: true");
    }

    #[test]
    fn test_serde_round_trip() {
        let id: CourseId = serde_json::from_value(json!("5")).unwrap();
        assert_eq!(serde_json::to_value(id).unwrap(), json!(5));

        let err = serde_json::from_value::<CourseId>(json!(0)).unwrap_err();
        assert!(err.to_string().contains("Invalid course ID: 0"));
    }
}
