//! Common types used throughout canvas-mcp
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type, used as the field bag for mutations
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Ordered query parameters; keys may repeat (`include[]=a&include[]=b`)
pub type QueryParams = Vec<(String, String)>;

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Enrollment Defaults
// ============================================================================

/// Enrollment type used when the caller does not name one
pub const DEFAULT_ENROLLMENT_ROLE: &str = "StudentEnrollment";

/// Enrollment state used when the caller does not name one
pub const DEFAULT_ENROLLMENT_STATE: &str = "active";
