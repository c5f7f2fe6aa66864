use crate::types::JsonValue;

/// One decoded API response
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Decoded JSON body (`Null` for an empty body)
    pub body: JsonValue,
    /// Absolute URL of the next page, if the server announced one
    pub next: Option<String>,
}

impl Page {
    /// Create a page
    pub fn new(body: JsonValue, next: Option<String>) -> Self {
        Self { body, next }
    }

    /// Create a page with no successor
    pub fn last(body: JsonValue) -> Self {
        Self { body, next: None }
    }

    /// Create a page that links to `next`
    pub fn linked(body: JsonValue, next: impl Into<String>) -> Self {
        Self {
            body,
            next: Some(next.into()),
        }
    }

    /// Number of records if the body is a collection
    pub fn record_count(&self) -> Option<usize> {
        self.body.as_array().map(Vec::len)
    }
}
