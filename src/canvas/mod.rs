//! Canvas API client
//!
//! One method per remote action. Every method performs a single logical
//! fetch: collection endpoints transparently follow `rel="next"` links until
//! the whole collection has been read. Results are returned verbatim as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use canvas_mcp::canvas::CanvasClient;
//! use canvas_mcp::ids::validate_course_id;
//!
//! let client = CanvasClient::new("token", "school.instructure.com")?;
//! let assignments = client.list_assignments(validate_course_id(42)?).await?;
//! ```

mod client;
mod requests;

pub use client::{api_base_url, CanvasClient, CanvasClientConfig};
pub use requests::{EnrollmentRequest, Grade, GradeRequest, SubmissionRequest};

#[cfg(test)]
mod tests;
