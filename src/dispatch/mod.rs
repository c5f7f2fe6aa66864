//! Request dispatcher
//!
//! Maps named operations and `type://id` resource addresses onto calls into
//! the [`CanvasClient`]:
//!
//! ```text
//! name + args ─▶ lookup ─▶ validate ─▶ Operation::decode ─▶ client call ─▶ ToolResult
//! uri         ─▶ ResourceAddress::parse ─────────────────▶ client call ─▶ ResourceContents
//! ```
//!
//! Operation failures of any kind are folded into an error [`ToolResult`].
//! Resource failures are returned to the caller as errors.

mod envelope;
mod resources;

#[cfg(test)]
pub(crate) mod fake;

pub use envelope::{Content, ToolResult};
pub use resources::{
    CourseSummary, ResourceAddress, ResourceContents, ResourceEntry, ResourceType, JSON_MIME,
};

use crate::canvas::CanvasClient;
use crate::catalogue::{self, Operation, OperationDescriptor};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use tracing::{debug, info, warn};

/// Dispatches operations and resource reads to a Canvas client
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: CanvasClient,
}

impl Dispatcher {
    pub fn new(client: CanvasClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CanvasClient {
        &self.client
    }

    // ============================================================================
    // Operations
    // ============================================================================

    /// Every operation, in catalogue order
    pub fn list_operations(&self) -> &'static [OperationDescriptor] {
        catalogue::CATALOGUE.as_slice()
    }

    /// Run a named operation, returning a success or error envelope.
    ///
    /// Missing `args` are treated as an empty object.
    pub async fn call_operation(&self, name: &str, args: Option<&JsonValue>) -> ToolResult {
        let empty = JsonValue::Object(serde_json::Map::new());
        let args = args.unwrap_or(&empty);

        match self.try_call(name, args).await {
            Ok(text) => ToolResult::success(text),
            Err(e) => {
                warn!("Operation {} failed: {}", name, e);
                ToolResult::failure(&e)
            }
        }
    }

    async fn try_call(&self, name: &str, args: &JsonValue) -> Result<String> {
        let descriptor = catalogue::lookup(name).ok_or_else(|| Error::UnknownOperation {
            name: name.to_string(),
        })?;
        descriptor.validate(args)?;
        let op = Operation::decode(name, args)?;

        if op.is_mutation() {
            info!("Running {}", name);
        } else {
            debug!("Running {}", name);
        }
        self.execute(op).await
    }

    /// Invoke the single client call an operation maps to
    async fn execute(&self, op: Operation) -> Result<String> {
        let c = &self.client;
        let body = match op {
            Operation::ListCourses => c.list_courses().await?,
            Operation::GetCourse { course_id } => c.get_course(course_id).await?,
            Operation::CreateCourse { fields } => c.create_course(fields).await?,
            Operation::UpdateCourse { course_id, fields } => {
                c.update_course(course_id, fields).await?
            }
            Operation::DeleteCourse { course_id } => c.delete_course(course_id).await?,

            Operation::ListAssignments { course_id } => c.list_assignments(course_id).await?,
            Operation::GetAssignment {
                course_id,
                assignment_id,
            } => c.get_assignment(course_id, assignment_id).await?,
            Operation::CreateAssignment { course_id, fields } => {
                c.create_assignment(course_id, fields).await?
            }
            Operation::UpdateAssignment {
                course_id,
                assignment_id,
                fields,
            } => c.update_assignment(course_id, assignment_id, fields).await?,
            Operation::DeleteAssignment {
                course_id,
                assignment_id,
            } => c.delete_assignment(course_id, assignment_id).await?,

            Operation::ListSubmissions {
                course_id,
                assignment_id,
            } => c.list_submissions(course_id, assignment_id).await?,
            Operation::GetSubmission {
                course_id,
                assignment_id,
                user_id,
            } => c.get_submission(course_id, assignment_id, user_id).await?,
            Operation::SubmitGrade {
                course_id,
                assignment_id,
                user_id,
                request,
            } => {
                c.submit_grade(course_id, assignment_id, user_id, &request)
                    .await?
            }
            Operation::SubmitAssignment {
                course_id,
                assignment_id,
                user_id,
                request,
            } => {
                c.submit_assignment(course_id, assignment_id, user_id, &request)
                    .await?
            }

            Operation::ListUsers { course_id } => c.list_users(course_id).await?,
            Operation::ListEnrollments { course_id } => c.list_enrollments(course_id).await?,
            Operation::EnrollUser { course_id, request } => {
                c.enroll_user(course_id, &request).await?
            }
            Operation::UnenrollUser {
                course_id,
                enrollment_id,
            } => c.unenroll_user(course_id, enrollment_id).await?,
            Operation::GetCourseGrades { course_id } => c.get_course_grades(course_id).await?,

            Operation::GetUserProfile => c.get_user_profile().await?,
            Operation::ListStudentCourses => c.list_student_courses().await?,

            Operation::ListQuizzes { course_id } => c.list_quizzes(course_id).await?,
            Operation::GetQuiz { course_id, quiz_id } => c.get_quiz(course_id, quiz_id).await?,
            Operation::CreateQuiz { course_id, fields } => {
                c.create_quiz(course_id, fields).await?
            }
            Operation::UpdateQuiz {
                course_id,
                quiz_id,
                fields,
            } => c.update_quiz(course_id, quiz_id, fields).await?,
            Operation::DeleteQuiz { course_id, quiz_id } => {
                c.delete_quiz(course_id, quiz_id).await?;
                return Ok(format!("Quiz {quiz_id} deleted successfully."));
            }

            Operation::ListModules { course_id } => c.list_modules(course_id).await?,
            Operation::GetModule {
                course_id,
                module_id,
            } => c.get_module(course_id, module_id).await?,
            Operation::ListModuleItems {
                course_id,
                module_id,
            } => c.list_module_items(course_id, module_id).await?,
            Operation::GetModuleItem {
                course_id,
                module_id,
                item_id,
            } => c.get_module_item(course_id, module_id, item_id).await?,

            Operation::ListDiscussionTopics { course_id } => {
                c.list_discussion_topics(course_id).await?
            }
            Operation::GetDiscussionTopic {
                course_id,
                topic_id,
            } => c.get_discussion_topic(course_id, topic_id).await?,
            Operation::ListAnnouncements { course_id } => c.list_announcements(course_id).await?,

            Operation::ListFiles { course_id } => c.list_files(course_id).await?,
            Operation::GetFile { file_id } => c.get_file(file_id).await?,

            Operation::ListScopes {
                account_id,
                group_by,
            } => {
                let group_by = group_by.as_ref().map(query_text);
                c.list_scopes(account_id, group_by.as_deref()).await?
            }
        };

        Ok(serde_json::to_string_pretty(&body)?)
    }

    // ============================================================================
    // Resources
    // ============================================================================

    /// Read a `type://id` resource; failures propagate
    pub async fn read_resource(&self, uri: &str) -> Result<ResourceContents> {
        let address = ResourceAddress::parse(uri)?;
        debug!("Reading resource {}", address);

        let c = &self.client;
        let body = match address {
            ResourceAddress::AllCourses => c.list_courses().await?,
            ResourceAddress::PerCourse(kind, course_id) => match kind {
                ResourceType::Course => c.get_course(course_id).await?,
                ResourceType::Assignments => c.list_assignments(course_id).await?,
                ResourceType::Users => c.list_users(course_id).await?,
                ResourceType::Grades => c.get_course_grades(course_id).await?,
                ResourceType::Quizzes => c.list_quizzes(course_id).await?,
                ResourceType::Modules => c.list_modules(course_id).await?,
                ResourceType::DiscussionTopics => c.list_discussion_topics(course_id).await?,
                ResourceType::Announcements => c.list_announcements(course_id).await?,
                ResourceType::Courses => c.list_courses().await?,
            },
        };

        Ok(ResourceContents {
            uri: uri.to_string(),
            mime_type: JSON_MIME,
            text: serde_json::to_string_pretty(&body)?,
        })
    }

    /// Enumerate `courses://list` plus every per-course family for every course.
    ///
    /// Computed fresh on each call.
    pub async fn list_resources(&self) -> Result<Vec<ResourceEntry>> {
        let courses = self.client.list_courses().await?;
        let records = courses.as_array().map(Vec::as_slice).unwrap_or_default();

        let summaries: Vec<CourseSummary> = records
            .iter()
            .filter_map(|record| {
                let summary = CourseSummary::from_record(record);
                if summary.is_none() {
                    warn!("Skipping course without a numeric id: {}", record);
                }
                summary
            })
            .collect();

        let mut entries = Vec::with_capacity(1 + ResourceType::PER_COURSE.len() * summaries.len());
        entries.push(ResourceEntry::all_courses());
        for kind in ResourceType::PER_COURSE {
            entries.extend(
                summaries
                    .iter()
                    .map(|course| ResourceEntry::for_course(kind, course)),
            );
        }

        debug!(
            "Enumerated {} resources for {} courses",
            entries.len(),
            summaries.len()
        );
        Ok(entries)
    }
}

/// Render a pass-through argument as a query parameter value
fn query_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}
