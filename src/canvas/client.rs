//! Canvas REST client

use super::requests::{EnrollmentRequest, GradeRequest, SubmissionRequest};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig, Transport};
use crate::ids::{
    AccountId, AssignmentId, CourseId, EnrollmentId, FileId, ModuleId, ModuleItemId, QuizId,
    TopicId, UserId,
};
use crate::pagination::{collect_pages, PageLimits};
use crate::types::{JsonObject, JsonValue};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Build the API root for a Canvas domain (`https://<domain>/api/v1`).
///
/// A scheme or trailing path on `domain` is tolerated and stripped.
pub fn api_base_url(domain: &str) -> Result<String> {
    let host = domain
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    if host.is_empty() {
        return Err(Error::missing_config("domain"));
    }
    let url = Url::parse(&format!("https://{host}/api/v1"))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Everything needed to build a [`CanvasClient`]
#[derive(Debug, Clone)]
pub struct CanvasClientConfig {
    /// Channel configuration; `base_url` and `bearer_token` must be set
    pub http: HttpClientConfig,
    /// Ceiling for one paginated fetch
    pub limits: PageLimits,
    /// `per_page` sent on GET requests
    pub per_page: Option<u32>,
}

impl Default for CanvasClientConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            limits: PageLimits::default(),
            per_page: Some(100),
        }
    }
}

/// Canvas API client
///
/// Owns the authenticated channel for the lifetime of the process.
#[derive(Clone)]
pub struct CanvasClient {
    transport: Arc<dyn Transport>,
    limits: PageLimits,
    per_page: Option<u32>,
}

impl CanvasClient {
    /// Create a client for `https://<domain>/api/v1` authenticated with `token`
    pub fn new(token: &str, domain: &str) -> Result<Self> {
        let http = HttpClientConfig::builder()
            .base_url(api_base_url(domain)?)
            .bearer_token(token)
            .build();
        Self::from_config(CanvasClientConfig {
            http,
            ..CanvasClientConfig::default()
        })
    }

    /// Create a client from a full configuration
    pub fn from_config(config: CanvasClientConfig) -> Result<Self> {
        if config.http.base_url.is_none() {
            return Err(Error::missing_config("base_url"));
        }
        if config.http.bearer_token.as_deref().map_or(true, str::is_empty) {
            return Err(Error::missing_config("api_token"));
        }

        let http = HttpClient::with_config(config.http)?;
        Ok(Self {
            transport: Arc::new(http),
            limits: config.limits,
            per_page: config.per_page,
        })
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            limits: PageLimits::default(),
            per_page: None,
        }
    }

    /// Set the pagination ceiling
    #[must_use]
    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the page size requested from collection endpoints
    #[must_use]
    pub fn with_per_page(mut self, per_page: Option<u32>) -> Self {
        self.per_page = per_page;
        self
    }

    /// Pagination ceiling in use
    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    // ============================================================================
    // Request plumbing
    // ============================================================================

    /// One logical fetch: the initial request plus every follow-up page
    async fn fetch(&self, method: Method, path: &str, config: RequestConfig) -> Result<JsonValue> {
        let first = self.transport.send(method.clone(), path, config).await?;
        let transport = Arc::clone(&self.transport);

        let body = collect_pages(first, &self.limits, move |url| {
            let transport = Arc::clone(&transport);
            async move { transport.send(Method::GET, &url, RequestConfig::new()).await }
        })
        .await?;

        if let Some(records) = body.as_array() {
            debug!("{} {}: {} records", method, path, records.len());
        }
        Ok(body)
    }

    async fn get(&self, path: &str, mut config: RequestConfig) -> Result<JsonValue> {
        if let Some(per_page) = self.per_page {
            if config.query_value("per_page").is_none() {
                config = config.query("per_page", per_page.to_string());
            }
        }
        self.fetch(Method::GET, path, config).await
    }

    async fn post(&self, path: &str, body: JsonValue) -> Result<JsonValue> {
        self.fetch(Method::POST, path, RequestConfig::new().json(body))
            .await
    }

    async fn put(&self, path: &str, body: JsonValue) -> Result<JsonValue> {
        self.fetch(Method::PUT, path, RequestConfig::new().json(body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<JsonValue> {
        self.fetch(Method::DELETE, path, RequestConfig::new()).await
    }

    // ============================================================================
    // Courses
    // ============================================================================

    /// List courses visible to the token, with teachers and student counts
    pub async fn list_courses(&self) -> Result<JsonValue> {
        self.get(
            "/courses",
            RequestConfig::new().query_list("include", ["total_students", "teachers"]),
        )
        .await
    }

    pub async fn get_course(&self, course_id: CourseId) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}"),
            RequestConfig::new().query_list("include", ["total_students", "teachers"]),
        )
        .await
    }

    pub async fn create_course(&self, fields: JsonObject) -> Result<JsonValue> {
        self.post("/courses", json!({ "course": fields })).await
    }

    pub async fn update_course(&self, course_id: CourseId, fields: JsonObject) -> Result<JsonValue> {
        self.put(&format!("/courses/{course_id}"), json!({ "course": fields }))
            .await
    }

    pub async fn delete_course(&self, course_id: CourseId) -> Result<JsonValue> {
        self.delete(&format!("/courses/{course_id}")).await
    }

    // ============================================================================
    // Assignments
    // ============================================================================

    pub async fn list_assignments(&self, course_id: CourseId) -> Result<JsonValue> {
        self.get(&format!("/courses/{course_id}/assignments"), RequestConfig::new())
            .await
    }

    pub async fn get_assignment(
        &self,
        course_id: CourseId,
        assignment_id: AssignmentId,
    ) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/assignments/{assignment_id}"),
            RequestConfig::new(),
        )
        .await
    }

    pub async fn create_assignment(
        &self,
        course_id: CourseId,
        fields: JsonObject,
    ) -> Result<JsonValue> {
        self.post(
            &format!("/courses/{course_id}/assignments"),
            json!({ "assignment": fields }),
        )
        .await
    }

    pub async fn update_assignment(
        &self,
        course_id: CourseId,
        assignment_id: AssignmentId,
        fields: JsonObject,
    ) -> Result<JsonValue> {
        self.put(
            &format!("/courses/{course_id}/assignments/{assignment_id}"),
            json!({ "assignment": fields }),
        )
        .await
    }

    pub async fn delete_assignment(
        &self,
        course_id: CourseId,
        assignment_id: AssignmentId,
    ) -> Result<JsonValue> {
        self.delete(&format!("/courses/{course_id}/assignments/{assignment_id}"))
            .await
    }

    // ============================================================================
    // Submissions
    // ============================================================================

    pub async fn list_submissions(
        &self,
        course_id: CourseId,
        assignment_id: AssignmentId,
    ) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/assignments/{assignment_id}/submissions"),
            RequestConfig::new(),
        )
        .await
    }

    pub async fn get_submission(
        &self,
        course_id: CourseId,
        assignment_id: AssignmentId,
        user_id: UserId,
    ) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/assignments/{assignment_id}/submissions/{user_id}"),
            RequestConfig::new(),
        )
        .await
    }

    /// Post a grade, with an optional text comment
    pub async fn submit_grade(
        &self,
        course_id: CourseId,
        assignment_id: AssignmentId,
        user_id: UserId,
        request: &GradeRequest,
    ) -> Result<JsonValue> {
        self.put(
            &format!("/courses/{course_id}/assignments/{assignment_id}/submissions/{user_id}"),
            request.to_body(),
        )
        .await
    }

    pub async fn submit_assignment(
        &self,
        course_id: CourseId,
        assignment_id: AssignmentId,
        user_id: UserId,
        request: &SubmissionRequest,
    ) -> Result<JsonValue> {
        self.post(
            &format!("/courses/{course_id}/assignments/{assignment_id}/submissions/{user_id}"),
            request.to_body(),
        )
        .await
    }

    // ============================================================================
    // Users, enrollments and grades
    // ============================================================================

    pub async fn list_users(&self, course_id: CourseId) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/users"),
            RequestConfig::new().query_list("include", ["email", "enrollments"]),
        )
        .await
    }

    pub async fn list_enrollments(&self, course_id: CourseId) -> Result<JsonValue> {
        self.get(&format!("/courses/{course_id}/enrollments"), RequestConfig::new())
            .await
    }

    /// Enroll a user; role and state default to an active student enrollment
    pub async fn enroll_user(
        &self,
        course_id: CourseId,
        request: &EnrollmentRequest,
    ) -> Result<JsonValue> {
        self.post(&format!("/courses/{course_id}/enrollments"), request.to_body())
            .await
    }

    pub async fn unenroll_user(
        &self,
        course_id: CourseId,
        enrollment_id: EnrollmentId,
    ) -> Result<JsonValue> {
        self.delete(&format!("/courses/{course_id}/enrollments/{enrollment_id}"))
            .await
    }

    /// Enrollments of a course with their grades attached
    pub async fn get_course_grades(&self, course_id: CourseId) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/enrollments"),
            RequestConfig::new().query_list("include", ["grades"]),
        )
        .await
    }

    // ============================================================================
    // Current user
    // ============================================================================

    /// Profile of the user the token belongs to
    pub async fn get_user_profile(&self) -> Result<JsonValue> {
        self.get("/users/self/profile", RequestConfig::new()).await
    }

    /// Courses of the current user, with their own enrollments
    pub async fn list_student_courses(&self) -> Result<JsonValue> {
        self.get(
            "/courses",
            RequestConfig::new().query_list("include", ["enrollments", "total_students"]),
        )
        .await
    }

    // ============================================================================
    // Modules
    // ============================================================================

    pub async fn list_modules(&self, course_id: CourseId) -> Result<JsonValue> {
        self.get(&format!("/courses/{course_id}/modules"), RequestConfig::new())
            .await
    }

    pub async fn get_module(&self, course_id: CourseId, module_id: ModuleId) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/modules/{module_id}"),
            RequestConfig::new(),
        )
        .await
    }

    pub async fn list_module_items(
        &self,
        course_id: CourseId,
        module_id: ModuleId,
    ) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/modules/{module_id}/items"),
            RequestConfig::new(),
        )
        .await
    }

    pub async fn get_module_item(
        &self,
        course_id: CourseId,
        module_id: ModuleId,
        item_id: ModuleItemId,
    ) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/modules/{module_id}/items/{item_id}"),
            RequestConfig::new(),
        )
        .await
    }

    // ============================================================================
    // Discussions and announcements
    // ============================================================================

    pub async fn list_discussion_topics(&self, course_id: CourseId) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/discussion_topics"),
            RequestConfig::new(),
        )
        .await
    }

    pub async fn get_discussion_topic(
        &self,
        course_id: CourseId,
        topic_id: TopicId,
    ) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/discussion_topics/{topic_id}"),
            RequestConfig::new(),
        )
        .await
    }

    /// Announcements are discussion topics of type `announcement`
    pub async fn list_announcements(&self, course_id: CourseId) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/discussion_topics"),
            RequestConfig::new().query("type", "announcement"),
        )
        .await
    }

    // ============================================================================
    // Quizzes
    // ============================================================================

    pub async fn list_quizzes(&self, course_id: CourseId) -> Result<JsonValue> {
        self.get(&format!("/courses/{course_id}/quizzes"), RequestConfig::new())
            .await
    }

    pub async fn get_quiz(&self, course_id: CourseId, quiz_id: QuizId) -> Result<JsonValue> {
        self.get(
            &format!("/courses/{course_id}/quizzes/{quiz_id}"),
            RequestConfig::new(),
        )
        .await
    }

    pub async fn create_quiz(&self, course_id: CourseId, fields: JsonObject) -> Result<JsonValue> {
        self.post(
            &format!("/courses/{course_id}/quizzes"),
            json!({ "quiz": fields }),
        )
        .await
    }

    pub async fn update_quiz(
        &self,
        course_id: CourseId,
        quiz_id: QuizId,
        fields: JsonObject,
    ) -> Result<JsonValue> {
        self.put(
            &format!("/courses/{course_id}/quizzes/{quiz_id}"),
            json!({ "quiz": fields }),
        )
        .await
    }

    pub async fn delete_quiz(&self, course_id: CourseId, quiz_id: QuizId) -> Result<JsonValue> {
        self.delete(&format!("/courses/{course_id}/quizzes/{quiz_id}"))
            .await
    }

    // ============================================================================
    // Files
    // ============================================================================

    pub async fn list_files(&self, course_id: CourseId) -> Result<JsonValue> {
        self.get(&format!("/courses/{course_id}/files"), RequestConfig::new())
            .await
    }

    pub async fn get_file(&self, file_id: FileId) -> Result<JsonValue> {
        self.get(&format!("/files/{file_id}"), RequestConfig::new())
            .await
    }

    // ============================================================================
    // Scopes
    // ============================================================================

    /// Permission scopes available to developer keys on an account (beta endpoint)
    pub async fn list_scopes(
        &self,
        account_id: AccountId,
        group_by: Option<&str>,
    ) -> Result<JsonValue> {
        let mut config = RequestConfig::new();
        if let Some(group_by) = group_by {
            config = config.query("group_by", group_by);
        }
        self.get(&format!("/accounts/{account_id}/scopes"), config)
            .await
    }
}

impl std::fmt::Debug for CanvasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasClient")
            .field("limits", &self.limits)
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}
