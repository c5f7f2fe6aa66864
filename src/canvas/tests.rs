//! Tests for the Canvas client

use super::*;
use crate::error::{Error, ErrorKind};
use crate::http::HttpClientConfig;
use crate::ids::{
    validate_account_id, validate_assignment_id, validate_course_id, validate_quiz_id,
    validate_user_id,
};
use crate::pagination::PageLimits;
use crate::types::BackoffType;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> CanvasClient {
    let http = HttpClientConfig::builder()
        .base_url(server.uri())
        .bearer_token("test-token")
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();

    CanvasClient::from_config(CanvasClientConfig {
        http,
        ..CanvasClientConfig::default()
    })
    .unwrap()
}

fn next_link(server: &MockServer, path: &str, page: u32) -> String {
    format!(r#"<{}{}?page={}&per_page=100>; rel="next""#, server.uri(), path, page)
}

// ============================================================================
// Construction
// ============================================================================

#[test_case("school.instructure.com", "https://school.instructure.com/api/v1" ; "bare domain")]
#[test_case("https://school.instructure.com/", "https://school.instructure.com/api/v1" ; "with scheme")]
#[test_case("canvas.local:8443", "https://canvas.local:8443/api/v1" ; "with port")]
fn test_api_base_url(domain: &str, expected: &str) {
    assert_eq!(api_base_url(domain).unwrap(), expected);
}

#[test]
fn test_api_base_url_rejects_empty_domain() {
    let err = api_base_url("  ").unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[test]
fn test_client_requires_token() {
    let err = CanvasClient::new("", "school.instructure.com").unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { ref field } if field == "api_token"));
}

#[test]
fn test_client_config_defaults() {
    let config = CanvasClientConfig::default();
    assert_eq!(config.per_page, Some(100));
    assert_eq!(config.limits, PageLimits::default());
}

// ============================================================================
// Pagination through the client
// ============================================================================

#[tokio::test]
async fn test_list_courses_follows_all_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 3}]))
                .insert_header("Link", next_link(&server, "/courses", 3).as_str()),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/courses"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 4}, {"id": 5}])))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/courses"))
        .and(header("Authorization", "Bearer test-token"))
        .and(query_param("include[]", "teachers"))
        .and(query_param("include[]", "total_students"))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}, {"id": 2}]))
                .insert_header("Link", next_link(&server, "/courses", 2).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let courses = client.list_courses().await.unwrap();

    assert_eq!(
        courses,
        json!([{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4}, {"id": 5}])
    );
}

#[tokio::test]
async fn test_page_error_discards_partial_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses/7/assignments"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "forbidden"})))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/courses/7/assignments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}]))
                .insert_header("Link", next_link(&server, "/courses/7/assignments", 2).as_str()),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .list_assignments(validate_course_id(7).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteApi);
    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("forbidden"));
}

#[tokio::test]
async fn test_page_limit_applies_to_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses/1/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}]))
                .insert_header("Link", next_link(&server, "/courses/1/users", 2).as_str()),
        )
        .mount(&server)
        .await;

    let client = test_client(&server).with_limits(PageLimits::pages(4));
    let err = client
        .list_users(validate_course_id(1).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PaginationLimit { pages: 4, .. }));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
}

// ============================================================================
// Single entities and errors
// ============================================================================

#[tokio::test]
async fn test_get_course_returns_entity_verbatim() {
    let server = MockServer::start().await;

    let course = json!({"id": 42, "name": "Biology 101", "teachers": [{"id": 5}]});
    Mock::given(method("GET"))
        .and(path("/courses/42"))
        .and(query_param("include[]", "teachers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(course.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let body = client.get_course(validate_course_id(42).unwrap()).await.unwrap();
    assert_eq!(body, course);
}

#[tokio::test]
async fn test_get_course_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses/999"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"errors": [{"message": "The specified resource does not exist."}], "message": "not found"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .get_course(validate_course_id(999).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteApi);
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Canvas API error (404): not found");
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_enroll_user_applies_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/courses/42/enrollments"))
        .and(body_json(json!({
            "enrollment": {
                "user_id": 9,
                "type": "StudentEnrollment",
                "enrollment_state": "active"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "user_id": 9})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = EnrollmentRequest::student(validate_user_id(9).unwrap());
    let body = client
        .enroll_user(validate_course_id(42).unwrap(), &request)
        .await
        .unwrap();

    assert_eq!(body["user_id"], json!(9));
}

#[tokio::test]
async fn test_enroll_user_explicit_role() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/courses/42/enrollments"))
        .and(body_json(json!({
            "enrollment": {
                "user_id": 9,
                "type": "TeacherEnrollment",
                "enrollment_state": "invited"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = EnrollmentRequest {
        user_id: validate_user_id(9).unwrap(),
        role: Some(json!("TeacherEnrollment")),
        enrollment_state: Some(json!("invited")),
    };
    client
        .enroll_user(validate_course_id(42).unwrap(), &request)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_submit_grade_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/courses/1/assignments/2/submissions/3"))
        .and(body_json(json!({
            "submission": {
                "posted_grade": "A-",
                "comment": {"text_comment": "Nice work"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"grade": "A-"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = GradeRequest {
        grade: Grade::Text("A-".to_string()),
        comment: Some(json!("Nice work")),
    };
    let body = client
        .submit_grade(
            validate_course_id(1).unwrap(),
            validate_assignment_id(2).unwrap(),
            validate_user_id(3).unwrap(),
            &request,
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"grade": "A-"}));
}

#[tokio::test]
async fn test_create_quiz_wraps_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/courses/5/quizzes"))
        .and(body_json(json!({"quiz": {"title": "Midterm", "time_limit": 60}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 11, "title": "Midterm"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut fields = serde_json::Map::new();
    fields.insert("title".to_string(), json!("Midterm"));
    fields.insert("time_limit".to_string(), json!(60));

    let body = client
        .create_quiz(validate_course_id(5).unwrap(), fields)
        .await
        .unwrap();
    assert_eq!(body["id"], json!(11));
}

#[tokio::test]
async fn test_create_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.create_course(serde_json::Map::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_delete_quiz_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/courses/5/quizzes/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let body = client
        .delete_quiz(validate_course_id(5).unwrap(), validate_quiz_id(11).unwrap())
        .await
        .unwrap();
    assert_eq!(body, serde_json::Value::Null);
}

// ============================================================================
// Query conventions
// ============================================================================

#[tokio::test]
async fn test_list_announcements_filters_by_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses/3/discussion_topics"))
        .and(query_param("type", "announcement"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "title": "Welcome"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let body = client
        .list_announcements(validate_course_id(3).unwrap())
        .await
        .unwrap();
    assert_eq!(body, json!([{"id": 1, "title": "Welcome"}]));
}

#[tokio::test]
async fn test_list_scopes_group_by() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/1/scopes"))
        .and(query_param("group_by", "resource_name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"resource": "courses"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .list_scopes(validate_account_id(1).unwrap(), Some("resource_name"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_course_grades_includes_grades() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses/8/enrollments"))
        .and(query_param("include[]", "grades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let body = client
        .get_course_grades(validate_course_id(8).unwrap())
        .await
        .unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_explicit_per_page_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/self/profile"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Ada"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).with_per_page(Some(10));
    let body = client.get_user_profile().await.unwrap();
    assert_eq!(body["name"], json!("Ada"));
}
