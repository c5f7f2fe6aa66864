//! Typed decode of validated operation arguments

use crate::canvas::{EnrollmentRequest, Grade, GradeRequest, SubmissionRequest};
use crate::error::{Error, Result};
use crate::ids::{
    AccountId, AssignmentId, CourseId, EnrollmentId, FileId, ModuleId, ModuleItemId, QuizId,
    TopicId, UserId,
};
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A catalogue operation with decoded arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ListCourses,
    GetCourse {
        course_id: CourseId,
    },
    CreateCourse {
        fields: JsonObject,
    },
    UpdateCourse {
        course_id: CourseId,
        fields: JsonObject,
    },
    DeleteCourse {
        course_id: CourseId,
    },

    ListAssignments {
        course_id: CourseId,
    },
    GetAssignment {
        course_id: CourseId,
        assignment_id: AssignmentId,
    },
    CreateAssignment {
        course_id: CourseId,
        fields: JsonObject,
    },
    UpdateAssignment {
        course_id: CourseId,
        assignment_id: AssignmentId,
        fields: JsonObject,
    },
    DeleteAssignment {
        course_id: CourseId,
        assignment_id: AssignmentId,
    },

    ListSubmissions {
        course_id: CourseId,
        assignment_id: AssignmentId,
    },
    GetSubmission {
        course_id: CourseId,
        assignment_id: AssignmentId,
        user_id: UserId,
    },
    SubmitGrade {
        course_id: CourseId,
        assignment_id: AssignmentId,
        user_id: UserId,
        request: GradeRequest,
    },
    SubmitAssignment {
        course_id: CourseId,
        assignment_id: AssignmentId,
        user_id: UserId,
        request: SubmissionRequest,
    },

    ListUsers {
        course_id: CourseId,
    },
    ListEnrollments {
        course_id: CourseId,
    },
    EnrollUser {
        course_id: CourseId,
        request: EnrollmentRequest,
    },
    UnenrollUser {
        course_id: CourseId,
        enrollment_id: EnrollmentId,
    },
    GetCourseGrades {
        course_id: CourseId,
    },

    GetUserProfile,
    ListStudentCourses,

    ListQuizzes {
        course_id: CourseId,
    },
    GetQuiz {
        course_id: CourseId,
        quiz_id: QuizId,
    },
    CreateQuiz {
        course_id: CourseId,
        fields: JsonObject,
    },
    UpdateQuiz {
        course_id: CourseId,
        quiz_id: QuizId,
        fields: JsonObject,
    },
    DeleteQuiz {
        course_id: CourseId,
        quiz_id: QuizId,
    },

    ListModules {
        course_id: CourseId,
    },
    GetModule {
        course_id: CourseId,
        module_id: ModuleId,
    },
    ListModuleItems {
        course_id: CourseId,
        module_id: ModuleId,
    },
    GetModuleItem {
        course_id: CourseId,
        module_id: ModuleId,
        item_id: ModuleItemId,
    },

    ListDiscussionTopics {
        course_id: CourseId,
    },
    GetDiscussionTopic {
        course_id: CourseId,
        topic_id: TopicId,
    },
    ListAnnouncements {
        course_id: CourseId,
    },

    ListFiles {
        course_id: CourseId,
    },
    GetFile {
        file_id: FileId,
    },

    ListScopes {
        account_id: AccountId,
        group_by: Option<JsonValue>,
    },
}

// ============================================================================
// Argument records
// ============================================================================

#[derive(Deserialize)]
struct CourseArgs {
    course_id: CourseId,
}

#[derive(Deserialize)]
struct AssignmentArgs {
    course_id: CourseId,
    assignment_id: AssignmentId,
}

#[derive(Deserialize)]
struct SubmissionArgs {
    course_id: CourseId,
    assignment_id: AssignmentId,
    user_id: UserId,
}

#[derive(Deserialize)]
struct GradeArgs {
    course_id: CourseId,
    assignment_id: AssignmentId,
    user_id: UserId,
    grade: Grade,
    comment: Option<JsonValue>,
}

#[derive(Deserialize)]
struct SubmitArgs {
    course_id: CourseId,
    assignment_id: AssignmentId,
    user_id: UserId,
    submission_type: String,
    body: Option<JsonValue>,
}

#[derive(Deserialize)]
struct EnrollArgs {
    course_id: CourseId,
    user_id: UserId,
    role: Option<JsonValue>,
    enrollment_state: Option<JsonValue>,
}

#[derive(Deserialize)]
struct EnrollmentArgs {
    course_id: CourseId,
    enrollment_id: EnrollmentId,
}

#[derive(Deserialize)]
struct QuizArgs {
    course_id: CourseId,
    quiz_id: QuizId,
}

#[derive(Deserialize)]
struct ModuleArgs {
    course_id: CourseId,
    module_id: ModuleId,
}

#[derive(Deserialize)]
struct ModuleItemArgs {
    course_id: CourseId,
    module_id: ModuleId,
    item_id: ModuleItemId,
}

#[derive(Deserialize)]
struct TopicArgs {
    course_id: CourseId,
    topic_id: TopicId,
}

#[derive(Deserialize)]
struct FileArgs {
    file_id: FileId,
}

#[derive(Deserialize)]
struct ScopesArgs {
    account_id: AccountId,
    group_by: Option<JsonValue>,
}

/// Target ids plus the remaining arguments as a pass-through bag
#[derive(Deserialize)]
struct WithFields<T> {
    #[serde(flatten)]
    target: T,
    #[serde(flatten)]
    fields: JsonObject,
}

#[derive(Deserialize)]
struct NoTarget {}

fn decode<T: DeserializeOwned>(args: &JsonValue) -> Result<T> {
    serde_json::from_value(args.clone()).map_err(|e| Error::validation(e.to_string()))
}

/// Decode a target record and keep every other non-null argument as fields
fn decode_with_fields<T: DeserializeOwned>(args: &JsonValue) -> Result<(T, JsonObject)> {
    let WithFields { target, mut fields } = decode::<WithFields<T>>(args)?;
    fields.retain(|_, v| !v.is_null());
    Ok((target, fields))
}

impl Operation {
    /// Decode the arguments of a named operation.
    ///
    /// `args` is expected to have passed descriptor validation already; any
    /// remaining shape problem (a non-numeric id, a boolean grade, ...) is
    /// reported as a validation error.
    pub fn decode(name: &str, args: &JsonValue) -> Result<Self> {
        let op = match name {
            "canvas_list_courses" => Self::ListCourses,
            "canvas_get_course" => {
                let a: CourseArgs = decode(args)?;
                Self::GetCourse {
                    course_id: a.course_id,
                }
            }
            "canvas_create_course" => {
                let (NoTarget {}, fields) = decode_with_fields(args)?;
                Self::CreateCourse { fields }
            }
            "canvas_update_course" => {
                let (a, fields) = decode_with_fields::<CourseArgs>(args)?;
                Self::UpdateCourse {
                    course_id: a.course_id,
                    fields,
                }
            }
            "canvas_delete_course" => {
                let a: CourseArgs = decode(args)?;
                Self::DeleteCourse {
                    course_id: a.course_id,
                }
            }

            "canvas_list_assignments" => {
                let a: CourseArgs = decode(args)?;
                Self::ListAssignments {
                    course_id: a.course_id,
                }
            }
            "canvas_get_assignment" => {
                let a: AssignmentArgs = decode(args)?;
                Self::GetAssignment {
                    course_id: a.course_id,
                    assignment_id: a.assignment_id,
                }
            }
            "canvas_create_assignment" => {
                let (a, fields) = decode_with_fields::<CourseArgs>(args)?;
                Self::CreateAssignment {
                    course_id: a.course_id,
                    fields,
                }
            }
            "canvas_update_assignment" => {
                let (a, fields) = decode_with_fields::<AssignmentArgs>(args)?;
                Self::UpdateAssignment {
                    course_id: a.course_id,
                    assignment_id: a.assignment_id,
                    fields,
                }
            }
            "canvas_delete_assignment" => {
                let a: AssignmentArgs = decode(args)?;
                Self::DeleteAssignment {
                    course_id: a.course_id,
                    assignment_id: a.assignment_id,
                }
            }

            "canvas_list_submissions" => {
                let a: AssignmentArgs = decode(args)?;
                Self::ListSubmissions {
                    course_id: a.course_id,
                    assignment_id: a.assignment_id,
                }
            }
            "canvas_get_submission" => {
                let a: SubmissionArgs = decode(args)?;
                Self::GetSubmission {
                    course_id: a.course_id,
                    assignment_id: a.assignment_id,
                    user_id: a.user_id,
                }
            }
            "canvas_submit_grade" => {
                let a: GradeArgs = decode(args)?;
                Self::SubmitGrade {
                    course_id: a.course_id,
                    assignment_id: a.assignment_id,
                    user_id: a.user_id,
                    request: GradeRequest {
                        grade: a.grade,
                        comment: a.comment,
                    },
                }
            }
            "canvas_submit_assignment" => {
                let a: SubmitArgs = decode(args)?;
                Self::SubmitAssignment {
                    course_id: a.course_id,
                    assignment_id: a.assignment_id,
                    user_id: a.user_id,
                    request: SubmissionRequest {
                        submission_type: a.submission_type,
                        body: a.body,
                    },
                }
            }

            "canvas_list_users" => {
                let a: CourseArgs = decode(args)?;
                Self::ListUsers {
                    course_id: a.course_id,
                }
            }
            "canvas_list_enrollments" => {
                let a: CourseArgs = decode(args)?;
                Self::ListEnrollments {
                    course_id: a.course_id,
                }
            }
            "canvas_enroll_user" => {
                let a: EnrollArgs = decode(args)?;
                Self::EnrollUser {
                    course_id: a.course_id,
                    request: EnrollmentRequest {
                        user_id: a.user_id,
                        role: a.role,
                        enrollment_state: a.enrollment_state,
                    },
                }
            }
            "canvas_unenroll_user" => {
                let a: EnrollmentArgs = decode(args)?;
                Self::UnenrollUser {
                    course_id: a.course_id,
                    enrollment_id: a.enrollment_id,
                }
            }
            "canvas_get_course_grades" => {
                let a: CourseArgs = decode(args)?;
                Self::GetCourseGrades {
                    course_id: a.course_id,
                }
            }

            "canvas_get_user_profile" => Self::GetUserProfile,
            "canvas_list_student_courses" => Self::ListStudentCourses,

            "canvas_list_quizzes" => {
                let a: CourseArgs = decode(args)?;
                Self::ListQuizzes {
                    course_id: a.course_id,
                }
            }
            "canvas_get_quiz" => {
                let a: QuizArgs = decode(args)?;
                Self::GetQuiz {
                    course_id: a.course_id,
                    quiz_id: a.quiz_id,
                }
            }
            "canvas_create_quiz" => {
                let (a, fields) = decode_with_fields::<CourseArgs>(args)?;
                Self::CreateQuiz {
                    course_id: a.course_id,
                    fields,
                }
            }
            "canvas_update_quiz" => {
                let (a, fields) = decode_with_fields::<QuizArgs>(args)?;
                Self::UpdateQuiz {
                    course_id: a.course_id,
                    quiz_id: a.quiz_id,
                    fields,
                }
            }
            "canvas_delete_quiz" => {
                let a: QuizArgs = decode(args)?;
                Self::DeleteQuiz {
                    course_id: a.course_id,
                    quiz_id: a.quiz_id,
                }
            }

            "canvas_list_modules" => {
                let a: CourseArgs = decode(args)?;
                Self::ListModules {
                    course_id: a.course_id,
                }
            }
            "canvas_get_module" => {
                let a: ModuleArgs = decode(args)?;
                Self::GetModule {
                    course_id: a.course_id,
                    module_id: a.module_id,
                }
            }
            "canvas_list_module_items" => {
                let a: ModuleArgs = decode(args)?;
                Self::ListModuleItems {
                    course_id: a.course_id,
                    module_id: a.module_id,
                }
            }
            "canvas_get_module_item" => {
                let a: ModuleItemArgs = decode(args)?;
                Self::GetModuleItem {
                    course_id: a.course_id,
                    module_id: a.module_id,
                    item_id: a.item_id,
                }
            }

            "canvas_list_discussion_topics" => {
                let a: CourseArgs = decode(args)?;
                Self::ListDiscussionTopics {
                    course_id: a.course_id,
                }
            }
            "canvas_get_discussion_topic" => {
                let a: TopicArgs = decode(args)?;
                Self::GetDiscussionTopic {
                    course_id: a.course_id,
                    topic_id: a.topic_id,
                }
            }
            "canvas_list_announcements" => {
                let a: CourseArgs = decode(args)?;
                Self::ListAnnouncements {
                    course_id: a.course_id,
                }
            }

            "canvas_list_files" => {
                let a: CourseArgs = decode(args)?;
                Self::ListFiles {
                    course_id: a.course_id,
                }
            }
            "canvas_get_file" => {
                let a: FileArgs = decode(args)?;
                Self::GetFile { file_id: a.file_id }
            }

            "canvas_list_scopes" => {
                let a: ScopesArgs = decode(args)?;
                Self::ListScopes {
                    account_id: a.account_id,
                    group_by: a.group_by,
                }
            }

            other => {
                return Err(Error::UnknownOperation {
                    name: other.to_string(),
                })
            }
        };
        Ok(op)
    }

    /// True for operations that change remote state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::CreateCourse { .. }
                | Self::UpdateCourse { .. }
                | Self::DeleteCourse { .. }
                | Self::CreateAssignment { .. }
                | Self::UpdateAssignment { .. }
                | Self::DeleteAssignment { .. }
                | Self::SubmitGrade { .. }
                | Self::SubmitAssignment { .. }
                | Self::EnrollUser { .. }
                | Self::UnenrollUser { .. }
                | Self::CreateQuiz { .. }
                | Self::UpdateQuiz { .. }
                | Self::DeleteQuiz { .. }
        )
    }
}
