//! The fixed operation catalogue

use super::descriptor::{FieldType, OperationDescriptor};
use std::collections::HashMap;
use std::sync::LazyLock;

use FieldType::{Boolean, Number, NumberOrString, StringArray, String as Text};

/// Every operation, in advertisement order
pub static CATALOGUE: LazyLock<Vec<OperationDescriptor>> = LazyLock::new(build);

/// Index into [`CATALOGUE`] by operation name
static BY_NAME: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    CATALOGUE
        .iter()
        .enumerate()
        .map(|(i, op)| (op.name, i))
        .collect()
});

/// Look up an operation by name
pub fn lookup(name: &str) -> Option<&'static OperationDescriptor> {
    BY_NAME.get(name).map(|&i| &CATALOGUE[i])
}

const COURSE: &str = "ID of the course";

#[allow(clippy::vec_init_then_push)]
fn build() -> Vec<OperationDescriptor> {
    let mut ops = Vec::new();

    // Courses
    ops.push(OperationDescriptor::new(
        "canvas_list_courses",
        "List all courses available to the current user",
    ));
    ops.push(
        OperationDescriptor::new("canvas_get_course", "Get details of a specific course")
            .required("course_id", Number, COURSE),
    );
    ops.push(
        OperationDescriptor::new("canvas_create_course", "Create a new course in Canvas")
            .required("name", Text, "Name of the course")
            .optional("course_code", Text, "Course code (e.g., CS101)")
            .optional("start_at", Text, "Course start date (ISO format)")
            .optional("end_at", Text, "Course end date (ISO format)")
            .bare("license", Text)
            .bare("is_public", Boolean),
    );
    ops.push(
        OperationDescriptor::new("canvas_update_course", "Update an existing course in Canvas")
            .required("course_id", Number, "ID of the course to update")
            .optional("name", Text, "New name for the course")
            .optional("course_code", Text, "New course code")
            .optional("start_at", Text, "New start date (ISO format)")
            .optional("end_at", Text, "New end date (ISO format)")
            .bare("license", Text)
            .bare("is_public", Boolean),
    );
    ops.push(
        OperationDescriptor::new("canvas_delete_course", "Delete a course")
            .required("course_id", Number, "ID of the course to delete"),
    );

    // Assignments
    ops.push(
        OperationDescriptor::new("canvas_list_assignments", "List all assignments in a course")
            .required("course_id", Number, COURSE),
    );
    ops.push(
        OperationDescriptor::new("canvas_get_assignment", "Get details of a specific assignment")
            .required("course_id", Number, COURSE)
            .required("assignment_id", Number, "ID of the assignment"),
    );
    ops.push(
        OperationDescriptor::new(
            "canvas_create_assignment",
            "Create a new assignment in a Canvas course",
        )
        .required("course_id", Number, COURSE)
        .required("name", Text, "Name of the assignment")
        .optional("description", Text, "Assignment description/instructions")
        .optional("due_at", Text, "Due date (ISO format)")
        .optional("points_possible", Number, "Maximum points possible")
        .optional("submission_types", StringArray, "Allowed submission types")
        .optional(
            "allowed_extensions",
            StringArray,
            "Allowed file extensions for submissions",
        ),
    );
    ops.push(
        OperationDescriptor::new("canvas_update_assignment", "Update an existing assignment")
            .required("course_id", Number, COURSE)
            .required("assignment_id", Number, "ID of the assignment to update")
            .optional("name", Text, "New name for the assignment")
            .optional("description", Text, "New assignment description")
            .optional("due_at", Text, "New due date (ISO format)")
            .optional("points_possible", Number, "New maximum points"),
    );
    ops.push(
        OperationDescriptor::new("canvas_delete_assignment", "Delete an assignment")
            .required("course_id", Number, COURSE)
            .required("assignment_id", Number, "ID of the assignment to delete"),
    );

    // Submissions
    ops.push(
        OperationDescriptor::new(
            "canvas_list_submissions",
            "List all submissions for an assignment",
        )
        .required("course_id", Number, COURSE)
        .required("assignment_id", Number, "ID of the assignment"),
    );
    ops.push(
        OperationDescriptor::new(
            "canvas_get_submission",
            "Get a student's submission for an assignment",
        )
        .required("course_id", Number, COURSE)
        .required("assignment_id", Number, "ID of the assignment")
        .required("user_id", Number, "ID of the student"),
    );
    ops.push(
        OperationDescriptor::new("canvas_submit_grade", "Submit a grade for a student's assignment")
            .required("course_id", Number, COURSE)
            .required("assignment_id", Number, "ID of the assignment")
            .required("user_id", Number, "ID of the student")
            .required(
                "grade",
                NumberOrString,
                "Grade to submit (number or letter grade)",
            )
            .optional("comment", Text, "Optional comment on the submission"),
    );
    ops.push(
        OperationDescriptor::new("canvas_submit_assignment", "Submit an assignment in Canvas")
            .required("course_id", Number, COURSE)
            .required("assignment_id", Number, "ID of the assignment")
            .required("user_id", Number, "ID of the student")
            .required(
                "submission_type",
                Text,
                "Type of submission (e.g., online_upload)",
            )
            .optional("body", Text, "Submission body or file URL"),
    );

    // Users and enrollments
    ops.push(
        OperationDescriptor::new("canvas_list_users", "List users enrolled in a course")
            .required("course_id", Number, COURSE),
    );
    ops.push(
        OperationDescriptor::new("canvas_list_enrollments", "List enrollments in a course")
            .required("course_id", Number, COURSE),
    );
    ops.push(
        OperationDescriptor::new("canvas_enroll_user", "Enroll a user in a course")
            .required("course_id", Number, COURSE)
            .required("user_id", Number, "ID of the user to enroll")
            .optional(
                "role",
                Text,
                "Role for the enrollment (StudentEnrollment, TeacherEnrollment, etc.)",
            )
            .optional(
                "enrollment_state",
                Text,
                "State of the enrollment (active, invited, etc.)",
            ),
    );
    ops.push(
        OperationDescriptor::new("canvas_unenroll_user", "Remove an enrollment from a course")
            .required("course_id", Number, COURSE)
            .required("enrollment_id", Number, "ID of the enrollment to remove"),
    );
    ops.push(
        OperationDescriptor::new(
            "canvas_get_course_grades",
            "Get grades for all enrollments in a course",
        )
        .required("course_id", Number, COURSE),
    );

    // Current user
    ops.push(OperationDescriptor::new(
        "canvas_get_user_profile",
        "Get the profile of the current user",
    ));
    ops.push(OperationDescriptor::new(
        "canvas_list_student_courses",
        "List courses the current user is enrolled in",
    ));

    // Quizzes
    ops.push(
        OperationDescriptor::new("canvas_list_quizzes", "List all quizzes in a course")
            .required("course_id", Number, COURSE),
    );
    ops.push(
        OperationDescriptor::new("canvas_get_quiz", "Get details of a specific quiz")
            .required("course_id", Number, COURSE)
            .required("quiz_id", Number, "ID of the quiz"),
    );
    ops.push(
        OperationDescriptor::new("canvas_create_quiz", "Create a new quiz in a course")
            .required("course_id", Number, COURSE)
            .required("title", Text, "Title of the quiz")
            .optional("quiz_type", Text, "Type of the quiz (e.g., graded)")
            .optional("time_limit", Number, "Time limit in minutes")
            .optional("published", Boolean, "Is the quiz published")
            .optional("description", Text, "Description of the quiz")
            .optional("due_at", Text, "Due date (ISO format)"),
    );
    ops.push(
        OperationDescriptor::new("canvas_update_quiz", "Update an existing quiz")
            .required("course_id", Number, COURSE)
            .required("quiz_id", Number, "ID of the quiz to update")
            .optional("title", Text, "New title of the quiz")
            .optional("quiz_type", Text, "New type of the quiz")
            .optional("time_limit", Number, "New time limit in minutes")
            .optional("published", Boolean, "Is the quiz published")
            .optional("description", Text, "New description of the quiz")
            .optional("due_at", Text, "New due date (ISO format)"),
    );
    ops.push(
        OperationDescriptor::new("canvas_delete_quiz", "Delete a quiz from a course")
            .required("course_id", Number, COURSE)
            .required("quiz_id", Number, "ID of the quiz to delete"),
    );

    // Modules
    ops.push(
        OperationDescriptor::new("canvas_list_modules", "List all modules in a course")
            .required("course_id", Number, COURSE),
    );
    ops.push(
        OperationDescriptor::new("canvas_get_module", "Get details of a specific module")
            .required("course_id", Number, COURSE)
            .required("module_id", Number, "ID of the module"),
    );
    ops.push(
        OperationDescriptor::new("canvas_list_module_items", "List all items in a module")
            .required("course_id", Number, COURSE)
            .required("module_id", Number, "ID of the module"),
    );
    ops.push(
        OperationDescriptor::new(
            "canvas_get_module_item",
            "Get details of a specific module item",
        )
        .required("course_id", Number, COURSE)
        .required("module_id", Number, "ID of the module")
        .required("item_id", Number, "ID of the module item"),
    );

    // Discussions
    ops.push(
        OperationDescriptor::new(
            "canvas_list_discussion_topics",
            "List all discussion topics in a course",
        )
        .required("course_id", Number, COURSE),
    );
    ops.push(
        OperationDescriptor::new(
            "canvas_get_discussion_topic",
            "Get details of a specific discussion topic",
        )
        .required("course_id", Number, COURSE)
        .required("topic_id", Number, "ID of the discussion topic"),
    );
    ops.push(
        OperationDescriptor::new(
            "canvas_list_announcements",
            "List all announcements in a course",
        )
        .required("course_id", Number, COURSE),
    );

    // Files
    ops.push(
        OperationDescriptor::new("canvas_list_files", "List all files in a course")
            .required("course_id", Number, COURSE),
    );
    ops.push(
        OperationDescriptor::new("canvas_get_file", "Get metadata of a specific file")
            .required("file_id", Number, "ID of the file"),
    );

    // Scopes
    ops.push(
        OperationDescriptor::new(
            "canvas_list_scopes",
            "List API permission scopes available on an account",
        )
        .required("account_id", Number, "ID of the account")
        .optional(
            "group_by",
            Text,
            "Group scopes by this attribute (e.g., resource_name)",
        ),
    );

    ops
}
