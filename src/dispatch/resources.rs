//! `type://id` resource addressing

use crate::error::{Error, Result};
use crate::ids::{validate_course_id, CourseId};
use crate::types::JsonValue;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// MIME type of every resource body
pub const JSON_MIME: &str = "application/json";

const ALL_COURSES_DESCRIPTION: &str = "List of all available Canvas courses";

/// Kind of data a resource address points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// All courses (`courses://list`)
    Courses,
    Course,
    Assignments,
    Users,
    Grades,
    Quizzes,
    Modules,
    DiscussionTopics,
    Announcements,
}

impl ResourceType {
    /// Per-course families, in enumeration order
    pub const PER_COURSE: [ResourceType; 8] = [
        Self::Course,
        Self::Assignments,
        Self::Users,
        Self::Grades,
        Self::Quizzes,
        Self::Modules,
        Self::DiscussionTopics,
        Self::Announcements,
    ];

    /// URI scheme of this type
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Course => "course",
            Self::Assignments => "assignments",
            Self::Users => "users",
            Self::Grades => "grades",
            Self::Quizzes => "quizzes",
            Self::Modules => "modules",
            Self::DiscussionTopics => "discussion_topics",
            Self::Announcements => "announcements",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Courses => "All Courses",
            Self::Course => "Course",
            Self::Assignments => "Assignments",
            Self::Users => "Users",
            Self::Grades => "Grades",
            Self::Quizzes => "Quizzes",
            Self::Modules => "Modules",
            Self::DiscussionTopics => "Discussion Topics",
            Self::Announcements => "Announcements",
        }
    }

    fn describe(self, course: &CourseSummary) -> String {
        let name = &course.name;
        match self {
            Self::Courses => ALL_COURSES_DESCRIPTION.to_string(),
            Self::Course => format!("{} - {}", course.course_code, name),
            Self::Assignments => format!("Assignments for {name}"),
            Self::Users => format!("Enrolled users in {name}"),
            Self::Grades => format!("Grade data for {name}"),
            Self::Quizzes => format!("Quizzes for {name}"),
            Self::Modules => format!("Modules for {name}"),
            Self::DiscussionTopics => format!("Discussion topics for {name}"),
            Self::Announcements => format!("Announcements for {name}"),
        }
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "courses" => Ok(Self::Courses),
            "course" => Ok(Self::Course),
            "assignments" => Ok(Self::Assignments),
            "users" => Ok(Self::Users),
            "grades" => Ok(Self::Grades),
            "quizzes" => Ok(Self::Quizzes),
            "modules" => Ok(Self::Modules),
            "discussion_topics" => Ok(Self::DiscussionTopics),
            "announcements" => Ok(Self::Announcements),
            other => Err(Error::UnknownResourceType {
                resource_type: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// A parsed resource address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceAddress {
    /// `courses://list`
    AllCourses,
    /// `<type>://<course id>`
    PerCourse(ResourceType, CourseId),
}

impl ResourceAddress {
    /// Parse `type://identifier`
    pub fn parse(uri: &str) -> Result<Self> {
        let (scheme, id) = uri.split_once("://").ok_or_else(|| Error::InvalidResourceUri {
            uri: uri.to_string(),
        })?;

        match scheme.parse::<ResourceType>()? {
            ResourceType::Courses => match id {
                "list" | "" => Ok(Self::AllCourses),
                _ => Err(Error::InvalidResourceUri {
                    uri: uri.to_string(),
                }),
            },
            kind => Ok(Self::PerCourse(kind, validate_course_id(id)?)),
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            Self::AllCourses => ResourceType::Courses,
            Self::PerCourse(kind, _) => *kind,
        }
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllCourses => f.write_str("courses://list"),
            Self::PerCourse(kind, id) => write!(f, "{kind}://{id}"),
        }
    }
}

/// What enumeration needs to know about a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    pub id: CourseId,
    pub name: String,
    pub course_code: String,
}

impl CourseSummary {
    /// Extract a summary from a course record; `None` without a usable id
    pub fn from_record(record: &JsonValue) -> Option<Self> {
        let id = validate_course_id(record.get("id")?).ok()?;
        let text = |key: &str| {
            record
                .get(key)
                .and_then(JsonValue::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Some(Self {
            id,
            name: text("name"),
            course_code: text("course_code"),
        })
    }
}

/// One entry of the resource listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEntry {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: &'static str,
}

impl ResourceEntry {
    /// The `courses://list` entry
    pub fn all_courses() -> Self {
        Self {
            uri: ResourceAddress::AllCourses.to_string(),
            name: ResourceType::Courses.title().to_string(),
            description: ALL_COURSES_DESCRIPTION.to_string(),
            mime_type: JSON_MIME,
        }
    }

    /// The entry of one family for one course
    pub fn for_course(kind: ResourceType, course: &CourseSummary) -> Self {
        Self {
            uri: ResourceAddress::PerCourse(kind, course.id).to_string(),
            name: format!("{}: {}", kind.title(), course.name),
            description: kind.describe(course),
            mime_type: JSON_MIME,
        }
    }
}

/// Body of a read resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}
