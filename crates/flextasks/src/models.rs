use bson::{DateTime, Document, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Student => "student",
        }
    }
}

/// A marketplace account. Clients post tasks, students apply for and perform them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    /// Plaintext, stored as-is.
    pub password: String,
    pub role: Role,
    pub phone: String,
    pub bio: String,
    pub profile_image: String,
    /// Present only for students.
    #[serde(flatten)]
    pub student: Option<StudentProfile>,
    pub is_active: bool,
    pub is_verified: bool,
}

/// Fields only students carry, stored inline on the user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub skills: Vec<String>,
    pub hourly_rate: i32,
    pub availability: Vec<Availability>,
    pub average_rating: f64,
    pub total_ratings: i32,
}

/// A weekly availability window, e.g. Monday 09:00-17:00.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl Availability {
    pub fn new(day: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            day: day.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Cleaning,
    DogWalking,
    Tutoring,
    Delivery,
    Gardening,
    Moving,
    Handyman,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Open,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::Assigned => "assigned",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

/// A student's application to an open task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub student: ObjectId,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<DateTime>,
}

/// A job posted by a client, optionally assigned to a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub client: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<ObjectId>,
    pub status: TaskStatus,
    pub location: Location,
    pub budget: i32,
    /// In hours.
    pub estimated_duration: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applicants: Vec<Applicant>,
}

/// A chat message between two users about a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub task: ObjectId,
    pub sender: ObjectId,
    pub receiver: ObjectId,
    pub content: String,
    pub is_read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime>,
}

/// Feedback left by one party of a task about the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub task: ObjectId,
    pub rated_user: ObjectId,
    pub rated_by: ObjectId,
    pub rating: i32,
    pub comment: String,
    pub punctuality: i32,
    pub quality: i32,
    pub communication: i32,
}

/// The record shapes sharing the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    User,
    Task,
    Message,
    Rating,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::User,
        RecordKind::Task,
        RecordKind::Message,
        RecordKind::Rating,
    ];

    /// Determines a stored document's kind from the fields it carries.
    ///
    /// Returns `None` for documents that match none of the known shapes.
    pub fn classify(document: &Document) -> Option<Self> {
        if document.contains_key("role") {
            Some(RecordKind::User)
        } else if document.contains_key("title") {
            Some(RecordKind::Task)
        } else if document.contains_key("ratedUser") {
            Some(RecordKind::Rating)
        } else if document.contains_key("sender") && document.contains_key("receiver") {
            Some(RecordKind::Message)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::User => "user",
            RecordKind::Task => "task",
            RecordKind::Message => "message",
            RecordKind::Rating => "rating",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
