//! The fixed sample records a seeding run inserts.
//!
//! Records that reference others take the ids assigned to earlier inserts, so they
//! are built only once those ids are known: users first, then tasks, then messages
//! and ratings.

use bson::{DateTime, oid::ObjectId};
use time::macros::datetime;

use flextasks::{
    Applicant, Availability, Category, Location, Message, Rating, Role, StudentProfile, Task,
    TaskStatus, User,
};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";
const SAMPLE_PASSWORD: &str = "password123";

/// Ids of the seeded users, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIds {
    pub john_doe: ObjectId,
    pub sarah_smith: ObjectId,
    pub mike_johnson: ObjectId,
    pub emma_wilson: ObjectId,
}

/// Ids of the seeded tasks, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskIds {
    pub house_cleaning: ObjectId,
    pub dog_walking: ObjectId,
    pub math_tutoring: ObjectId,
}

fn user(name: &str, email: &str, role: Role, phone: &str, bio: &str) -> User {
    User {
        id: None,
        name: name.to_string(),
        email: email.to_string(),
        password: SAMPLE_PASSWORD.to_string(),
        role,
        phone: phone.to_string(),
        bio: bio.to_string(),
        profile_image: PLACEHOLDER_IMAGE.to_string(),
        student: None,
        is_active: true,
        is_verified: true,
    }
}

fn student(name: &str, email: &str, phone: &str, bio: &str, profile: StudentProfile) -> User {
    User {
        student: Some(profile),
        ..user(name, email, Role::Student, phone, bio)
    }
}

fn skills(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

fn location(address: &str, city: &str, zip_code: &str) -> Location {
    Location {
        address: address.to_string(),
        city: city.to_string(),
        zip_code: zip_code.to_string(),
    }
}

/// The four users: two clients followed by two students.
pub fn users() -> [User; 4] {
    [
        user(
            "John Doe",
            "john@example.com",
            Role::Client,
            "+1234567890",
            "Looking for help with household tasks",
        ),
        user(
            "Sarah Smith",
            "sarah@example.com",
            Role::Client,
            "+0987654321",
            "Need professional cleaning services",
        ),
        student(
            "Mike Johnson",
            "mike@example.com",
            "+1111111111",
            "Experienced in cleaning and dog walking",
            StudentProfile {
                skills: skills(&["Cleaning", "Dog Walking", "Lawn Mowing"]),
                hourly_rate: 15,
                availability: vec![
                    Availability::new("Monday", "09:00", "17:00"),
                    Availability::new("Tuesday", "09:00", "17:00"),
                ],
                average_rating: 4.5,
                total_ratings: 10,
            },
        ),
        student(
            "Emma Wilson",
            "emma@example.com",
            "+2222222222",
            "Available for tutoring and babysitting",
            StudentProfile {
                skills: skills(&["Tutoring", "Babysitting", "English"]),
                hourly_rate: 20,
                availability: vec![
                    Availability::new("Wednesday", "14:00", "21:00"),
                    Availability::new("Thursday", "14:00", "21:00"),
                ],
                average_rating: 4.8,
                total_ratings: 15,
            },
        ),
    ]
}

/// The three tasks, one per lifecycle stage: completed, in progress, and open.
pub fn tasks(users: &UserIds) -> [Task; 3] {
    let christmas = DateTime::from_time_0_3(datetime!(2025-12-25 0:00 UTC));

    [
        Task {
            id: None,
            title: "House Cleaning".to_string(),
            description:
                "Need deep cleaning of 3-bedroom house, including kitchen and bathrooms"
                    .to_string(),
            category: Category::Cleaning,
            client: users.john_doe,
            student: Some(users.mike_johnson),
            status: TaskStatus::Completed,
            location: location("123 Main St", "New York", "10001"),
            budget: 150,
            estimated_duration: 4,
            scheduled_date: Some(christmas),
            completed_date: Some(christmas),
            applicants: Vec::new(),
        },
        Task {
            id: None,
            title: "Dog Walking".to_string(),
            description: "Need someone to walk my golden retriever for 1 hour daily".to_string(),
            category: Category::DogWalking,
            client: users.sarah_smith,
            student: Some(users.mike_johnson),
            status: TaskStatus::InProgress,
            location: location("456 Oak Ave", "Boston", "02101"),
            budget: 50,
            estimated_duration: 1,
            scheduled_date: Some(DateTime::from_time_0_3(datetime!(2025-12-28 0:00 UTC))),
            completed_date: None,
            applicants: vec![Applicant {
                student: users.emma_wilson,
                message: "I can help with dog walking, very experienced!".to_string(),
                applied_at: None,
            }],
        },
        Task {
            id: None,
            title: "Math Tutoring".to_string(),
            description: "Need help with algebra for high school student".to_string(),
            category: Category::Tutoring,
            client: users.john_doe,
            student: None,
            status: TaskStatus::Open,
            location: location("789 Pine Rd", "Los Angeles", "90001"),
            budget: 30,
            estimated_duration: 2,
            scheduled_date: None,
            completed_date: None,
            applicants: vec![Applicant {
                student: users.emma_wilson,
                message: "I specialize in math tutoring!".to_string(),
                applied_at: None,
            }],
        },
    ]
}

/// A short, already-read exchange between John and Mike about the house cleaning.
pub fn messages(users: &UserIds, tasks: &TaskIds) -> [Message; 2] {
    let read_at = Some(DateTime::now());

    [
        Message {
            id: None,
            task: tasks.house_cleaning,
            sender: users.john_doe,
            receiver: users.mike_johnson,
            content: "Hi Mike! Are you available for the cleaning on the 25th?".to_string(),
            is_read: true,
            read_at,
        },
        Message {
            id: None,
            task: tasks.house_cleaning,
            sender: users.mike_johnson,
            receiver: users.john_doe,
            content: "Yes, I am! I can start at 10 AM.".to_string(),
            is_read: true,
            read_at,
        },
    ]
}

/// John's rating of Mike for the completed house cleaning.
pub fn ratings(users: &UserIds, tasks: &TaskIds) -> [Rating; 1] {
    [Rating {
        id: None,
        task: tasks.house_cleaning,
        rated_user: users.mike_johnson,
        rated_by: users.john_doe,
        rating: 5,
        comment: "Excellent work! Very professional and thorough.".to_string(),
        punctuality: 5,
        quality: 5,
        communication: 5,
    }]
}
