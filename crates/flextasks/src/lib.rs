//! Domain records for the FlexTasks marketplace.
//!
//! Every record type lives in the same heterogeneous collection. The stored shape of
//! each record is what tells them apart, see [`models::RecordKind`].

pub mod models;

pub use models::{
    Applicant, Availability, Category, Location, Message, Rating, RecordKind, Role, StudentProfile,
    Task, TaskStatus, User,
};
