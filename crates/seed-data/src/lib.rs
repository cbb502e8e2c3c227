//! Sample data seeding for FlexTasks.
//!
//! This crate resets the marketplace collection to a small, fixed set of users,
//! tasks, messages, and ratings for manual verification and frontend development.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let config = SeedConfig::from_env();
//! let store = MongoStore::connect(&config).await?;
//! let outcome = Seeder::new(store).run().await;
//! println!("{}", outcome.summary);
//! ```

pub mod config;
pub mod db;
pub mod fixtures;
pub mod integrity;
pub mod store;

// Re-export the record types from the domain crate
pub use flextasks::{Message, Rating, RecordKind, Role, Task, TaskStatus, User};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, SeedOutcome, SeedSummary, SeededIds, Seeder};
    pub use crate::fixtures::{TaskIds, UserIds};
    pub use crate::integrity::{IntegrityReport, check_references};
    pub use crate::store::{DocumentStore, MemoryStore, MongoStore, StoreError};
    pub use crate::{RecordKind, Role};
}
