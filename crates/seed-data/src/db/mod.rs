//! Database seeding for the marketplace collection.
//!
//! The [`Seeder`] clears the collection, inserts the fixed sample records in
//! dependency order, checks their references, and always closes the store.

mod seeder;
mod summary;

pub use seeder::{SeedError, SeedOutcome, SeededIds, Seeder};
pub use summary::SeedSummary;
