//! Database seeding utilities.

use bson::oid::ObjectId;
use serde::Serialize;
use thiserror::Error;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use super::SeedSummary;
use crate::fixtures::{self, TaskIds, UserIds};
use crate::integrity::{self, IntegrityReport};
use crate::store::{DocumentStore, StoreError};
use flextasks::{RecordKind, Task, User};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Serialization error: {0}")]
    Serialize(#[from] bson::ser::Error),
}

/// Ids assigned to every record of a completed population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededIds {
    pub users: UserIds,
    pub tasks: TaskIds,
    pub messages: Vec<ObjectId>,
    pub ratings: Vec<ObjectId>,
}

/// What a seeding run did.
///
/// A run never fails as a whole: errors after connecting are logged and kept in
/// [`SeedOutcome::error`], and `summary` shows how far population got.
#[derive(Debug)]
pub struct SeedOutcome {
    pub run_id: Uuid,
    pub summary: SeedSummary,
    pub ids: Option<SeededIds>,
    pub integrity: Option<IntegrityReport>,
    pub error: Option<SeedError>,
}

impl SeedOutcome {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Seeds the marketplace collection with the fixed sample records.
pub struct Seeder<S> {
    store: S,
}

impl<S: DocumentStore> Seeder<S> {
    /// Creates a new seeder writing through the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Runs clear, populate, and verify, then closes the store.
    ///
    /// The store is closed whether or not seeding succeeded.
    pub async fn run(self) -> SeedOutcome {
        let run_id = Uuid::new_v4();
        let span = info_span!("seed_run", %run_id);

        async move {
            let mut summary = SeedSummary::default();
            let (ids, integrity, error) = match self.seed(&mut summary).await {
                Ok((ids, report)) => (Some(ids), Some(report), None),
                Err(e) => {
                    error!("Seeding error: {e}");
                    (None, None, Some(e))
                }
            };

            self.teardown().await;

            SeedOutcome {
                run_id,
                summary,
                ids,
                integrity,
                error,
            }
        }
        .instrument(span)
        .await
    }

    async fn seed(
        &self,
        summary: &mut SeedSummary,
    ) -> Result<(SeededIds, IntegrityReport), SeedError> {
        self.clear().await?;
        let ids = self.populate(summary).await?;
        let report = self.verify().await?;

        info!("Database seeded successfully");
        Ok((ids, report))
    }

    /// Deletes every document in the collection.
    ///
    /// **WARNING**: This is unconditional; there is no filter and no confirmation.
    pub async fn clear(&self) -> Result<u64, SeedError> {
        info!("Clearing existing data...");
        let deleted = self.store.clear().await?;
        info!("Cleared existing data ({} documents)", deleted);
        Ok(deleted)
    }

    /// Inserts the sample records in dependency order.
    ///
    /// Each insert stands alone. If one fails, the records inserted before it stay
    /// in the collection and `summary` counts them.
    pub async fn populate(&self, summary: &mut SeedSummary) -> Result<SeededIds, SeedError> {
        let [john, sarah, mike, emma] = fixtures::users();
        let users = UserIds {
            john_doe: self.insert_user(&john, summary).await?,
            sarah_smith: self.insert_user(&sarah, summary).await?,
            mike_johnson: self.insert_user(&mike, summary).await?,
            emma_wilson: self.insert_user(&emma, summary).await?,
        };

        let [cleaning, walking, tutoring] = fixtures::tasks(&users);
        let tasks = TaskIds {
            house_cleaning: self.insert_task(&cleaning, summary).await?,
            dog_walking: self.insert_task(&walking, summary).await?,
            math_tutoring: self.insert_task(&tutoring, summary).await?,
        };

        let mut messages = Vec::new();
        for message in fixtures::messages(&users, &tasks) {
            messages.push(
                self.insert_record(&message, RecordKind::Message, "message", summary)
                    .await?,
            );
        }

        let mut ratings = Vec::new();
        for rating in fixtures::ratings(&users, &tasks) {
            ratings.push(
                self.insert_record(&rating, RecordKind::Rating, "rating", summary)
                    .await?,
            );
        }

        Ok(SeededIds {
            users,
            tasks,
            messages,
            ratings,
        })
    }

    /// Reads the collection back and resolves every reference in it.
    ///
    /// Dangling references are logged, not returned as errors.
    pub async fn verify(&self) -> Result<IntegrityReport, SeedError> {
        let documents = self.store.find_all().await?;
        let report = integrity::check_references(&documents);

        if report.is_clean() {
            info!("Verified {} references", report.checked);
        } else {
            for dangling in &report.dangling {
                warn!("Dangling reference: {}", dangling);
            }
        }
        if report.unclassified > 0 {
            warn!("{} documents match no known record shape", report.unclassified);
        }

        Ok(report)
    }

    async fn teardown(&self) {
        self.store.close().await;
        info!("Database connection closed");
    }

    async fn insert_user(
        &self,
        user: &User,
        summary: &mut SeedSummary,
    ) -> Result<ObjectId, SeedError> {
        let label = format!("{}: {}", user.role.as_str(), user.name);
        self.insert_record(user, RecordKind::User, &label, summary)
            .await
    }

    async fn insert_task(
        &self,
        task: &Task,
        summary: &mut SeedSummary,
    ) -> Result<ObjectId, SeedError> {
        let label = format!("task: {}", task.title);
        self.insert_record(task, RecordKind::Task, &label, summary)
            .await
    }

    async fn insert_record<T: Serialize>(
        &self,
        record: &T,
        kind: RecordKind,
        label: &str,
        summary: &mut SeedSummary,
    ) -> Result<ObjectId, SeedError> {
        let document = bson::to_document(record)?;
        let id = self.store.insert(document).await?;
        summary.record(kind);
        info!("Created {}", label);
        Ok(id)
    }
}
