//! Configuration for seeding runs.

use serde::{Deserialize, Serialize};

/// Environment variable holding the MongoDB connection string.
pub const MONGODB_URI_VAR: &str = "MONGODB_URI";

/// Connection string used when [`MONGODB_URI_VAR`] is unset.
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/users";

/// Logical database holding the marketplace collection.
pub const DATABASE_NAME: &str = "users";

/// The single collection every record shape is stored in.
pub const COLLECTION_NAME: &str = "FlexTasks";

/// Where a seeding run writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    pub mongodb_uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            database: DATABASE_NAME.to_string(),
            collection: COLLECTION_NAME.to_string(),
        }
    }
}

impl SeedConfig {
    /// Reads the configuration from the process environment, loading `.env` first
    /// if one exists.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// An empty connection string counts as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mongodb_uri = lookup(MONGODB_URI_VAR)
            .map(|uri| uri.trim().to_string())
            .filter(|uri| !uri.is_empty())
            .unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string());

        Self {
            mongodb_uri,
            ..Self::default()
        }
    }
}
