//! Seed script - resets the marketplace collection to the sample data
//!
//! Run with:
//! ```
//! MONGODB_URI=mongodb://localhost:27017 cargo run -p seed-data --bin seed
//! ```
//!
//! A failed connection makes `main` return `Err`, so the process exits with
//! status 1 before any record is touched. Errors after connecting are logged and
//! the exit status stays 0.

use seed_data::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env();

    let store = match MongoStore::connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Connection error: {e}");
            return Err(anyhow::Error::new(e).context("could not connect to MongoDB"));
        }
    };

    let outcome = Seeder::new(store).run().await;

    // Errors after connecting are logged by the seeder and do not change the exit status
    if outcome.is_complete() {
        println!("\nDatabase seeded successfully!");
    } else {
        println!("\nSeeding stopped early.");
    }
    println!("{}", outcome.summary);

    Ok(())
}
