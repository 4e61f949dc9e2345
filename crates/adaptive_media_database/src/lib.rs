//! Record stores for adaptive media image metadata.
//!
//! Every store enforces the `(configuration_uuid, file_version_id)`
//! uniqueness constraint itself, so two concurrent creations of the same
//! variant cannot both succeed.
//!
//! # Features
//!
//! - `InMemoryImageRecordStore` for tests and single-process deployments
//! - `PostgresImageRecordStore` (feature `postgres`): Diesel-based storage with
//!   embedded migrations and a sequence-backed id generator
//!
//! # Example
//!
//! ```rust,ignore
//! use adaptive_media_database::PostgresImageRecordStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PostgresImageRecordStore::from_env()?;
//! store.run_migrations()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod in_memory;

#[cfg(feature = "postgres")]
mod models;
#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "postgres")]
pub mod schema;

pub use in_memory::InMemoryImageRecordStore;

#[cfg(feature = "postgres")]
pub use models::AdaptiveMediaImageRow;
#[cfg(feature = "postgres")]
pub use postgres::{PgPool, PostgresImageRecordStore};
