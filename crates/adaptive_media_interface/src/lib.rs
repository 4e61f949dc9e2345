//! Collaborator traits for the adaptive media image registry.
//!
//! The registry never talks to a concrete document store, byte store,
//! configuration source, or database. It talks to the traits defined here,
//! and receives live implementations through [`ServiceSlot`]s and the
//! [`CounterRegistry`], both of which the surrounding platform may update at
//! any time.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod counter;
mod tracker;
mod traits;

pub use counter::{CounterRegistry, ImageCounter};
pub use tracker::{ServiceSlot, ServiceTracker};
pub use traits::{
    ConfigurationResolver, ContentStream, FileVersionSource, IdGenerator, ImageRecordStore,
    ImageStorage,
};
