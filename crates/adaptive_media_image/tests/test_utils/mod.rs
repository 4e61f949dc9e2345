//! Test utilities for registry tests.
//!
//! This module provides mock collaborators and a fully wired registry.

pub mod harness;
pub mod mock_counter;
pub mod mock_storage;

#[allow(unused_imports)]
pub use harness::{
    COMPANY_ID, GROUP_ID, Harness, content, descriptor, file_version, global_entry,
};
#[allow(unused_imports)]
pub use mock_counter::FixedCounter;
#[allow(unused_imports)]
pub use mock_storage::{MockImageStorage, StorageBehavior};
