//! Workspace persistence adapters
//!
//! Both adapters implement every store port over the same snapshot
//! state. `InMemoryWorkspaceStore` keeps it per-process for tests and
//! ephemeral runs; `JsonFileStore` persists it to a JSON file after
//! each mutation.

mod json_file;
mod memory;
mod snapshot;

pub use json_file::JsonFileStore;
pub use memory::InMemoryWorkspaceStore;
