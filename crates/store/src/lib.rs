//! Content Store abstraction and implementations for ChemLearn.
//!
//! This crate provides the trait-based persistence interface the progress
//! tracker depends on, with an in-memory backend and a JSON-file reference
//! backend.

#![warn(missing_docs)]

pub mod json_store;
pub mod memory_store;
pub mod trait_;

pub use json_store::JsonStore;
pub use memory_store::MemoryStore;
pub use trait_::{ContentStore, Result, StoreError};
