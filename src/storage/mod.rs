//! Storage layer for the persisted preference flags.
//!
//! The session flag and the theme flag survive reloads in a durable string
//! key-value store. Everything else (the user collection, search term, sort
//! order) is transient and never reaches this layer.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-process implementation

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::JsonKeyValueStore;
pub use memory::MemoryStore;
