#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{Entry, InMemoryStore, KeyValueStore, Storage, StorageError};
