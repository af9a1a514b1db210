//! Storage layer
//!
//! A slot is a durable key-value location holding one serialized string.
//! The record store keeps its whole document in a single slot.
//!
//! ## Implementations
//!
//! - **FileSlot**: one file per key under the data directory, atomic writes
//! - **MemorySlot**: in-process map, used by tests and dry runs

pub mod error;
pub mod memory;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use memory::MemorySlot;
pub use persistence::FileSlot;

/// A durable key-value location
///
/// Writes replace the whole value. Readers never observe a partially
/// written value.
pub trait KeyValueSlot {
    /// Read the value stored under `key`, or `None` if nothing was stored
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}
