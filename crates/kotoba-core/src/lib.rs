pub mod error;
pub mod language;
pub mod preprocess;
pub mod storage;

pub use error::StorageError;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
