// Adapters layer: concrete implementations of the domain ports (repositories, storage).

pub mod csv_source;
pub mod memory;
pub mod storage;

pub use memory::{InMemoryCityRepository, InMemoryWordRepository};
pub use storage::LocalStorage;
