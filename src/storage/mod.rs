//! Storage implementations: the product dataset and key-value backends

pub mod catalog;
pub mod file;
pub mod generator;
pub mod in_memory;
#[cfg(feature = "lmdb")]
pub mod lmdb;
pub mod products;

pub use catalog::CatalogApi;
pub use file::FileKeyValueStore;
pub use generator::ProductGenerator;
pub use in_memory::InMemoryKeyValueStore;
#[cfg(feature = "lmdb")]
pub use lmdb::LmdbKeyValueStore;
pub use products::ProductStore;
