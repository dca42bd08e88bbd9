//! Adapter implementations (hexagonal architecture)
//!
//! Concrete implementations of the port traits: DuckDB for real
//! persistence, an in-memory store for tests.

pub mod duckdb;
pub mod memory;

pub use duckdb::DuckDbStore;
pub use memory::MemoryStore;
