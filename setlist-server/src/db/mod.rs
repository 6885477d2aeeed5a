//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool with foreign keys enforced on every connection
//! - Related rows are loaded with JOINs or one batched query per parent set - no N+1
//! - Rely on DB constraints, handle violations - no check-then-delete

pub mod migrations;
pub mod pool;
pub mod prefetch;
pub mod repos;

pub use pool::{create_memory_pool, create_pool};
pub use repos::*;
