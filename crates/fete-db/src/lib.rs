//! PostgreSQL persistence layer for fete.
//!
//! Owns the connection pool, embedded migrations, row models, and the
//! per-table query modules. All access is scoped by the owning user id
//! where the table has an owner.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
