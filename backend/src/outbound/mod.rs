//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: in-process store used without a database and in tests
//! - **media**: photo storage on disk or in memory
//!
//! Adapters translate between domain types and storage representations and
//! carry no business rules.

pub mod media;
pub mod memory;
pub mod persistence;
