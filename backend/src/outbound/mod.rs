//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **credentials**: Argon2id credential hasher
//! - **memory**: in-process account repository for local runs and tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters translate between domain types and infrastructure-specific
//! representations. They contain no business logic.

pub mod credentials;
pub mod memory;
pub mod persistence;
