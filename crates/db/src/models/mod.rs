//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts, holding already-validated values

pub mod activity;
pub mod avatar;
pub mod module;
pub mod progress;
pub mod ranking;
pub mod stats;
pub mod user;
pub mod world;
