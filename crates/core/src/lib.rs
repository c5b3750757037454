//! Pure domain logic for the quest learning platform.
//!
//! This crate has no database or HTTP dependencies. Repositories and
//! handlers load rows and pass plain values in; everything here is
//! deterministic and unit-tested in place.

pub mod catalog;
pub mod error;
pub mod ranking;
pub mod scoring;
pub mod types;
