//! Authentication primitives.
//!
//! - [`directory`] -- credential verification behind `/auth/login`.
//! - [`jwt`] -- session token generation and validation.
//! - [`password`] -- Argon2id hashing for static directory entries.
//! - [`cookie`] -- the session cookie carrying the token.

pub mod cookie;
pub mod directory;
pub mod jwt;
pub mod password;
