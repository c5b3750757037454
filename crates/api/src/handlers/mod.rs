pub mod admin;
pub mod auth;
pub mod avatars;
pub mod catalog;
pub mod progress;
pub mod ranking;
