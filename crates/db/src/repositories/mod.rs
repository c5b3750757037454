//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-table writes open
//! their own transaction.

pub mod activity_repo;
pub mod avatar_repo;
pub mod module_repo;
pub mod progress_repo;
pub mod ranking_repo;
pub mod stats_repo;
pub mod user_repo;
pub mod world_repo;

pub use activity_repo::ActivityRepo;
pub use avatar_repo::AvatarRepo;
pub use module_repo::ModuleRepo;
pub use progress_repo::ProgressRepo;
pub use ranking_repo::RankingRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
pub use world_repo::WorldRepo;
