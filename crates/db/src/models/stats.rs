use serde::Serialize;

/// Platform-wide counters for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformStats {
    pub total_users: i64,
    /// Users with at least one completed module.
    pub active_users: i64,
    pub total_worlds: i64,
    pub total_modules: i64,
    pub total_activities: i64,
    /// Mean of `users.progress`, rounded to two decimals.
    pub average_progress: f64,
}
