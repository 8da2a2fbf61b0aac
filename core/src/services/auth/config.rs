//! Configuration for the authentication service

/// Lockout policy for failed logins.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Consecutive failures at which the account locks
    pub max_failed_attempts: u32,
    /// Lockout duration in minutes
    pub lockout_duration_minutes: i64,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lockout_duration_minutes: 30,
        }
    }
}
