//! Credential directories consulted by `POST /auth/login`.
//!
//! The platform keeps no passwords of its own. A [`Directory`] decides
//! whether a username/password pair is valid and supplies the profile used
//! to create the user row on first login.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use questlearn_core::error::CoreError;

use crate::auth::password::verify_password;
use crate::config::ServerConfig;

pub const MODE_DEVELOPMENT: &str = "development";
pub const MODE_STATIC: &str = "static";

/// Which [`Directory`] implementation the server uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryMode {
    /// Accept any non-empty password. Local development only.
    Development,
    /// Fixed user list from `DIRECTORY_USERS`.
    Static,
}

impl DirectoryMode {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            MODE_DEVELOPMENT => Ok(Self::Development),
            MODE_STATIC => Ok(Self::Static),
            other => Err(CoreError::Validation(format!(
                "Invalid directory mode '{other}'. Must be one of: {MODE_DEVELOPMENT}, {MODE_STATIC}"
            ))),
        }
    }
}

/// Profile returned for a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub username: String,
    pub email: String,
}

/// Verifies credentials against an external user store.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Returns the entry for valid credentials and `None` for invalid ones.
    /// `Err` is reserved for the directory itself being unusable.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<DirectoryEntry>, CoreError>;
}

/// Build the directory selected by the configuration.
pub fn build_directory(config: &ServerConfig) -> Result<Arc<dyn Directory>, CoreError> {
    match config.directory_mode {
        DirectoryMode::Development => {
            tracing::warn!("Using the development directory: any non-empty password is accepted");
            Ok(Arc::new(DevelopmentDirectory::new(&config.email_domain)))
        }
        DirectoryMode::Static => {
            let raw = config.directory_users.as_deref().unwrap_or_default();
            let directory = StaticDirectory::parse(raw, &config.email_domain)?;
            tracing::info!(users = directory.len(), "Static directory loaded");
            Ok(Arc::new(directory))
        }
    }
}

// ---------------------------------------------------------------------------
// Development
// ---------------------------------------------------------------------------

/// Accepts every username with a non-empty password.
#[derive(Debug, Clone)]
pub struct DevelopmentDirectory {
    email_domain: String,
}

impl DevelopmentDirectory {
    pub fn new(email_domain: &str) -> Self {
        Self {
            email_domain: email_domain.to_string(),
        }
    }
}

#[async_trait]
impl Directory for DevelopmentDirectory {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<DirectoryEntry>, CoreError> {
        if username.is_empty() || password.is_empty() {
            return Ok(None);
        }
        Ok(Some(DirectoryEntry {
            username: username.to_string(),
            email: format!("{username}@{}", self.email_domain),
        }))
    }
}

// ---------------------------------------------------------------------------
// Static
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct StaticUser {
    password_hash: String,
    email: String,
}

/// A fixed set of users with Argon2id password hashes.
///
/// Parsed from `username:phc-hash[:email]` entries separated by `;`.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    users: HashMap<String, StaticUser>,
}

impl StaticDirectory {
    pub fn parse(raw: &str, email_domain: &str) -> Result<Self, CoreError> {
        let mut users = HashMap::new();

        for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let mut parts = entry.splitn(3, ':');
            let username = parts.next().unwrap_or_default().trim();
            let password_hash = parts.next().unwrap_or_default().trim();
            if username.is_empty() || password_hash.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Malformed DIRECTORY_USERS entry '{entry}'. Expected username:hash[:email]"
                )));
            }
            let email = parts
                .next()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("{username}@{email_domain}"));

            let previous = users.insert(
                username.to_string(),
                StaticUser {
                    password_hash: password_hash.to_string(),
                    email,
                },
            );
            if previous.is_some() {
                return Err(CoreError::Validation(format!(
                    "Duplicate DIRECTORY_USERS entry for '{username}'"
                )));
            }
        }

        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl Directory for StaticDirectory {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<DirectoryEntry>, CoreError> {
        let Some(user) = self.users.get(username) else {
            return Ok(None);
        };

        let valid = verify_password(password, &user.password_hash).map_err(|e| {
            CoreError::Internal(format!("Unreadable password hash for '{username}': {e}"))
        })?;

        Ok(valid.then(|| DirectoryEntry {
            username: username.to_string(),
            email: user.email.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::auth::password::hash_password;

    #[test]
    fn mode_parsing() {
        assert_eq!(
            DirectoryMode::from_str_value("Static").unwrap(),
            DirectoryMode::Static
        );
        assert_matches!(
            DirectoryMode::from_str_value("ldap"),
            Err(CoreError::Validation(_))
        );
    }

    #[tokio::test]
    async fn development_accepts_any_password() {
        let dir = DevelopmentDirectory::new("example.org");
        let entry = dir.authenticate("peach", "x").await.unwrap().unwrap();
        assert_eq!(entry.email, "peach@example.org");
        assert!(dir.authenticate("peach", "").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn static_directory_verifies_hashes() {
        let hash = hash_password("s3cret").unwrap();
        let raw = format!("mario:{hash}:mario@castle.example; luigi:{hash}");
        let dir = StaticDirectory::parse(&raw, "example.org").unwrap();
        assert_eq!(dir.len(), 2);

        let mario = dir.authenticate("mario", "s3cret").await.unwrap().unwrap();
        assert_eq!(mario.email, "mario@castle.example");
        let luigi = dir.authenticate("luigi", "s3cret").await.unwrap().unwrap();
        assert_eq!(luigi.email, "luigi@example.org");

        assert!(dir.authenticate("mario", "wrong").await.unwrap().is_none());
        assert!(dir.authenticate("bowser", "s3cret").await.unwrap().is_none());
    }

    #[test]
    fn static_directory_rejects_bad_entries() {
        assert_matches!(
            StaticDirectory::parse("nohash", "example.org"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            StaticDirectory::parse("a:h1;a:h2", "example.org"),
            Err(CoreError::Validation(_))
        );
        assert!(StaticDirectory::parse("", "example.org").unwrap().is_empty());
    }
}
