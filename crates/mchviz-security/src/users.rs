//! Account lookup for the login page.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, SecurityError};
use crate::password::verify_password;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    /// Argon2 PHC string. Accounts without one cannot log in.
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl User {
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|phc| verify_password(password, phc))
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Option<User>;
}

#[derive(Debug, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<User>,
}

/// Users held in memory, keyed by email.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: HashMap<String, User>,
}

impl InMemoryUserStore {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.email.clone(), u)).collect(),
        }
    }

    /// Load `[[users]]` entries from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SecurityError::UsersFile {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: UsersFile = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), count = parsed.users.len(), "loaded user accounts");
        Ok(Self::new(parsed.users))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.get(email).cloned()
    }
}
