//! Users allowed to log in, loaded once at startup.

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};
use ring::rand::SystemRandom;

use super::password::PasswordHash;
use crate::config::UserCredentials;
use crate::error_handling::AuthError;

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, Arc<PasswordHash>>,
}

impl UserDirectory {
    /// Hashes every configured password. A repeated username keeps the last entry.
    pub fn from_credentials(
        credentials: &[UserCredentials],
        iterations: u32,
    ) -> Result<Self, AuthError> {
        let rng = SystemRandom::new();
        let mut users = HashMap::with_capacity(credentials.len());

        for entry in credentials {
            let hash = PasswordHash::new(&entry.password, iterations, &rng)?;
            if users
                .insert(entry.username.clone(), Arc::new(hash))
                .is_some()
            {
                warn!("User '{}' is configured more than once", entry.username);
            }
        }

        if users.is_empty() {
            warn!("No users configured; every login will be rejected");
        } else {
            info!("Loaded {} user(s)", users.len());
        }

        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Checks a login attempt. Unknown users and wrong passwords both yield `false`.
    ///
    /// Hashing runs on the blocking pool; a failed join is an error.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let Some(hash) = self.users.get(username).cloned() else {
            return Ok(false);
        };
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hash.verify(&password))
            .await
            .map_err(|e| AuthError::HashTask(e.to_string()))
    }
}
