//! # Users & Session
//!
//! Account management and the single login session. A fresh store is
//! seeded with a default admin and cashier so the terminal is usable
//! before anyone has created accounts.
//!
//! Login failures are deliberately vague at the API surface: a wrong
//! username, a wrong password, and a deactivated account all come back
//! as the same `InvalidCredentials`, so the prompt leaks nothing about
//! which accounts exist. The distinction is logged at debug level for
//! the operator.

use std::sync::Arc;

use chrono::Utc;
use sari_core::validation::validate_username;
use sari_core::{CoreError, Role, User, UserUpdate};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::kv::{keys, load_or, save, KvStore};

fn default_users() -> Vec<User> {
    let now = Utc::now();
    vec![
        User {
            id: Uuid::new_v4().to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
            full_name: "Administrator".to_string(),
            created_at: now,
            is_active: true,
        },
        User {
            id: Uuid::new_v4().to_string(),
            username: "cashier".to_string(),
            password: "cashier123".to_string(),
            role: Role::Cashier,
            full_name: "Default Cashier".to_string(),
            created_at: now,
            is_active: true,
        },
    ]
}

/// Accounts plus the current session, both persisted.
pub struct UserStore {
    kv: Arc<dyn KvStore>,
    users: Vec<User>,
    current: Option<User>,
}

impl UserStore {
    /// Loads accounts and any saved session, seeding the default
    /// accounts when the user key has never been written.
    pub fn load(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        let users: Vec<User> = load_or(kv.as_ref(), keys::USERS, default_users)?;
        let current: Option<User> = match kv.get(keys::CURRENT_USER)? {
            Some(blob) => Some(serde_json::from_str(&blob)?),
            None => None,
        };
        // First load writes the seed back so it survives even if no
        // other mutation ever happens.
        let store = UserStore { kv, users, current };
        store.persist_users()?;
        Ok(store)
    }

    fn persist_users(&self) -> StoreResult<()> {
        save(self.kv.as_ref(), keys::USERS, &self.users)
    }

    fn persist_session(&self) -> StoreResult<()> {
        match &self.current {
            Some(user) => save(self.kv.as_ref(), keys::CURRENT_USER, user),
            None => self.kv.remove(keys::CURRENT_USER),
        }
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Authenticates against active accounts with an exact-match
    /// username and password, and persists the session on success.
    pub fn login(&mut self, username: &str, password: &str) -> StoreResult<User> {
        let matched = self
            .users
            .iter()
            .find(|u| u.username == username && u.password == password);

        let user = match matched {
            Some(u) if u.is_active => u.clone(),
            Some(u) => {
                debug!(username = %u.username, "Login rejected, account inactive");
                return Err(CoreError::InvalidCredentials.into());
            }
            None => {
                debug!(username, "Login rejected, no matching credentials");
                return Err(CoreError::InvalidCredentials.into());
            }
        };

        self.current = Some(user.clone());
        self.persist_session()?;
        info!(username = %user.username, role = ?user.role, "User logged in");
        Ok(user)
    }

    /// Ends the session and clears the persisted copy.
    pub fn logout(&mut self) -> StoreResult<()> {
        if let Some(user) = self.current.take() {
            info!(username = %user.username, "User logged out");
        }
        self.persist_session()
    }

    // -------------------------------------------------------------------------
    // Accounts
    // -------------------------------------------------------------------------

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Case-insensitive username lookup.
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
    }

    /// Creates an account. Usernames are unique case-insensitively
    /// even though login matching is case-sensitive, so near-duplicate
    /// accounts cannot be created.
    pub fn add_user(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
        full_name: &str,
    ) -> StoreResult<User> {
        validate_username(username)?;
        if self.find_by_username(username).is_some() {
            return Err(CoreError::DuplicateUsername(username.to_string()).into());
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: password.to_string(),
            role,
            full_name: full_name.to_string(),
            created_at: Utc::now(),
            is_active: true,
        };
        self.users.push(user.clone());
        self.persist_users()?;
        info!(username = %user.username, role = ?role, "User added");
        Ok(user)
    }

    /// Merges a partial update into an account. When the updated
    /// account is the one currently logged in, the session copy is
    /// refreshed too.
    pub fn update_user(&mut self, id: &str, update: UserUpdate) -> StoreResult<User> {
        if let Some(username) = &update.username {
            validate_username(username)?;
            let taken = self
                .find_by_username(username)
                .is_some_and(|existing| existing.id != id);
            if taken {
                return Err(CoreError::DuplicateUsername(username.clone()).into());
            }
        }

        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found("User", id))?;

        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(password) = update.password {
            user.password = password;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }

        let updated = user.clone();
        self.persist_users()?;

        if self.current.as_ref().is_some_and(|c| c.id == id) {
            self.current = Some(updated.clone());
            self.persist_session()?;
        }
        debug!(id, "User updated");
        Ok(updated)
    }

    /// Removes an account. The logged-in user cannot delete itself.
    pub fn delete_user(&mut self, id: &str) -> StoreResult<()> {
        if self.current.as_ref().is_some_and(|c| c.id == id) {
            return Err(CoreError::CannotDeleteSelf.into());
        }
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        if self.users.len() == before {
            return Err(StoreError::not_found("User", id));
        }
        self.persist_users()?;
        info!(id, "User deleted");
        Ok(())
    }
}
