//! Signed-in user resolution.
//!
//! The current user is cached in-process so [`SessionService::current_user`]
//! stays synchronous. The cache is seeded from the persisted session on
//! startup and kept in step with it on login and logout.

use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use super::errors::SessionError;
use super::models::user::User;
use crate::storage::{Connection, SessionStorage};

#[derive(Clone)]
pub struct SessionService<C: Connection> {
    session_repository: C::SessionRepository,
    current: Arc<RwLock<Option<User>>>,
}

impl<C: Connection> SessionService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            session_repository: connection.create_session_repository(),
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Load the persisted session into the cache
    pub async fn restore(&self) -> Result<Option<User>, SessionError> {
        let user = self.session_repository.load_session().await?;
        match &user {
            Some(u) => info!("Restored session for {}", u.email),
            None => info!("No persisted session"),
        }
        self.set_current(user.clone());
        Ok(user)
    }

    pub fn current_user(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let accounts = self.session_repository.list_accounts().await?;
        let Some(account) = accounts.into_iter().find(|a| a.matches(email, password)) else {
            warn!("Rejected login for {}", email.trim());
            return Err(SessionError::InvalidCredentials);
        };

        self.session_repository.save_session(&account.user).await?;
        self.set_current(Some(account.user.clone()));
        info!("Signed in {} as {:?}", account.user.email, account.user.role);
        Ok(account.user)
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        self.session_repository.clear_session().await?;
        self.set_current(None);
        info!("Signed out");
        Ok(())
    }

    fn set_current(&self, user: Option<User>) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = user;
    }
}
