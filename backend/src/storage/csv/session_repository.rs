use anyhow::Result;
use async_trait::async_trait;
use shared::Role;
use tracing::info;

use super::connection::CsvConnection;
use crate::domain::models::user::{User, UserAccount};
use crate::storage::traits::SessionStorage;

const SESSION_FILE: &str = "session.yaml";
const USERS_FILE: &str = "users.yaml";

/// YAML-backed session and demo account store
#[derive(Clone)]
pub struct SessionRepository {
    connection: CsvConnection,
}

impl SessionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Accounts written on first use so the dashboard can be signed into
    pub fn demo_accounts() -> Vec<UserAccount> {
        let account = |id: &str, name: &str, email: &str, role: Role| UserAccount {
            user: User {
                id: id.to_string(),
                display_name: Some(name.to_string()),
                email: email.to_string(),
                role,
            },
            password: "demo123".to_string(),
        };

        vec![
            account("user-owner", "Agency Owner", "owner@agency.test", Role::Owner),
            account("user-counsellor", "Lead Counsellor", "counsellor@agency.test", Role::Counsellor),
            account("user-viewer", "Read Only", "viewer@agency.test", Role::Viewer),
        ]
    }
}

#[async_trait]
impl SessionStorage for SessionRepository {
    async fn load_session(&self) -> Result<Option<User>> {
        self.connection.read_yaml(SESSION_FILE)
    }

    async fn save_session(&self, user: &User) -> Result<()> {
        self.connection.write_yaml(SESSION_FILE, user)
    }

    async fn clear_session(&self) -> Result<()> {
        self.connection.remove_file(SESSION_FILE)
    }

    async fn list_accounts(&self) -> Result<Vec<UserAccount>> {
        if let Some(accounts) = self.connection.read_yaml(USERS_FILE)? {
            return Ok(accounts);
        }

        let accounts = Self::demo_accounts();
        info!("Seeding {} demo accounts", accounts.len());
        self.connection.write_yaml(USERS_FILE, &accounts)?;
        Ok(accounts)
    }
}
