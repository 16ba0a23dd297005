use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::connection::CsvConnection;
use crate::domain::models::settings::AgencySettings;
use crate::storage::traits::SettingsStorage;

const SETTINGS_FILE: &str = "settings.yaml";

/// YAML-backed agency settings. The dashboard only reads this file.
#[derive(Clone)]
pub struct SettingsRepository {
    connection: CsvConnection,
}

impl SettingsRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SettingsStorage for SettingsRepository {
    async fn get_settings(&self) -> Result<AgencySettings> {
        match self.connection.read_yaml(SETTINGS_FILE)? {
            Some(settings) => Ok(settings),
            None => {
                debug!("No settings file, using defaults");
                Ok(AgencySettings::default())
            }
        }
    }
}
