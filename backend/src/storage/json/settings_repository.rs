//! Settings repository backed by the JSON store.

use std::sync::Arc;

use crate::domain::models::settings::AppSettings;
use crate::storage::json::store::{JsonStore, StoreError};
use crate::storage::traits::SettingsStorage;

const SETTINGS_KEY: &str = "settings";

#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<JsonStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

impl SettingsStorage for SettingsRepository {
    fn load_settings(&self) -> AppSettings {
        self.store.get(SETTINGS_KEY, AppSettings::default())
    }

    fn store_settings(&self, settings: &AppSettings) -> Result<(), StoreError> {
        self.store.set(SETTINGS_KEY, settings)
    }
}
