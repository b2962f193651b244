//! Current-language state plus translated, formatted text for everything
//! the domain emits.

use chrono::{DateTime, Utc};
use log::info;
use std::sync::{Arc, Mutex};

use crate::domain::events::{ChangeEvent, EventBus};
use crate::domain::models::settings::AppSettings;
use crate::domain::models::vehicle::VehicleCategory;
use crate::domain::validation::ValidationIssue;
use crate::i18n::{self, Language};
use crate::storage::json::{SettingsRepository, StoreError};
use crate::storage::traits::SettingsStorage;

/// Holds the current language, persists changes, and broadcasts them so
/// every consumer refreshes its language-dependent formatting.
#[derive(Clone)]
pub struct LocalizationService {
    settings_repository: SettingsRepository,
    current: Arc<Mutex<Language>>,
    events: Arc<EventBus>,
}

impl LocalizationService {
    /// Load the persisted language (or the default) and start from there.
    pub fn new(settings_repository: SettingsRepository, events: Arc<EventBus>) -> Self {
        let language = settings_repository.load_settings().language;
        Self {
            settings_repository,
            current: Arc::new(Mutex::new(language)),
            events,
        }
    }

    pub fn language(&self) -> Language {
        *self.current.lock().unwrap()
    }

    /// Persist and apply a language change. Setting the language that is
    /// already active is a no-op and publishes nothing.
    pub fn set_language(&self, language: Language) -> Result<(), StoreError> {
        if self.language() == language {
            return Ok(());
        }
        self.settings_repository
            .store_settings(&AppSettings { language })?;
        *self.current.lock().unwrap() = language;
        info!("language set to {}", language.code());
        self.events.publish(ChangeEvent::LanguageChanged);
        Ok(())
    }

    /// Re-read the persisted language. Used after a backup import writes
    /// the settings section directly to storage.
    pub fn reload(&self) {
        *self.current.lock().unwrap() = self.settings_repository.load_settings().language;
    }

    pub fn translate(&self, key: &str) -> String {
        i18n::translate(self.language(), key)
    }

    pub fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        i18n::translate_with(self.language(), key, args)
    }

    /// Render a validation issue as user-visible text.
    pub fn describe_issue(&self, issue: &ValidationIssue) -> String {
        let args: Vec<(&str, &str)> = issue
            .args
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        i18n::translate_with(self.language(), issue.key, &args)
    }

    /// Render a storage error as user-visible text.
    pub fn describe_store_error(&self, error: &StoreError) -> String {
        self.translate(error.message_key())
    }

    /// Localized category name.
    pub fn category_label(&self, category: VehicleCategory, plural: bool) -> String {
        if plural {
            self.translate(&format!("{}_plural", category.label_key()))
        } else {
            self.translate(category.label_key())
        }
    }

    pub fn format_currency(&self, value: f64) -> String {
        i18n::format_currency(self.language(), value)
    }

    pub fn format_distance(&self, value: f64) -> String {
        i18n::format_distance(self.language(), value)
    }

    pub fn format_volume(&self, value: f64) -> String {
        i18n::format_volume(self.language(), value)
    }

    pub fn format_date(&self, date: &DateTime<Utc>) -> String {
        i18n::format_date(self.language(), date)
    }
}
