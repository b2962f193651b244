//! Persisted application settings.

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Settings persisted under their own storage key, independent of the data
/// collections. A corrupt settings file simply falls back to the default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppSettings {
    pub language: Language,
}
