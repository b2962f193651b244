//! # Localization tables and formatting
//!
//! Key -> template-string tables for the two supported languages, plus the
//! display formatting rules that depend on the current language (decimal
//! separator, currency, date pattern). Templates support named placeholder
//! substitution: `{name}` tokens are replaced by supplied values; unknown
//! tokens are left intact.
//!
//! Display rounding is one decimal for distances and volumes and two
//! decimals for currency. Stored values are never rounded; only the
//! rendered text is.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Supported UI languages. Portuguese is the default: the app ships for
/// Brazilian ride-share drivers first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Pt, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }

    /// Parse a language code. Returns `None` for unsupported codes so the
    /// caller can decide which language to fall back to.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "pt" | "pt-br" => Some(Language::Pt),
            "en" | "en-us" => Some(Language::En),
            _ => None,
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Language::Pt => ',',
            Language::En => '.',
        }
    }

    fn date_pattern(&self) -> &'static str {
        match self {
            Language::Pt => "%d/%m/%Y",
            Language::En => "%m/%d/%Y",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

type Table = HashMap<&'static str, &'static str>;

static PT: Lazy<Table> = Lazy::new(|| {
    let mut t = HashMap::new();
    // Validation
    t.insert("error.vehicle_name_length", "O nome deve ter entre {min} e {max} caracteres");
    t.insert("error.vehicle_efficiency_range", "Consumo inválido: informe um valor entre {min} e {max} km/L");
    t.insert("error.vehicle_category_unknown", "Categoria de veículo inválida");
    t.insert("error.odometer_start_range", "Quilometragem inicial deve estar entre 0 e {max}");
    t.insert("error.odometer_end_greater", "Quilometragem final deve ser maior que a inicial");
    t.insert("error.odometer_end_range", "Quilometragem final deve ser no máximo {max}");
    t.insert("error.trip_distance_max", "Distância da viagem não pode passar de {max} km");
    t.insert("error.price_range", "Preço do combustível deve estar entre {min} e {max}");
    t.insert("error.earnings_range", "Ganhos devem estar entre 0 e {max}");
    // Service errors
    t.insert("error.vehicle_duplicate", "Já existe um veículo \"{name}\" nessa categoria");
    t.insert("error.vehicle_not_found", "Veículo não encontrado");
    t.insert("error.history_confirmation_required", "Confirme antes de limpar o histórico");
    // Storage
    t.insert("error.storage_unavailable", "Armazenamento local indisponível");
    t.insert("error.storage_quota", "Espaço de armazenamento esgotado");
    t.insert("error.storage_write", "Falha ao salvar os dados");
    // Import
    t.insert("import.invalid_json", "Arquivo de backup inválido");
    t.insert("import.not_an_object", "Arquivo de backup não tem o formato esperado");
    t.insert("import.already_running", "Uma importação já está em andamento");
    t.insert("import.vehicles_malformed", "Seção de veículos ignorada: formato inválido");
    t.insert("import.history_malformed", "Seção de histórico ignorada: formato inválido");
    t.insert("import.settings_malformed", "Seção de configurações ignorada: formato inválido");
    t.insert("import.unknown_language", "Idioma \"{code}\" não suportado, mantendo o atual");
    t.insert("import.success", "Backup importado");
    t.insert("import.failed", "Nenhuma seção do backup pôde ser importada");
    // Notices
    t.insert("notice.vehicle_added", "Veículo \"{name}\" cadastrado");
    t.insert("notice.vehicle_deleted", "Veículo \"{name}\" removido");
    t.insert("notice.trip_recorded", "Viagem registrada: {distance} por {cost}");
    t.insert("notice.history_cleared", "{count} registros removidos do histórico");
    // Confirmations
    t.insert("confirm.clear_history", "Limpar todo o histórico de {category}?");
    // Statistics labels
    t.insert("stats.total_distance", "Distância total");
    t.insert("stats.total_cost", "Gasto total");
    t.insert("stats.average_efficiency", "Consumo médio");
    // Categories
    t.insert("category.car", "carro");
    t.insert("category.car_plural", "carros");
    t.insert("category.motorcycle", "moto");
    t.insert("category.motorcycle_plural", "motos");
    t
});

static EN: Lazy<Table> = Lazy::new(|| {
    let mut t = HashMap::new();
    // Validation
    t.insert("error.vehicle_name_length", "Name must be between {min} and {max} characters");
    t.insert("error.vehicle_efficiency_range", "Invalid efficiency: enter a value between {min} and {max} km/L");
    t.insert("error.vehicle_category_unknown", "Unknown vehicle category");
    t.insert("error.odometer_start_range", "Initial odometer reading must be between 0 and {max}");
    t.insert("error.odometer_end_greater", "Final odometer reading must be greater than the initial one");
    t.insert("error.odometer_end_range", "Final odometer reading must be at most {max}");
    t.insert("error.trip_distance_max", "Trip distance cannot exceed {max} km");
    t.insert("error.price_range", "Fuel price must be between {min} and {max}");
    t.insert("error.earnings_range", "Earnings must be between 0 and {max}");
    // Service errors
    t.insert("error.vehicle_duplicate", "A vehicle named \"{name}\" already exists in this category");
    t.insert("error.vehicle_not_found", "Vehicle not found");
    t.insert("error.history_confirmation_required", "Confirm before clearing the history");
    // Storage
    t.insert("error.storage_unavailable", "Local storage is unavailable");
    t.insert("error.storage_quota", "Storage quota exceeded");
    t.insert("error.storage_write", "Failed to save data");
    // Import
    t.insert("import.invalid_json", "Backup file is not valid");
    t.insert("import.not_an_object", "Backup file does not have the expected format");
    t.insert("import.already_running", "An import is already in progress");
    t.insert("import.vehicles_malformed", "Vehicles section skipped: invalid format");
    t.insert("import.history_malformed", "History section skipped: invalid format");
    t.insert("import.settings_malformed", "Settings section skipped: invalid format");
    t.insert("import.unknown_language", "Language \"{code}\" is not supported, keeping the current one");
    t.insert("import.success", "Backup imported");
    t.insert("import.failed", "No backup section could be imported");
    // Notices
    t.insert("notice.vehicle_added", "Vehicle \"{name}\" registered");
    t.insert("notice.vehicle_deleted", "Vehicle \"{name}\" removed");
    t.insert("notice.trip_recorded", "Trip saved: {distance} for {cost}");
    t.insert("notice.history_cleared", "{count} records removed from history");
    // Confirmations
    t.insert("confirm.clear_history", "Clear the whole {category} history?");
    // Statistics labels
    t.insert("stats.total_distance", "Total distance");
    t.insert("stats.total_cost", "Total cost");
    t.insert("stats.average_efficiency", "Average efficiency");
    // Categories
    t.insert("category.car", "car");
    t.insert("category.car_plural", "cars");
    t.insert("category.motorcycle", "motorcycle");
    t.insert("category.motorcycle_plural", "motorcycles");
    t
});

fn table(language: Language) -> &'static Table {
    match language {
        Language::Pt => &PT,
        Language::En => &EN,
    }
}

/// Look up the raw template for `key`, falling back to English and finally
/// to the key itself so a missing entry never produces blank UI text.
pub fn translate(language: Language, key: &str) -> String {
    table(language)
        .get(key)
        .or_else(|| EN.get(key))
        .map(|s| (*s).to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Replace `{name}` tokens in `template` with the supplied values.
/// Tokens without a supplied value are left intact.
pub fn render(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{}}}", name), value);
    }
    out
}

/// Translate `key` and substitute the named placeholders.
pub fn translate_with(language: Language, key: &str, args: &[(&str, &str)]) -> String {
    render(&translate(language, key), args)
}

/// Format a number with the language's decimal separator.
pub fn format_number(language: Language, value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    match language.decimal_separator() {
        '.' => text,
        sep => text.replace('.', &sep.to_string()),
    }
}

/// Currency, two decimals: "R$ 56,78" (pt) / "R$ 56.78" (en).
pub fn format_currency(language: Language, value: f64) -> String {
    format!("R$ {}", format_number(language, value, 2))
}

/// Distance, one decimal: "120,5 km" (pt) / "120.5 km" (en).
pub fn format_distance(language: Language, value: f64) -> String {
    format!("{} km", format_number(language, value, 1))
}

/// Fuel volume, one decimal: "9,6 L" (pt) / "9.6 L" (en).
pub fn format_volume(language: Language, value: f64) -> String {
    format!("{} L", format_number(language, value, 1))
}

/// Date in the language's conventional order.
pub fn format_date(language: Language, date: &DateTime<Utc>) -> String {
    date.format(language.date_pattern()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn every_portuguese_key_has_an_english_entry() {
        for key in PT.keys() {
            assert!(EN.contains_key(key), "missing english entry for {}", key);
        }
        for key in EN.keys() {
            assert!(PT.contains_key(key), "missing portuguese entry for {}", key);
        }
    }

    #[test]
    fn unknown_key_falls_back_to_the_key_itself() {
        assert_eq!(translate(Language::Pt, "no.such.key"), "no.such.key");
    }

    #[test]
    fn placeholders_are_substituted_by_name() {
        let text = translate_with(
            Language::En,
            "error.vehicle_name_length",
            &[("min", "2"), ("max", "40")],
        );
        assert_eq!(text, "Name must be between 2 and 40 characters");
    }

    #[test]
    fn unknown_placeholders_are_left_intact() {
        assert_eq!(render("hello {name}", &[("other", "x")]), "hello {name}");
    }

    #[test]
    fn portuguese_uses_comma_decimals() {
        assert_eq!(format_currency(Language::Pt, 56.7796), "R$ 56,78");
        assert_eq!(format_currency(Language::En, 56.7796), "R$ 56.78");
        assert_eq!(format_distance(Language::Pt, 120.5), "120,5 km");
        assert_eq!(format_volume(Language::En, 9.64), "9.6 L");
    }

    #[test]
    fn dates_follow_the_language_convention() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(format_date(Language::Pt, &date), "09/03/2024");
        assert_eq!(format_date(Language::En, &date), "03/09/2024");
    }

    #[test]
    fn language_codes_round_trip() {
        assert_eq!(Language::from_code("pt"), Some(Language::Pt));
        assert_eq!(Language::from_code("PT-BR"), Some(Language::Pt));
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("de"), None);
    }
}
