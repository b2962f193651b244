//! Backup import outcome types.

/// What happened to one section of an imported backup file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionStatus {
    /// The section was an array/object of the expected shape and its
    /// contents replaced the stored collection. `skipped` counts individual
    /// records that did not parse and were dropped.
    Imported { count: usize, skipped: usize },
    /// The section was present but not of the expected shape; it was
    /// skipped with a warning and the stored data left untouched.
    Malformed,
    /// The section was absent from the file.
    Missing,
}

impl SectionStatus {
    pub fn accepted(&self) -> bool {
        matches!(self, SectionStatus::Imported { .. })
    }
}

/// Per-section outcome of a backup import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub vehicles: SectionStatus,
    pub history: SectionStatus,
    pub settings: SectionStatus,
    /// Language code found in the file but not supported; the current
    /// language was kept instead.
    pub unknown_language: Option<String>,
}

impl ImportReport {
    /// Partial success is deliberate policy: the import counts as
    /// successful when at least one section was accepted, even if the
    /// others were malformed.
    pub fn success(&self) -> bool {
        self.vehicles.accepted() || self.history.accepted() || self.settings.accepted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_accepted_section_is_enough_for_success() {
        let report = ImportReport {
            vehicles: SectionStatus::Imported { count: 2, skipped: 0 },
            history: SectionStatus::Malformed,
            settings: SectionStatus::Missing,
            unknown_language: None,
        };
        assert!(report.success());
    }

    #[test]
    fn nothing_accepted_means_failure() {
        let report = ImportReport {
            vehicles: SectionStatus::Malformed,
            history: SectionStatus::Missing,
            settings: SectionStatus::Malformed,
            unknown_language: None,
        };
        assert!(!report.success());
    }
}
