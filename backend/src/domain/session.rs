//! Transient per-session state.
//!
//! The active category, the selected vehicle and the history view toggle
//! are session context, owned by the caller and passed to the services
//! that need it. None of it is persisted.

use crate::domain::models::vehicle::{Vehicle, VehicleCategory};

/// History rendering mode for the active category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryView {
    #[default]
    Summary,
    Full,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    active_category: VehicleCategory,
    selected_vehicle: Option<Vehicle>,
    history_view: HistoryView,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(VehicleCategory::Car)
    }
}

impl SessionState {
    pub fn new(active_category: VehicleCategory) -> Self {
        Self {
            active_category,
            selected_vehicle: None,
            history_view: HistoryView::Summary,
        }
    }

    pub fn active_category(&self) -> VehicleCategory {
        self.active_category
    }

    /// Switch the active category. The history view toggle and the vehicle
    /// selection are both scoped to one category, so switching resets them.
    pub fn set_active_category(&mut self, category: VehicleCategory) {
        if category == self.active_category {
            return;
        }
        self.active_category = category;
        self.history_view = HistoryView::Summary;
        self.selected_vehicle = None;
    }

    pub fn history_view(&self) -> HistoryView {
        self.history_view
    }

    pub fn toggle_history_view(&mut self) {
        self.history_view = match self.history_view {
            HistoryView::Summary => HistoryView::Full,
            HistoryView::Full => HistoryView::Summary,
        };
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selected_vehicle.as_ref()
    }

    pub fn select_vehicle(&mut self, vehicle: Vehicle) {
        self.selected_vehicle = Some(vehicle);
    }

    pub fn clear_selection(&mut self) {
        self.selected_vehicle = None;
    }

    /// Efficiency to prefill the trip entry form with: the selected
    /// vehicle's stored value, if any vehicle is selected.
    pub fn trip_efficiency_prefill(&self) -> Option<f64> {
        self.selected_vehicle.as_ref().map(|v| v.efficiency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vehicle(category: VehicleCategory) -> Vehicle {
        Vehicle {
            id: "v-1".to_string(),
            name: "Onix".to_string(),
            efficiency: 12.5,
            category,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn switching_category_resets_view_and_selection() {
        let mut session = SessionState::new(VehicleCategory::Car);
        session.select_vehicle(vehicle(VehicleCategory::Car));
        session.toggle_history_view();
        assert_eq!(session.history_view(), HistoryView::Full);

        session.set_active_category(VehicleCategory::Motorcycle);
        assert_eq!(session.history_view(), HistoryView::Summary);
        assert!(session.selected_vehicle().is_none());
    }

    #[test]
    fn setting_the_same_category_changes_nothing() {
        let mut session = SessionState::new(VehicleCategory::Car);
        session.select_vehicle(vehicle(VehicleCategory::Car));
        session.toggle_history_view();

        session.set_active_category(VehicleCategory::Car);
        assert_eq!(session.history_view(), HistoryView::Full);
        assert!(session.selected_vehicle().is_some());
    }

    #[test]
    fn selection_drives_the_efficiency_prefill() {
        let mut session = SessionState::default();
        assert_eq!(session.trip_efficiency_prefill(), None);

        session.select_vehicle(vehicle(VehicleCategory::Car));
        assert_eq!(session.trip_efficiency_prefill(), Some(12.5));

        session.clear_selection();
        assert_eq!(session.trip_efficiency_prefill(), None);
    }
}
