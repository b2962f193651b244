//! Vehicle management: registration, selection, deletion.

use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::commands::vehicle::{
    CreateVehicleCommand, CreateVehicleResult, DeleteVehicleCommand, DeleteVehicleResult,
    ListVehiclesQuery, ListVehiclesResult, SelectVehicleCommand,
};
use crate::domain::config::Limits;
use crate::domain::events::{ChangeEvent, EventBus};
use crate::domain::models::vehicle::{Vehicle, VehicleCategory};
use crate::domain::session::SessionState;
use crate::domain::validation::{validate_vehicle, ValidationIssue};
use crate::storage::json::{StoreError, VehicleRepository};
use crate::storage::traits::VehicleStorage;
use chrono::Utc;

#[derive(Debug, Error)]
pub enum VehicleError {
    /// The form input failed validation; every violation is listed.
    #[error("vehicle input failed validation")]
    Invalid(Vec<ValidationIssue>),

    /// A vehicle with the same (case-insensitive) name already exists in
    /// the same category.
    #[error("a vehicle named '{name}' already exists in category {category}")]
    Duplicate {
        name: String,
        category: VehicleCategory,
    },

    #[error("vehicle not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Service for managing the registered vehicles.
#[derive(Clone)]
pub struct VehicleService {
    vehicle_repository: VehicleRepository,
    limits: Limits,
    events: Arc<EventBus>,
}

impl VehicleService {
    pub fn new(
        vehicle_repository: VehicleRepository,
        limits: Limits,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            vehicle_repository,
            limits,
            events,
        }
    }

    /// List registered vehicles, optionally filtered to one category.
    pub fn list_vehicles(&self, query: ListVehiclesQuery) -> ListVehiclesResult {
        let mut vehicles = self.vehicle_repository.list_vehicles();
        if let Some(category) = query.category {
            vehicles.retain(|v| v.category == category);
        }
        ListVehiclesResult { vehicles }
    }

    /// Register a new vehicle.
    ///
    /// Validates the form input, rejects case-insensitive name+category
    /// duplicates, persists, and auto-selects the vehicle when it is the
    /// first of the session's active category.
    pub fn create_vehicle(
        &self,
        command: CreateVehicleCommand,
        session: &mut SessionState,
    ) -> Result<CreateVehicleResult, VehicleError> {
        let input = validate_vehicle(
            &self.limits,
            &command.name,
            &command.efficiency,
            &command.category,
        )
        .map_err(VehicleError::Invalid)?;

        let vehicles = self.vehicle_repository.list_vehicles();
        let lowered = input.name.to_lowercase();
        if vehicles
            .iter()
            .any(|v| v.category == input.category && v.name.to_lowercase() == lowered)
        {
            warn!(
                "rejecting duplicate vehicle '{}' in category {}",
                input.name, input.category
            );
            return Err(VehicleError::Duplicate {
                name: input.name,
                category: input.category,
            });
        }

        let first_of_category = !vehicles.iter().any(|v| v.category == input.category);

        let now = Utc::now();
        let vehicle = Vehicle {
            id: Vehicle::generate_id(now.timestamp_millis() as u64),
            name: input.name,
            efficiency: input.efficiency,
            category: input.category,
            created_at: now,
        };

        self.vehicle_repository.store_vehicle(&vehicle)?;

        let auto_selected =
            first_of_category && session.active_category() == vehicle.category;
        if auto_selected {
            session.select_vehicle(vehicle.clone());
        }

        info!(
            "created vehicle {} ('{}', {}), auto_selected={}",
            vehicle.id, vehicle.name, vehicle.category, auto_selected
        );
        self.events.publish(ChangeEvent::VehiclesChanged);

        Ok(CreateVehicleResult {
            vehicle,
            auto_selected,
        })
    }

    /// Load a vehicle into the session's transient selection slot.
    pub fn select_vehicle(
        &self,
        command: SelectVehicleCommand,
        session: &mut SessionState,
    ) -> Result<Vehicle, VehicleError> {
        let vehicle = self
            .vehicle_repository
            .list_vehicles()
            .into_iter()
            .find(|v| v.id == command.vehicle_id)
            .ok_or_else(|| VehicleError::NotFound(command.vehicle_id.clone()))?;

        session.select_vehicle(vehicle.clone());
        info!("selected vehicle {} ('{}')", vehicle.id, vehicle.name);
        Ok(vehicle)
    }

    /// Delete a vehicle by id, clearing the session selection if it
    /// pointed at the deleted vehicle.
    pub fn delete_vehicle(
        &self,
        command: DeleteVehicleCommand,
        session: &mut SessionState,
    ) -> Result<DeleteVehicleResult, VehicleError> {
        let vehicle = self
            .vehicle_repository
            .list_vehicles()
            .into_iter()
            .find(|v| v.id == command.vehicle_id)
            .ok_or_else(|| VehicleError::NotFound(command.vehicle_id.clone()))?;

        self.vehicle_repository.delete_vehicle(&command.vehicle_id)?;

        let was_selected = session
            .selected_vehicle()
            .map(|v| v.id == command.vehicle_id)
            .unwrap_or(false);
        if was_selected {
            session.clear_selection();
        }

        info!("deleted vehicle {} ('{}')", vehicle.id, vehicle.name);
        self.events.publish(ChangeEvent::VehiclesChanged);

        Ok(DeleteVehicleResult { deleted: vehicle })
    }
}
