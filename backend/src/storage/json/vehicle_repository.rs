//! Vehicle collection repository backed by the JSON store.

use log::debug;
use std::sync::Arc;

use crate::domain::models::vehicle::Vehicle;
use crate::storage::json::store::{JsonStore, StoreError};
use crate::storage::traits::VehicleStorage;

const VEHICLES_KEY: &str = "vehicles";

/// Stores the whole vehicle collection under one key; every mutation is a
/// read-modify-write of the full list, which is fine at this collection size
/// and keeps each write atomic.
#[derive(Clone)]
pub struct VehicleRepository {
    store: Arc<JsonStore>,
}

impl VehicleRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

impl VehicleStorage for VehicleRepository {
    fn list_vehicles(&self) -> Vec<Vehicle> {
        self.store.get(VEHICLES_KEY, Vec::new())
    }

    fn store_vehicle(&self, vehicle: &Vehicle) -> Result<(), StoreError> {
        let mut vehicles = self.list_vehicles();
        vehicles.push(vehicle.clone());
        self.store.set(VEHICLES_KEY, &vehicles)?;
        debug!("stored vehicle {} ({} total)", vehicle.id, vehicles.len());
        Ok(())
    }

    fn delete_vehicle(&self, vehicle_id: &str) -> Result<bool, StoreError> {
        let mut vehicles = self.list_vehicles();
        let before = vehicles.len();
        vehicles.retain(|v| v.id != vehicle_id);
        if vehicles.len() == before {
            return Ok(false);
        }
        self.store.set(VEHICLES_KEY, &vehicles)?;
        Ok(true)
    }

    fn replace_all_vehicles(&self, vehicles: &[Vehicle]) -> Result<(), StoreError> {
        self.store.set(VEHICLES_KEY, vehicles)
    }
}
