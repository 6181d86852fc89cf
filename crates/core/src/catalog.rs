//! Vehicle catalog

use rust_decimal::Decimal;
use slotmap::SlotMap;
use thiserror::Error;

use crate::vehicles::{Availability, Vehicle, VehicleClass, VehicleKey};

/// Errors related to catalog lookups and admin edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The vehicle key does not exist in the catalog.
    #[error("vehicle not found")]
    VehicleNotFound,

    /// A vehicle was submitted without a name.
    #[error("vehicle name is required")]
    MissingName,

    /// A vehicle was submitted without a pickup location.
    #[error("vehicle location is required")]
    MissingLocation,

    /// A vehicle was submitted with a zero or negative daily rate.
    #[error("daily rate must be positive")]
    NonPositiveRate,
}

/// Search and filter criteria for the catalog, mirroring the search bar and
/// category chips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Case-insensitive match against name, category and location.
    pub query: Option<String>,

    /// Restrict to a single vehicle class; `None` is the "All" chip.
    pub class: Option<VehicleClass>,

    /// Restrict to an availability state.
    pub availability: Option<Availability>,
}

impl CatalogFilter {
    /// Whether a vehicle passes every criterion of this filter.
    #[must_use]
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(class) = self.class {
            if vehicle.class != class {
                return false;
            }
        }

        if let Some(availability) = self.availability {
            if vehicle.availability != availability {
                return false;
            }
        }

        if let Some(query) = self.query.as_deref() {
            let query = query.to_lowercase();

            let haystack = [&vehicle.name, &vehicle.category, &vehicle.location];

            if !haystack
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
            {
                return false;
            }
        }

        true
    }
}

/// The vehicle catalog: the read-only collaborator the booking wizard is
/// instantiated with, plus the admin CRUD surface behind vehicle management.
#[derive(Debug, Default)]
pub struct Catalog {
    vehicles: SlotMap<VehicleKey, Vehicle>,
    order: Vec<VehicleKey>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Add a vehicle to the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the vehicle fails validation.
    pub fn insert(&mut self, vehicle: Vehicle) -> Result<VehicleKey, CatalogError> {
        validate(&vehicle)?;

        let key = self.vehicles.insert(vehicle);
        self.order.push(key);

        Ok(key)
    }

    /// Look up a vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::VehicleNotFound`] if the key is stale.
    pub fn get(&self, key: VehicleKey) -> Result<&Vehicle, CatalogError> {
        self.vehicles.get(key).ok_or(CatalogError::VehicleNotFound)
    }

    /// Replace a vehicle's record.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the key is stale or the replacement
    /// fails validation.
    pub fn update(&mut self, key: VehicleKey, vehicle: Vehicle) -> Result<(), CatalogError> {
        validate(&vehicle)?;

        let slot = self
            .vehicles
            .get_mut(key)
            .ok_or(CatalogError::VehicleNotFound)?;
        *slot = vehicle;

        Ok(())
    }

    /// Remove a vehicle from the catalog, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::VehicleNotFound`] if the key is stale.
    pub fn remove(&mut self, key: VehicleKey) -> Result<Vehicle, CatalogError> {
        let vehicle = self
            .vehicles
            .remove(key)
            .ok_or(CatalogError::VehicleNotFound)?;
        self.order.retain(|candidate| *candidate != key);

        Ok(vehicle)
    }

    /// Iterate over vehicles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleKey, &Vehicle)> {
        self.order
            .iter()
            .filter_map(|key| self.vehicles.get(*key).map(|vehicle| (*key, vehicle)))
    }

    /// Number of vehicles in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Vehicles passing the filter, in insertion order.
    #[must_use]
    pub fn search(&self, filter: &CatalogFilter) -> Vec<(VehicleKey, &Vehicle)> {
        self.iter()
            .filter(|(_, vehicle)| filter.matches(vehicle))
            .collect()
    }

    /// Vehicle counts per class, in chip display order.
    #[must_use]
    pub fn class_counts(&self) -> Vec<(VehicleClass, usize)> {
        VehicleClass::ALL
            .into_iter()
            .map(|class| {
                let count = self
                    .iter()
                    .filter(|(_, vehicle)| vehicle.class == class)
                    .count();

                (class, count)
            })
            .collect()
    }
}

fn validate(vehicle: &Vehicle) -> Result<(), CatalogError> {
    if vehicle.name.trim().is_empty() {
        return Err(CatalogError::MissingName);
    }

    if vehicle.location.trim().is_empty() {
        return Err(CatalogError::MissingLocation);
    }

    if *vehicle.daily_rate.amount() <= Decimal::ZERO {
        return Err(CatalogError::NonPositiveRate);
    }

    Ok(())
}
