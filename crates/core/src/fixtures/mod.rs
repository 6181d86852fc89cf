//! Fixtures: seeded catalogs, directories and booking histories from YAML.

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;

use crate::{
    booking::store::{BookingStore, InMemoryBookingStore},
    catalog::{Catalog, CatalogError},
    users::{Directory, DirectoryError, UserKey},
    vehicles::VehicleKey,
};

pub mod bookings;
pub mod users;
pub mod vehicles;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Vehicle not found
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Currency mismatch between vehicles
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Catalog rejected a vehicle
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Directory rejected a user
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Quoting a fixture booking failed
    #[error(transparent)]
    Quote(#[from] crate::pricing::QuoteError),
}

/// A loaded fixture set: catalog, user directory and booking history.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: Catalog,
    directory: Directory,
    store: InMemoryBookingStore,

    /// String key -> slotmap key mappings for lookups
    vehicle_keys: FxHashMap<String, VehicleKey>,
    user_keys: FxHashMap<String, UserKey>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Fixture {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            directory: Directory::new(),
            store: InMemoryBookingStore::new(),
            vehicle_keys: FxHashMap::default(),
            user_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load a complete fixture set (vehicles, users and bookings with the
    /// same name).
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_vehicles(name)?
            .load_users(name)?
            .load_bookings(name)?;

        Ok(fixture)
    }

    /// Load a complete fixture set from a custom base path.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_vehicles(name)?
            .load_users(name)?
            .load_bookings(name)?;

        Ok(fixture)
    }

    /// Load vehicles from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is
    /// malformed, or the set mixes currencies.
    pub fn load_vehicles(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("vehicles").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: vehicles::VehiclesFixture = serde_norway::from_str(&contents)?;

        for vehicle_fixture in fixture.vehicles {
            let (_, currency) = parse_price(&vehicle_fixture.daily_rate)?;

            if let Some(existing) = self.currency {
                if existing != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let id = vehicle_fixture.id.clone();
            let vehicle = vehicle_fixture.try_into()?;
            let key = self.catalog.insert(vehicle)?;

            self.vehicle_keys.insert(id, key);
        }

        Ok(self)
    }

    /// Load users from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the
    /// directory rejects an entry.
    pub fn load_users(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("users").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: users::UsersFixture = serde_norway::from_str(&contents)?;

        for user_fixture in fixture.users {
            let id = user_fixture.id.clone();
            let key = self.directory.add(user_fixture.into())?;

            self.user_keys.insert(id, key);
        }

        Ok(self)
    }

    /// Load bookings from a YAML fixture file.
    ///
    /// Booking costs are not stored in the fixture; each entry is re-quoted
    /// from the referenced vehicle's daily rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an entry
    /// references an unknown vehicle.
    pub fn load_bookings(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("bookings").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: bookings::BookingsFixture = serde_norway::from_str(&contents)?;

        for booking_fixture in fixture.bookings {
            let key = self.vehicle_key(&booking_fixture.vehicle)?;
            let vehicle = self
                .catalog
                .get(key)
                .map_err(|_err| FixtureError::VehicleNotFound(booking_fixture.vehicle.clone()))?;

            let confirmation = booking_fixture.into_confirmation(key, vehicle)?;

            self.store.record_booking(confirmation);
        }

        Ok(self)
    }

    /// Get a vehicle key by its string id
    ///
    /// # Errors
    ///
    /// Returns an error if the vehicle is not found.
    pub fn vehicle_key(&self, id: &str) -> Result<VehicleKey, FixtureError> {
        self.vehicle_keys
            .get(id)
            .copied()
            .ok_or_else(|| FixtureError::VehicleNotFound(id.to_string()))
    }

    /// Get a user key by its string id
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found.
    pub fn user_key(&self, id: &str) -> Result<UserKey, FixtureError> {
        self.user_keys
            .get(id)
            .copied()
            .ok_or_else(|| FixtureError::UserNotFound(id.to_string()))
    }

    /// The loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The loaded user directory.
    #[must_use]
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Mutable access to the directory, for login and profile flows.
    pub fn directory_mut(&mut self) -> &mut Directory {
        &mut self.directory
    }

    /// The loaded booking history.
    #[must_use]
    pub fn store(&self) -> &InMemoryBookingStore {
        &self.store
    }

    /// Currency of the fixture set, once vehicles are loaded.
    #[must_use]
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Dismantle the fixture into its collaborators.
    #[must_use]
    pub fn into_parts(self) -> (Catalog, Directory, InMemoryBookingStore) {
        (self.catalog, self.directory, self.store)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse price string (e.g., "89 USD") into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}
