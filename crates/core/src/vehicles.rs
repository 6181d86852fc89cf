//! Vehicles

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::new_key_type;

new_key_type! {
    /// Vehicle Key
    pub struct VehicleKey;
}

/// Broad vehicle class used for category filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    /// Cars of any body style.
    Car,
    /// Motorcycles.
    Motorcycle,
    /// Trucks and vans.
    Truck,
    /// Scooters and mopeds.
    Scooter,
    /// Bicycles.
    Bicycle,
}

impl VehicleClass {
    /// All classes, in the order the category chips display them.
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Car,
        VehicleClass::Motorcycle,
        VehicleClass::Truck,
        VehicleClass::Scooter,
        VehicleClass::Bicycle,
    ];

    /// Plural display label for the class chip.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            VehicleClass::Car => "Cars",
            VehicleClass::Motorcycle => "Bikes",
            VehicleClass::Truck => "Trucks",
            VehicleClass::Scooter => "Scooters",
            VehicleClass::Bicycle => "Bicycles",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a vehicle can currently be rented out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    /// Ready to rent.
    Available,
    /// Currently out with a renter.
    Rented,
    /// In the workshop.
    Maintenance,
    /// Withdrawn from the fleet.
    OutOfService,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Availability::Available => "Available",
            Availability::Rented => "Rented",
            Availability::Maintenance => "Maintenance",
            Availability::OutOfService => "Out of service",
        };

        f.write_str(label)
    }
}

/// Technical specifications shown on the booking details step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Specifications {
    /// Engine description, e.g. "2.0L Turbo".
    pub engine: String,

    /// Transmission type.
    pub transmission: String,

    /// Fuel type.
    pub fuel: String,

    /// Number of seats.
    pub seats: u8,

    /// Model year.
    pub year: i16,
}

impl Default for Specifications {
    fn default() -> Self {
        Specifications {
            engine: "2.0L Turbo".to_string(),
            transmission: "Automatic".to_string(),
            fuel: "Gasoline".to_string(),
            seats: 5,
            year: 2023,
        }
    }
}

/// A rentable vehicle.
///
/// Immutable for the duration of a booking flow; owned by the [`Catalog`].
///
/// [`Catalog`]: crate::catalog::Catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Display name, e.g. "BMW 3 Series".
    pub name: String,

    /// Display category, e.g. "Luxury Sedan".
    pub category: String,

    /// Broad class used for filtering.
    pub class: VehicleClass,

    /// Rental rate per day.
    pub daily_rate: Money<'static, Currency>,

    /// Average review rating.
    pub rating: f32,

    /// Number of reviews behind the rating.
    pub reviews: u32,

    /// Feature badges, e.g. "Automatic", "GPS".
    pub features: Vec<String>,

    /// Pickup location name.
    pub location: String,

    /// Fleet availability.
    pub availability: Availability,

    /// Marketing description; a stock blurb is substituted when absent.
    pub description: Option<String>,

    /// Technical specifications; stock specs are substituted when absent.
    pub specifications: Option<Specifications>,
}

impl Vehicle {
    /// Description for the details step, falling back to the stock blurb.
    #[must_use]
    pub fn description_or_default(&self) -> String {
        self.description.clone().unwrap_or_else(|| {
            format!(
                "Experience luxury and comfort with the {}. This {} offers exceptional \
                 performance and reliability for your journey. Perfect for both city \
                 driving and long-distance trips.",
                self.name,
                self.category.to_lowercase()
            )
        })
    }

    /// Specifications for the details step, falling back to stock specs.
    #[must_use]
    pub fn specifications_or_default(&self) -> Specifications {
        self.specifications.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use super::*;

    fn test_vehicle() -> Vehicle {
        Vehicle {
            name: "BMW 3 Series".to_string(),
            category: "Luxury Sedan".to_string(),
            class: VehicleClass::Car,
            daily_rate: Money::from_major(89, USD),
            rating: 4.8,
            reviews: 124,
            features: vec!["Automatic".to_string(), "GPS".to_string()],
            location: "Downtown".to_string(),
            availability: Availability::Available,
            description: None,
            specifications: None,
        }
    }

    #[test]
    fn description_falls_back_to_stock_blurb() {
        let vehicle = test_vehicle();

        let description = vehicle.description_or_default();

        assert!(
            description.contains("BMW 3 Series"),
            "blurb should mention the vehicle name"
        );
        assert!(
            description.contains("luxury sedan"),
            "blurb should mention the lowercased category"
        );
    }

    #[test]
    fn explicit_description_wins() {
        let mut vehicle = test_vehicle();
        vehicle.description = Some("A fine car.".to_string());

        assert_eq!(vehicle.description_or_default(), "A fine car.");
    }

    #[test]
    fn specifications_fall_back_to_stock_specs() {
        let vehicle = test_vehicle();

        let specs = vehicle.specifications_or_default();

        assert_eq!(specs.engine, "2.0L Turbo");
        assert_eq!(specs.seats, 5);
        assert_eq!(specs.year, 2023);
    }

    #[test]
    fn class_labels_match_category_chips() {
        assert_eq!(VehicleClass::Car.label(), "Cars");
        assert_eq!(VehicleClass::Motorcycle.label(), "Bikes");
        assert_eq!(VehicleClass::Truck.label(), "Trucks");
    }
}
