//! Vehicle Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_price},
    vehicles::{Availability, Specifications, Vehicle, VehicleClass},
};

/// Wrapper for vehicles in YAML
#[derive(Debug, Deserialize)]
pub struct VehiclesFixture {
    /// Vehicle entries, in catalog display order
    pub vehicles: Vec<VehicleFixture>,
}

/// Vehicle Fixture
#[derive(Debug, Deserialize)]
pub struct VehicleFixture {
    /// Stable id other fixture files reference
    pub id: String,

    /// Vehicle name
    pub name: String,

    /// Display category
    pub category: String,

    /// Filter-chip class
    pub class: VehicleClass,

    /// Daily rate (e.g., "89 USD")
    pub daily_rate: String,

    /// Average rating
    pub rating: f32,

    /// Review count
    pub reviews: u32,

    /// Feature badges
    #[serde(default)]
    pub features: Vec<String>,

    /// Pickup location
    pub location: String,

    /// Availability state
    pub availability: Availability,

    /// Long-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Technical specifications
    #[serde(default)]
    pub specifications: Option<Specifications>,
}

impl TryFrom<VehicleFixture> for Vehicle {
    type Error = FixtureError;

    fn try_from(fixture: VehicleFixture) -> Result<Self, Self::Error> {
        let (amount, currency) = parse_price(&fixture.daily_rate)?;

        Ok(Vehicle {
            name: fixture.name,
            category: fixture.category,
            class: fixture.class,
            daily_rate: Money::from_decimal(amount, currency),
            rating: fixture.rating,
            reviews: fixture.reviews,
            features: fixture.features,
            location: fixture.location,
            availability: fixture.availability,
            description: fixture.description,
            specifications: fixture.specifications,
        })
    }
}
