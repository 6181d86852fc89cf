//! Booking Fixtures

use jiff::civil::DateTime;
use serde::Deserialize;

use crate::{
    booking::{BookingConfirmation, BookingStatus},
    fixtures::FixtureError,
    pricing::{CostBreakdown, rental_days},
    vehicles::{Vehicle, VehicleKey},
};

/// Wrapper for bookings in YAML
#[derive(Debug, Deserialize)]
pub struct BookingsFixture {
    /// Booking entries, oldest first
    pub bookings: Vec<BookingFixture>,
}

/// Booking Fixture
///
/// Costs are not stored; each entry is quoted from the referenced vehicle's
/// daily rate when loaded.
#[derive(Debug, Deserialize)]
pub struct BookingFixture {
    /// Vehicle id from the vehicles fixture
    pub vehicle: String,

    /// User id from the users fixture
    pub user: String,

    /// Pickup instant (e.g., "2025-09-05T10:00:00")
    pub pickup: DateTime,

    /// Return instant
    pub dropoff: DateTime,

    /// Lifecycle state
    pub status: BookingStatus,

    /// When the booking was placed
    pub booked_at: DateTime,
}

impl BookingFixture {
    /// Quote the entry against its vehicle and build the confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the quote overflows.
    pub fn into_confirmation(
        self,
        key: VehicleKey,
        vehicle: &Vehicle,
    ) -> Result<BookingConfirmation, FixtureError> {
        let days = rental_days(self.pickup, self.dropoff);
        let cost = CostBreakdown::quote(vehicle.daily_rate, days)?;

        Ok(BookingConfirmation {
            vehicle: key,
            vehicle_name: vehicle.name.clone(),
            vehicle_category: vehicle.category.clone(),
            pickup: self.pickup,
            dropoff: self.dropoff,
            days,
            cost,
            status: self.status,
            booked_at: self.booked_at,
            pickup_location: vehicle.location.clone(),
            dropoff_location: vehicle.location.clone(),
            features: vehicle.features.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::vehicles::{Availability, VehicleClass};

    use super::*;

    #[test]
    fn fixture_is_quoted_from_the_vehicle_rate() -> TestResult {
        let yaml = r"
bookings:
  - vehicle: honda-civic
    user: john
    pickup: 2025-09-05T10:00:00
    dropoff: 2025-09-07T10:00:00
    status: confirmed
    booked_at: 2025-09-01T09:00:00
";

        let fixture: BookingsFixture = serde_norway::from_str(yaml)?;
        let entry = fixture.bookings.into_iter().next().ok_or("empty fixture")?;

        let vehicle = Vehicle {
            name: "Honda Civic".to_string(),
            category: "Compact Car".to_string(),
            class: VehicleClass::Car,
            daily_rate: Money::from_major(45, USD),
            rating: 4.6,
            reviews: 89,
            features: vec![],
            location: "Airport".to_string(),
            availability: Availability::Available,
            description: None,
            specifications: None,
        };

        let confirmation = entry.into_confirmation(VehicleKey::default(), &vehicle)?;

        assert_eq!(confirmation.days, 2);
        assert_eq!(confirmation.cost.total, Money::from_minor(11400, USD));
        assert_eq!(confirmation.status, BookingStatus::Confirmed);
        assert_eq!(confirmation.pickup, date(2025, 9, 5).at(10, 0, 0, 0));

        Ok(())
    }
}
