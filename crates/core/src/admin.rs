//! Admin dashboard statistics.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    booking::{
        BookingStatus,
        store::{BookingKey, InMemoryBookingStore},
    },
    catalog::Catalog,
    users::{Directory, UserKey},
    vehicles::VehicleKey,
};

/// Errors related to building dashboard statistics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminError {
    /// Summing booking totals overflowed.
    #[error("revenue total overflowed")]
    RevenueOverflow,
}

/// A vehicle ranked by how often it has been booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularVehicle {
    /// The ranked vehicle.
    pub vehicle: VehicleKey,

    /// Bookings referencing it.
    pub bookings: usize,
}

/// The figures on the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    /// Registered accounts.
    pub total_users: usize,

    /// Vehicles in the catalog.
    pub total_vehicles: usize,

    /// Bookings ever recorded.
    pub total_bookings: usize,

    /// Confirmed, pending and in-progress bookings.
    pub active_bookings: usize,

    /// Bookings awaiting confirmation.
    pub pending_bookings: usize,

    /// Sum of every non-cancelled booking total.
    pub total_revenue: Money<'static, Currency>,

    /// Up to three most-booked vehicles, most popular first.
    pub popular_vehicles: Vec<PopularVehicle>,

    /// Up to five most recent registrations, newest first.
    pub recent_users: Vec<UserKey>,

    /// Up to five most recent bookings, newest first.
    pub recent_bookings: Vec<BookingKey>,
}

impl AdminStats {
    /// Take a snapshot of the dashboard figures.
    ///
    /// Cancelled bookings count towards the booking total but not towards
    /// revenue.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::RevenueOverflow`] if the revenue sum overflows.
    pub fn collect(
        directory: &Directory,
        catalog: &Catalog,
        store: &InMemoryBookingStore,
        currency: &'static Currency,
    ) -> Result<Self, AdminError> {
        let mut active_bookings = 0;
        let mut pending_bookings = 0;
        let mut revenue = Decimal::ZERO;
        let mut counts: FxHashMap<VehicleKey, usize> = FxHashMap::default();

        for (_, booking) in store.iter() {
            match booking.status {
                BookingStatus::Confirmed | BookingStatus::Active => active_bookings += 1,
                BookingStatus::Pending => {
                    active_bookings += 1;
                    pending_bookings += 1;
                }
                BookingStatus::Completed | BookingStatus::Cancelled => {}
            }

            if booking.status != BookingStatus::Cancelled {
                revenue = revenue
                    .checked_add(*booking.cost.total.amount())
                    .ok_or(AdminError::RevenueOverflow)?;
            }

            *counts.entry(booking.vehicle).or_default() += 1;
        }

        let mut ranked: Vec<PopularVehicle> = counts
            .into_iter()
            .map(|(vehicle, bookings)| PopularVehicle { vehicle, bookings })
            .collect();
        ranked.sort_by(|a, b| b.bookings.cmp(&a.bookings));
        ranked.truncate(3);

        let mut recent_users: Vec<UserKey> = directory.iter().map(|(key, _)| key).collect();
        recent_users.reverse();
        recent_users.truncate(5);

        let recent_bookings: Vec<BookingKey> =
            store.iter().take(5).map(|(key, _)| key).collect();

        Ok(AdminStats {
            total_users: directory.len(),
            total_vehicles: catalog.len(),
            total_bookings: store.len(),
            active_bookings,
            pending_bookings,
            total_revenue: Money::from_decimal(revenue, currency),
            popular_vehicles: ranked,
            recent_users,
            recent_bookings,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        booking::{BookingConfirmation, store::BookingStore},
        pricing::CostBreakdown,
        vehicles::{Availability, Vehicle, VehicleClass},
    };

    use super::*;

    fn vehicle(name: &str, rate: i64) -> Vehicle {
        Vehicle {
            name: name.to_string(),
            category: "Test".to_string(),
            class: VehicleClass::Car,
            daily_rate: Money::from_major(rate, USD),
            rating: 4.5,
            reviews: 10,
            features: vec![],
            location: "Downtown".to_string(),
            availability: Availability::Available,
            description: None,
            specifications: None,
        }
    }

    fn booking(
        vehicle: VehicleKey,
        rate: i64,
        days: i64,
        status: BookingStatus,
    ) -> Result<BookingConfirmation, crate::pricing::QuoteError> {
        let cost = CostBreakdown::quote(Money::from_major(rate, USD), days)?;

        Ok(BookingConfirmation {
            vehicle,
            vehicle_name: "Test".to_string(),
            vehicle_category: "Test".to_string(),
            pickup: date(2025, 9, 5).at(10, 0, 0, 0),
            dropoff: date(2025, 9, 7).at(10, 0, 0, 0),
            days: cost.days,
            cost,
            status,
            booked_at: date(2025, 9, 1).at(9, 0, 0, 0),
            pickup_location: "Downtown".to_string(),
            dropoff_location: "Downtown".to_string(),
            features: vec![],
        })
    }

    #[test]
    fn collect_counts_and_sums() -> TestResult {
        let mut catalog = Catalog::new();
        let bmw = catalog.insert(vehicle("BMW 3 Series", 89))?;
        let civic = catalog.insert(vehicle("Honda Civic", 45))?;

        let mut store = InMemoryBookingStore::new();
        // $45 x 2 days -> $114.00, $89 x 1 day -> $112.90
        store.record_booking(booking(civic, 45, 2, BookingStatus::Confirmed)?);
        store.record_booking(booking(civic, 45, 2, BookingStatus::Completed)?);
        store.record_booking(booking(bmw, 89, 1, BookingStatus::Pending)?);
        store.record_booking(booking(bmw, 89, 1, BookingStatus::Cancelled)?);

        let directory = Directory::new();

        let stats = AdminStats::collect(&directory, &catalog, &store, USD)?;

        assert_eq!(stats.total_vehicles, 2);
        assert_eq!(stats.total_bookings, 4);
        assert_eq!(stats.active_bookings, 2);
        assert_eq!(stats.pending_bookings, 1);
        assert_eq!(stats.total_revenue, Money::from_minor(34090, USD));

        Ok(())
    }

    #[test]
    fn popular_vehicles_are_ranked_by_booking_count() -> TestResult {
        let mut catalog = Catalog::new();
        let bmw = catalog.insert(vehicle("BMW 3 Series", 89))?;
        let civic = catalog.insert(vehicle("Honda Civic", 45))?;

        let mut store = InMemoryBookingStore::new();
        store.record_booking(booking(civic, 45, 2, BookingStatus::Confirmed)?);
        store.record_booking(booking(civic, 45, 1, BookingStatus::Completed)?);
        store.record_booking(booking(bmw, 89, 1, BookingStatus::Confirmed)?);

        let stats = AdminStats::collect(&Directory::new(), &catalog, &store, USD)?;

        assert_eq!(
            stats.popular_vehicles.first(),
            Some(&PopularVehicle {
                vehicle: civic,
                bookings: 2
            })
        );
        assert_eq!(stats.popular_vehicles.len(), 2);

        Ok(())
    }

    #[test]
    fn empty_system_has_zero_revenue() -> TestResult {
        let stats = AdminStats::collect(
            &Directory::new(),
            &Catalog::new(),
            &InMemoryBookingStore::new(),
            USD,
        )?;

        assert_eq!(stats.total_revenue, Money::from_major(0, USD));
        assert!(stats.popular_vehicles.is_empty());

        Ok(())
    }
}
