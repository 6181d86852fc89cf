//! Booking store collaborator: the list behind "My Bookings".

use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::booking::{BookingConfirmation, BookingStatus};

new_key_type! {
    /// Booking Key
    pub struct BookingKey;
}

/// Errors related to booking store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The booking key does not exist in the store.
    #[error("booking not found")]
    BookingNotFound,

    /// The booking has already been cancelled.
    #[error("booking is already cancelled")]
    AlreadyCancelled,

    /// Completed bookings cannot be cancelled.
    #[error("completed bookings cannot be cancelled")]
    AlreadyCompleted,
}

/// The booking-store collaborator the wizard hands confirmations to.
///
/// Recording always succeeds; the wizard invokes it exactly once per
/// completed flow.
pub trait BookingStore {
    /// Take ownership of a confirmation and return its key.
    fn record_booking(&mut self, confirmation: BookingConfirmation) -> BookingKey;
}

/// Tab filter over the bookings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every booking.
    #[default]
    All,
    /// Confirmed, pending and in-progress bookings.
    Active,
    /// Finished bookings.
    Completed,
    /// Cancelled bookings.
    Cancelled,
}

impl StatusFilter {
    /// Whether a status belongs to this tab.
    #[must_use]
    pub fn matches(self, status: BookingStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => matches!(
                status,
                BookingStatus::Confirmed | BookingStatus::Pending | BookingStatus::Active
            ),
            StatusFilter::Completed => status == BookingStatus::Completed,
            StatusFilter::Cancelled => status == BookingStatus::Cancelled,
        }
    }
}

/// In-memory booking store.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    bookings: SlotMap<BookingKey, BookingConfirmation>,
    order: Vec<BookingKey>,
}

impl InMemoryBookingStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        InMemoryBookingStore::default()
    }

    /// Look up a booking.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BookingNotFound`] if the key is stale.
    pub fn get(&self, key: BookingKey) -> Result<&BookingConfirmation, StoreError> {
        self.bookings.get(key).ok_or(StoreError::BookingNotFound)
    }

    /// Iterate over bookings, newest first.
    pub fn iter(&self) -> impl Iterator<Item = (BookingKey, &BookingConfirmation)> {
        self.order
            .iter()
            .rev()
            .filter_map(|key| self.bookings.get(*key).map(|booking| (*key, booking)))
    }

    /// Bookings belonging to a tab, newest first.
    #[must_use]
    pub fn filtered(&self, filter: StatusFilter) -> Vec<(BookingKey, &BookingConfirmation)> {
        self.iter()
            .filter(|(_, booking)| filter.matches(booking.status))
            .collect()
    }

    /// Number of bookings recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// Whether no bookings have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Cancel a booking.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the key is stale, the booking is already
    /// cancelled, or the booking is completed.
    pub fn cancel(&mut self, key: BookingKey) -> Result<(), StoreError> {
        let booking = self
            .bookings
            .get_mut(key)
            .ok_or(StoreError::BookingNotFound)?;

        match booking.status {
            BookingStatus::Cancelled => Err(StoreError::AlreadyCancelled),
            BookingStatus::Completed => Err(StoreError::AlreadyCompleted),
            BookingStatus::Confirmed | BookingStatus::Pending | BookingStatus::Active => {
                booking.status = BookingStatus::Cancelled;
                Ok(())
            }
        }
    }
}

impl BookingStore for InMemoryBookingStore {
    fn record_booking(&mut self, confirmation: BookingConfirmation) -> BookingKey {
        let key = self.bookings.insert(confirmation);
        self.order.push(key);

        key
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        pricing::{CostBreakdown, QuoteError},
        vehicles::VehicleKey,
    };

    use super::*;

    fn confirmation(name: &str, status: BookingStatus) -> Result<BookingConfirmation, QuoteError> {
        let cost = CostBreakdown::quote(Money::from_major(45, USD), 2)?;

        Ok(BookingConfirmation {
            vehicle: VehicleKey::default(),
            vehicle_name: name.to_string(),
            vehicle_category: "Compact Car".to_string(),
            pickup: date(2025, 9, 5).at(10, 0, 0, 0),
            dropoff: date(2025, 9, 7).at(10, 0, 0, 0),
            days: cost.days,
            cost,
            status,
            booked_at: date(2025, 9, 1).at(9, 0, 0, 0),
            pickup_location: "Airport".to_string(),
            dropoff_location: "Airport".to_string(),
            features: vec![],
        })
    }

    #[test]
    fn record_then_get_round_trips() -> TestResult {
        let mut store = InMemoryBookingStore::new();

        let key = store.record_booking(confirmation("Honda Civic", BookingStatus::Confirmed)?);

        assert_eq!(store.get(key)?.vehicle_name, "Honda Civic");
        assert_eq!(store.len(), 1);

        Ok(())
    }

    #[test]
    fn iter_is_newest_first() -> TestResult {
        let mut store = InMemoryBookingStore::new();
        store.record_booking(confirmation("First", BookingStatus::Confirmed)?);
        store.record_booking(confirmation("Second", BookingStatus::Confirmed)?);

        let names: Vec<&str> = store
            .iter()
            .map(|(_, booking)| booking.vehicle_name.as_str())
            .collect();

        assert_eq!(names, ["Second", "First"]);

        Ok(())
    }

    #[test]
    fn active_tab_covers_confirmed_pending_and_active() -> TestResult {
        let mut store = InMemoryBookingStore::new();
        store.record_booking(confirmation("A", BookingStatus::Confirmed)?);
        store.record_booking(confirmation("B", BookingStatus::Pending)?);
        store.record_booking(confirmation("C", BookingStatus::Active)?);
        store.record_booking(confirmation("D", BookingStatus::Completed)?);
        store.record_booking(confirmation("E", BookingStatus::Cancelled)?);

        assert_eq!(store.filtered(StatusFilter::Active).len(), 3);
        assert_eq!(store.filtered(StatusFilter::Completed).len(), 1);
        assert_eq!(store.filtered(StatusFilter::Cancelled).len(), 1);
        assert_eq!(store.filtered(StatusFilter::All).len(), 5);

        Ok(())
    }

    #[test]
    fn cancel_flips_status_once() -> TestResult {
        let mut store = InMemoryBookingStore::new();
        let key = store.record_booking(confirmation("A", BookingStatus::Confirmed)?);

        store.cancel(key)?;

        assert_eq!(store.get(key)?.status, BookingStatus::Cancelled);
        assert!(matches!(store.cancel(key), Err(StoreError::AlreadyCancelled)));

        Ok(())
    }

    #[test]
    fn completed_bookings_cannot_be_cancelled() -> TestResult {
        let mut store = InMemoryBookingStore::new();
        let key = store.record_booking(confirmation("A", BookingStatus::Completed)?);

        assert!(matches!(store.cancel(key), Err(StoreError::AlreadyCompleted)));

        Ok(())
    }
}
