//! Booking drafts, confirmations, and the wizard that produces them.

use std::fmt;

use jiff::civil::{Date, DateTime, Time};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    pricing::CostBreakdown,
    vehicles::{Vehicle, VehicleKey},
};

pub mod picker;
pub mod store;
pub mod wizard;

/// Errors related to a booking draft's date range.
#[derive(Debug, Error)]
pub enum DraftError {
    /// The return instant precedes the pickup instant.
    #[error("return must not precede pickup")]
    ReturnBeforePickup,

    /// Calendar arithmetic failed (dates at the edge of the supported range).
    #[error(transparent)]
    Calendar(#[from] jiff::Error),
}

/// A mutable in-progress booking selection.
///
/// Four independently selected temporal values, combined into two effective
/// instants. Created when the wizard opens, mutated by picker selections,
/// discarded on cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingDraft {
    pickup_date: Date,
    pickup_time: Time,
    return_date: Date,
    return_time: Time,
}

impl BookingDraft {
    /// Create a draft with the default selection: pickup at the opening
    /// instant, return the next day at the same time.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::Calendar`] if the opening date has no successor.
    pub fn new(opened_at: DateTime) -> Result<Self, DraftError> {
        Ok(BookingDraft {
            pickup_date: opened_at.date(),
            pickup_time: opened_at.time(),
            return_date: opened_at.date().tomorrow()?,
            return_time: opened_at.time(),
        })
    }

    /// Selected pickup date.
    #[must_use]
    pub fn pickup_date(&self) -> Date {
        self.pickup_date
    }

    /// Selected pickup time.
    #[must_use]
    pub fn pickup_time(&self) -> Time {
        self.pickup_time
    }

    /// Selected return date.
    #[must_use]
    pub fn return_date(&self) -> Date {
        self.return_date
    }

    /// Selected return time.
    #[must_use]
    pub fn return_time(&self) -> Time {
        self.return_time
    }

    /// Replace the pickup date.
    pub fn set_pickup_date(&mut self, date: Date) {
        self.pickup_date = date;
    }

    /// Replace the pickup time.
    pub fn set_pickup_time(&mut self, time: Time) {
        self.pickup_time = time;
    }

    /// Replace the return date.
    pub fn set_return_date(&mut self, date: Date) {
        self.return_date = date;
    }

    /// Replace the return time.
    pub fn set_return_time(&mut self, time: Time) {
        self.return_time = time;
    }

    /// Effective pickup instant.
    #[must_use]
    pub fn pickup(&self) -> DateTime {
        self.pickup_date.to_datetime(self.pickup_time)
    }

    /// Effective return instant.
    #[must_use]
    pub fn dropoff(&self) -> DateTime {
        self.return_date.to_datetime(self.return_time)
    }

    /// Check the draft's date range before billing.
    ///
    /// The calculator would silently clamp a reversed range to one billable
    /// day; rejecting it here keeps that masking out of confirmed bookings.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::ReturnBeforePickup`] if the range is reversed.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.dropoff() < self.pickup() {
            return Err(DraftError::ReturnBeforePickup);
        }

        Ok(())
    }
}

/// Lifecycle state of a recorded booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Confirmed and upcoming.
    Confirmed,
    /// Awaiting confirmation.
    Pending,
    /// Cancelled by the renter.
    Cancelled,
    /// Finished.
    Completed,
    /// Currently in progress.
    Active,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Pending => "Pending",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
            BookingStatus::Active => "Active",
        };

        f.write_str(label)
    }
}

/// An immutable finalized booking record.
///
/// Created once at confirmation; ownership transfers to the booking store
/// and the record is never mutated afterwards (cancellation flips the status
/// through the store, not through this value).
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    /// The booked vehicle.
    pub vehicle: VehicleKey,

    /// Vehicle name snapshot for display.
    pub vehicle_name: String,

    /// Vehicle category snapshot for display.
    pub vehicle_category: String,

    /// Resolved pickup instant.
    pub pickup: DateTime,

    /// Resolved return instant.
    pub dropoff: DateTime,

    /// Billable days.
    pub days: i64,

    /// Itemised cost.
    pub cost: CostBreakdown,

    /// Lifecycle state.
    pub status: BookingStatus,

    /// When the booking was placed.
    pub booked_at: DateTime,

    /// Where the vehicle is collected.
    pub pickup_location: String,

    /// Where the vehicle is returned.
    pub dropoff_location: String,

    /// Feature badges snapshot.
    pub features: Vec<String>,
}

impl BookingConfirmation {
    /// Build a confirmation from a draft, a vehicle snapshot and a quote.
    #[must_use]
    pub fn from_draft(
        key: VehicleKey,
        vehicle: &Vehicle,
        draft: &BookingDraft,
        cost: CostBreakdown,
        booked_at: DateTime,
    ) -> Self {
        BookingConfirmation {
            vehicle: key,
            vehicle_name: vehicle.name.clone(),
            vehicle_category: vehicle.category.clone(),
            pickup: draft.pickup(),
            dropoff: draft.dropoff(),
            days: cost.days,
            cost,
            status: BookingStatus::Confirmed,
            booked_at,
            pickup_location: vehicle.location.clone(),
            dropoff_location: vehicle.location.clone(),
            features: vehicle.features.clone(),
        }
    }
}
