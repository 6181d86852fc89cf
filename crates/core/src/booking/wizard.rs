//! The three-step booking wizard: Details → Dates → Summary.

use jiff::civil::{Date, DateTime};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    booking::{
        BookingConfirmation, BookingDraft, DraftError,
        picker::DateTimePicker,
        store::{BookingKey, BookingStore},
    },
    catalog::{Catalog, CatalogError},
    pricing::{CostBreakdown, QuoteError, rental_days},
    vehicles::VehicleKey,
};

/// Errors that can occur while driving the wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Confirm is only available on the summary step.
    #[error("confirmation is only available on the summary step")]
    NotAtSummary,

    /// The wizard's vehicle disappeared from the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The draft's date range is invalid.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// Quoting the rental failed.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

/// Wizard position, 1-indexed for the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    /// Vehicle description, features and specifications.
    #[default]
    Details,
    /// Pickup and return date/time selection.
    Dates,
    /// Booking summary and cost breakdown.
    Summary,
}

impl WizardStep {
    /// Advance one step, capped at the summary.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            WizardStep::Details => WizardStep::Dates,
            WizardStep::Dates | WizardStep::Summary => WizardStep::Summary,
        }
    }

    /// Go back one step, floored at the details.
    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            WizardStep::Summary => WizardStep::Dates,
            WizardStep::Dates | WizardStep::Details => WizardStep::Details,
        }
    }

    /// 1-indexed position for the step indicator.
    #[must_use]
    pub fn position(self) -> u8 {
        match self {
            WizardStep::Details => 1,
            WizardStep::Dates => 2,
            WizardStep::Summary => 3,
        }
    }

    /// Step indicator label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Details => "Details",
            WizardStep::Dates => "Dates",
            WizardStep::Summary => "Summary",
        }
    }
}

/// What the confirmation prompt shows before the booking is finalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfirmSummary<'a> {
    /// Name of the vehicle being booked.
    pub vehicle_name: &'a str,

    /// Billable days.
    pub days: i64,

    /// Total amount due.
    pub total: Money<'static, Currency>,
}

/// The commit gate shown before a booking is finalized.
///
/// Declining aborts the confirmation with no state change.
pub trait ConfirmPrompt {
    /// Present the summary and return whether the user accepted.
    fn confirm(&mut self, summary: &ConfirmSummary<'_>) -> bool;
}

/// A prompt that accepts every confirmation.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl ConfirmPrompt for AcceptAll {
    fn confirm(&mut self, _summary: &ConfirmSummary<'_>) -> bool {
        true
    }
}

/// The booking wizard: step position plus the draft it is editing.
///
/// The wizard owns its draft exclusively; cancelling the flow is simply
/// dropping the wizard. Confirmation hands a [`BookingConfirmation`] to the
/// booking store and control returns to the caller.
#[derive(Debug)]
pub struct BookingWizard {
    vehicle: VehicleKey,
    step: WizardStep,
    draft: BookingDraft,
}

impl BookingWizard {
    /// Open the wizard on a vehicle at the details step.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] if the default draft cannot be created.
    pub fn open(vehicle: VehicleKey, opened_at: DateTime) -> Result<Self, DraftError> {
        Ok(BookingWizard {
            vehicle,
            step: WizardStep::Details,
            draft: BookingDraft::new(opened_at)?,
        })
    }

    /// The vehicle being booked.
    #[must_use]
    pub fn vehicle(&self) -> VehicleKey {
        self.vehicle
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// The in-progress draft.
    #[must_use]
    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Advance to the next step. No gating: a user may reach the summary
    /// without touching the default dates.
    pub fn next(&mut self) {
        self.step = self.step.next();
    }

    /// Go back to the previous step.
    pub fn previous(&mut self) {
        self.step = self.step.previous();
    }

    /// Let the picker select a pickup date, bounded below by today.
    pub fn pick_pickup_date(&mut self, picker: &mut dyn DateTimePicker, today: Date) {
        if let Some(date) = picker.pick_date(self.draft.pickup_date(), today) {
            self.draft.set_pickup_date(date);
        }
    }

    /// Let the picker select a return date, bounded below by the pickup date.
    pub fn pick_return_date(&mut self, picker: &mut dyn DateTimePicker) {
        let minimum = self.draft.pickup_date();

        if let Some(date) = picker.pick_date(self.draft.return_date(), minimum) {
            self.draft.set_return_date(date);
        }
    }

    /// Let the picker select a pickup time.
    pub fn pick_pickup_time(&mut self, picker: &mut dyn DateTimePicker) {
        if let Some(time) = picker.pick_time(self.draft.pickup_time()) {
            self.draft.set_pickup_time(time);
        }
    }

    /// Let the picker select a return time.
    pub fn pick_return_time(&mut self, picker: &mut dyn DateTimePicker) {
        if let Some(time) = picker.pick_time(self.draft.return_time()) {
            self.draft.set_return_time(time);
        }
    }

    /// Quote the draft as it stands: billable days and cost breakdown.
    ///
    /// # Errors
    ///
    /// Returns a [`WizardError`] if the vehicle is gone or the quote
    /// overflows.
    pub fn quote(&self, catalog: &Catalog) -> Result<CostBreakdown, WizardError> {
        let vehicle = catalog.get(self.vehicle)?;
        let days = rental_days(self.draft.pickup(), self.draft.dropoff());

        Ok(CostBreakdown::quote(vehicle.daily_rate, days)?)
    }

    /// Finalize the booking through the confirmation prompt.
    ///
    /// Only available on the summary step. Declining the prompt aborts with
    /// no state change and `Ok(None)`. Accepting records exactly one
    /// confirmation with the store and returns its key; the caller is then
    /// expected to navigate away.
    ///
    /// # Errors
    ///
    /// Returns a [`WizardError`] if the wizard is not at the summary, the
    /// draft's range is reversed, the vehicle is gone, or the quote
    /// overflows.
    pub fn confirm(
        &mut self,
        catalog: &Catalog,
        store: &mut dyn BookingStore,
        prompt: &mut dyn ConfirmPrompt,
        confirmed_at: DateTime,
    ) -> Result<Option<BookingKey>, WizardError> {
        if self.step != WizardStep::Summary {
            return Err(WizardError::NotAtSummary);
        }

        self.draft.validate()?;

        let vehicle = catalog.get(self.vehicle)?;
        let cost = self.quote(catalog)?;

        let summary = ConfirmSummary {
            vehicle_name: &vehicle.name,
            days: cost.days,
            total: cost.total,
        };

        if !prompt.confirm(&summary) {
            return Ok(None);
        }

        let confirmation =
            BookingConfirmation::from_draft(self.vehicle, vehicle, &self.draft, cost, confirmed_at);

        Ok(Some(store.record_booking(confirmation)))
    }

    #[cfg(test)]
    fn draft_mut_for_tests(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }
}
