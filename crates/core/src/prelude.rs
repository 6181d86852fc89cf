//! Kerbside prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    admin::{AdminError, AdminStats, PopularVehicle},
    auth::{
        AuthError, PasswordChange, PasswordError, ProfileDraft, ProfileError, Session,
        change_password, login,
    },
    booking::{
        BookingConfirmation, BookingDraft, BookingStatus, DraftError,
        picker::{DateTimePicker, ScriptedPicker},
        store::{BookingKey, BookingStore, InMemoryBookingStore, StatusFilter, StoreError},
        wizard::{
            AcceptAll, BookingWizard, ConfirmPrompt, ConfirmSummary, WizardError, WizardStep,
        },
    },
    catalog::{Catalog, CatalogError, CatalogFilter},
    fixtures::{Fixture, FixtureError},
    pricing::{CostBreakdown, QuoteError, rental_days, service_fee, tax_rate},
    receipt::{BookingReceipt, ReceiptError},
    users::{Directory, DirectoryError, Role, User, UserFilter, UserKey, UserStatus},
    vehicles::{Availability, Specifications, Vehicle, VehicleClass, VehicleKey},
    views::{AdminView, AppShell, AppView, NavError},
};
