//! Top-level navigation: which screen is showing and who may see it.

use thiserror::Error;

use crate::{
    auth::Session,
    users::Role,
    vehicles::VehicleKey,
};

/// Errors related to navigation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    /// The destination requires a signed-in user.
    #[error("please log in to continue")]
    LoginRequired,

    /// The destination requires an administrator.
    #[error("administrator access required")]
    AdminRequired,
}

/// Screens inside the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminView {
    /// Statistics overview.
    #[default]
    Dashboard,
    /// Vehicle management.
    Vehicles,
    /// User management.
    Users,
    /// All bookings.
    Bookings,
}

/// Every screen the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    /// Vehicle browsing.
    #[default]
    Home,
    /// Sign-in form.
    Login,
    /// The signed-in user's bookings.
    MyBookings,
    /// Profile and password settings.
    Settings,
    /// Help and FAQ.
    HelpCenter,
    /// The booking wizard for a vehicle.
    Booking(VehicleKey),
    /// The admin area.
    Admin(AdminView),
}

impl AppView {
    /// The least privilege needed to see this screen.
    #[must_use]
    pub fn required_role(self) -> Option<Role> {
        match self {
            AppView::Home | AppView::Login | AppView::HelpCenter => None,
            AppView::MyBookings | AppView::Settings | AppView::Booking(_) => Some(Role::User),
            AppView::Admin(_) => Some(Role::Admin),
        }
    }
}

/// The navigation shell: current screen plus the session, if any.
#[derive(Debug, Default)]
pub struct AppShell {
    view: AppView,
    session: Option<Session>,
}

impl AppShell {
    /// Start at the home screen, signed out.
    #[must_use]
    pub fn new() -> Self {
        AppShell::default()
    }

    /// The screen currently showing.
    #[must_use]
    pub fn view(&self) -> AppView {
        self.view
    }

    /// The signed-in session, if any.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.session
    }

    /// Navigate to a screen, enforcing its access requirement.
    ///
    /// # Errors
    ///
    /// Returns a [`NavError`] if the destination needs a login or admin
    /// access the current session lacks.
    pub fn go(&mut self, view: AppView) -> Result<(), NavError> {
        match view.required_role() {
            None => {}
            Some(Role::User) => {
                if self.session.is_none() {
                    return Err(NavError::LoginRequired);
                }
            }
            Some(Role::Admin) => match self.session {
                None => return Err(NavError::LoginRequired),
                Some(session) if session.role != Role::Admin => {
                    return Err(NavError::AdminRequired);
                }
                Some(_) => {}
            },
        }

        self.view = view;

        Ok(())
    }

    /// Install a session and land on the home screen.
    pub fn login(&mut self, session: Session) {
        self.session = Some(session);
        self.view = AppView::Home;
    }

    /// Drop the session and return to the home screen.
    pub fn logout(&mut self) {
        self.session = None;
        self.view = AppView::Home;
    }
}
