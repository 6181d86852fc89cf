//! User Fixtures

use jiff::civil::{Date, DateTime};
use serde::Deserialize;

use crate::users::{Role, User, UserStatus};

/// Wrapper for users in YAML
#[derive(Debug, Deserialize)]
pub struct UsersFixture {
    /// User entries, in registration order
    pub users: Vec<UserFixture>,
}

/// User Fixture
#[derive(Debug, Deserialize)]
pub struct UserFixture {
    /// Stable id other fixture files reference
    pub id: String,

    /// Display name
    pub username: String,

    /// Login email
    pub email: String,

    /// Contact phone number
    pub phone: String,

    /// Postal address
    #[serde(default)]
    pub address: String,

    /// Login password
    pub password: String,

    /// Access level
    pub role: Role,

    /// Account standing
    #[serde(default)]
    pub status: UserStatus,

    /// Registration date (e.g., "2024-01-15")
    pub joined: Date,

    /// Most recent login
    #[serde(default)]
    pub last_login: Option<DateTime>,

    /// Lifetime bookings placed
    #[serde(default)]
    pub total_bookings: u32,
}

impl From<UserFixture> for User {
    fn from(fixture: UserFixture) -> Self {
        User {
            username: fixture.username,
            email: fixture.email,
            phone: fixture.phone,
            address: fixture.address,
            password: fixture.password,
            role: fixture.role,
            status: fixture.status,
            joined: fixture.joined,
            last_login: fixture.last_login,
            total_bookings: fixture.total_bookings,
        }
    }
}
