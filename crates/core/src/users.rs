//! User directory: the accounts behind login and the admin user table.

use std::fmt;

use jiff::civil::{Date, DateTime};
use serde::Deserialize;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// User Key
    pub struct UserKey;
}

/// Errors related to directory operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// The user key does not exist in the directory.
    #[error("user not found")]
    UserNotFound,

    /// Another account already uses this email address.
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),

    /// A required field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Administrator accounts cannot be deleted.
    #[error("administrator accounts cannot be deleted")]
    CannotDeleteAdmin,

    /// Administrator accounts cannot be suspended or deactivated.
    #[error("administrator status cannot be changed")]
    CannotChangeAdminStatus,
}

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular renter.
    User,
    /// An administrator with access to the management screens.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "User",
            Role::Admin => "Admin",
        })
    }
}

/// Standing of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// In good standing.
    #[default]
    Active,
    /// Temporarily barred from logging in.
    Suspended,
    /// Dormant account.
    Inactive,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserStatus::Active => "Active",
            UserStatus::Suspended => "Suspended",
            UserStatus::Inactive => "Inactive",
        })
    }
}

/// A registered account.
///
/// Passwords are stored in the clear; this models the original system's
/// simulated credential check and is not a real credential store.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Display name.
    pub username: String,

    /// Login email, unique across the directory.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Postal address.
    pub address: String,

    /// Login password.
    pub password: String,

    /// Access level.
    pub role: Role,

    /// Account standing.
    pub status: UserStatus,

    /// Registration date.
    pub joined: Date,

    /// Most recent successful login, if any.
    pub last_login: Option<DateTime>,

    /// Lifetime bookings placed.
    pub total_bookings: u32,
}

/// Search and filter criteria for the admin user table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive match against username and email.
    pub query: Option<String>,

    /// Restrict to a role.
    pub role: Option<Role>,

    /// Restrict to a standing.
    pub status: Option<UserStatus>,
}

impl UserFilter {
    /// Whether a user passes every criterion of this filter.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        if let Some(role) = self.role {
            if user.role != role {
                return false;
            }
        }

        if let Some(status) = self.status {
            if user.status != status {
                return false;
            }
        }

        if let Some(query) = self.query.as_deref() {
            let query = query.to_lowercase();

            if !user.username.to_lowercase().contains(&query)
                && !user.email.to_lowercase().contains(&query)
            {
                return false;
            }
        }

        true
    }
}

/// The account directory: login lookups plus the admin CRUD surface.
#[derive(Debug, Default)]
pub struct Directory {
    users: SlotMap<UserKey, User>,
    order: Vec<UserKey>,
}

impl Directory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Directory::default()
    }

    /// Register an account.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] if a required field is blank or the email
    /// is already taken.
    pub fn add(&mut self, user: User) -> Result<UserKey, DirectoryError> {
        validate_required(&user)?;

        if self.find_by_email(&user.email).is_some() {
            return Err(DirectoryError::DuplicateEmail(user.email));
        }

        let key = self.users.insert(user);
        self.order.push(key);

        Ok(key)
    }

    /// Look up an account.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UserNotFound`] if the key is stale.
    pub fn get(&self, key: UserKey) -> Result<&User, DirectoryError> {
        self.users.get(key).ok_or(DirectoryError::UserNotFound)
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] if the key is stale or the account is an
    /// administrator.
    pub fn remove(&mut self, key: UserKey) -> Result<User, DirectoryError> {
        let user = self.users.get(key).ok_or(DirectoryError::UserNotFound)?;

        if user.role == Role::Admin {
            return Err(DirectoryError::CannotDeleteAdmin);
        }

        let user = self.users.remove(key).ok_or(DirectoryError::UserNotFound)?;
        self.order.retain(|candidate| *candidate != key);

        Ok(user)
    }

    /// Change an account's standing.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] if the key is stale or the account is an
    /// administrator.
    pub fn set_status(&mut self, key: UserKey, status: UserStatus) -> Result<(), DirectoryError> {
        let user = self
            .users
            .get_mut(key)
            .ok_or(DirectoryError::UserNotFound)?;

        if user.role == Role::Admin {
            return Err(DirectoryError::CannotChangeAdminStatus);
        }

        user.status = status;

        Ok(())
    }

    /// Find an account by email, case-insensitively.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<(UserKey, &User)> {
        self.iter()
            .find(|(_, user)| user.email.eq_ignore_ascii_case(email))
    }

    /// Replace an account's contact details.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] if the key is stale or the new email is
    /// taken by another account.
    pub fn update_contact(
        &mut self,
        key: UserKey,
        username: String,
        email: String,
        phone: String,
        address: String,
    ) -> Result<(), DirectoryError> {
        if let Some((other, _)) = self.find_by_email(&email) {
            if other != key {
                return Err(DirectoryError::DuplicateEmail(email));
            }
        }

        let user = self
            .users
            .get_mut(key)
            .ok_or(DirectoryError::UserNotFound)?;

        user.username = username;
        user.email = email;
        user.phone = phone;
        user.address = address;

        Ok(())
    }

    /// Replace an account's password.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UserNotFound`] if the key is stale.
    pub fn set_password(&mut self, key: UserKey, password: String) -> Result<(), DirectoryError> {
        let user = self
            .users
            .get_mut(key)
            .ok_or(DirectoryError::UserNotFound)?;
        user.password = password;

        Ok(())
    }

    /// Record a successful login.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UserNotFound`] if the key is stale.
    pub fn record_login(&mut self, key: UserKey, at: DateTime) -> Result<(), DirectoryError> {
        let user = self
            .users
            .get_mut(key)
            .ok_or(DirectoryError::UserNotFound)?;
        user.last_login = Some(at);

        Ok(())
    }

    /// Iterate over accounts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (UserKey, &User)> {
        self.order
            .iter()
            .filter_map(|key| self.users.get(*key).map(|user| (*key, user)))
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Accounts passing the filter, in registration order.
    #[must_use]
    pub fn search(&self, filter: &UserFilter) -> Vec<(UserKey, &User)> {
        self.iter().filter(|(_, user)| filter.matches(user)).collect()
    }
}

fn validate_required(user: &User) -> Result<(), DirectoryError> {
    if user.username.trim().is_empty() {
        return Err(DirectoryError::MissingField("username"));
    }

    if user.email.trim().is_empty() {
        return Err(DirectoryError::MissingField("email"));
    }

    if user.phone.trim().is_empty() {
        return Err(DirectoryError::MissingField("phone"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    fn user(username: &str, email: &str, role: Role) -> User {
        User {
            username: username.to_string(),
            email: email.to_string(),
            phone: "+1 555-0100".to_string(),
            address: "123 Main St".to_string(),
            password: "password123".to_string(),
            role,
            status: UserStatus::Active,
            joined: date(2024, 1, 15),
            last_login: None,
            total_bookings: 0,
        }
    }

    fn seeded_directory() -> Result<Directory, DirectoryError> {
        let mut directory = Directory::new();

        directory.add(user("John Doe", "john@example.com", Role::User))?;
        directory.add(user("Jane Smith", "jane@example.com", Role::User))?;
        directory.add(user("Admin", "admin@rentals.com", Role::Admin))?;

        Ok(directory)
    }

    #[test]
    fn add_rejects_duplicate_email() -> TestResult {
        let mut directory = seeded_directory()?;

        let result = directory.add(user("Imposter", "JOHN@example.com", Role::User));

        assert!(matches!(result, Err(DirectoryError::DuplicateEmail(_))));

        Ok(())
    }

    #[test]
    fn add_rejects_blank_required_fields() {
        let mut directory = Directory::new();

        let mut blank = user("John Doe", "john@example.com", Role::User);
        blank.phone = "  ".to_string();

        assert!(matches!(
            directory.add(blank),
            Err(DirectoryError::MissingField("phone"))
        ));
    }

    #[test]
    fn admins_cannot_be_deleted_or_suspended() -> TestResult {
        let mut directory = seeded_directory()?;
        let (admin, _) = directory
            .find_by_email("admin@rentals.com")
            .ok_or("admin should exist")?;

        assert!(matches!(
            directory.remove(admin),
            Err(DirectoryError::CannotDeleteAdmin)
        ));
        assert!(matches!(
            directory.set_status(admin, UserStatus::Suspended),
            Err(DirectoryError::CannotChangeAdminStatus)
        ));

        Ok(())
    }

    #[test]
    fn regular_users_can_be_suspended() -> TestResult {
        let mut directory = seeded_directory()?;
        let (john, _) = directory
            .find_by_email("john@example.com")
            .ok_or("john should exist")?;

        directory.set_status(john, UserStatus::Suspended)?;

        assert_eq!(directory.get(john)?.status, UserStatus::Suspended);

        Ok(())
    }

    #[test]
    fn update_contact_rejects_another_accounts_email() -> TestResult {
        let mut directory = seeded_directory()?;
        let (john, _) = directory
            .find_by_email("john@example.com")
            .ok_or("john should exist")?;

        let result = directory.update_contact(
            john,
            "John Doe".to_string(),
            "jane@example.com".to_string(),
            "+1 555-0100".to_string(),
            "123 Main St".to_string(),
        );

        assert!(matches!(result, Err(DirectoryError::DuplicateEmail(_))));

        Ok(())
    }

    #[test]
    fn update_contact_accepts_own_email() -> TestResult {
        let mut directory = seeded_directory()?;
        let (john, _) = directory
            .find_by_email("john@example.com")
            .ok_or("john should exist")?;

        directory.update_contact(
            john,
            "Johnny Doe".to_string(),
            "john@example.com".to_string(),
            "+1 555-0199".to_string(),
            "456 Oak Ave".to_string(),
        )?;

        assert_eq!(directory.get(john)?.username, "Johnny Doe");

        Ok(())
    }

    #[test]
    fn search_filters_by_query_and_role() -> TestResult {
        let directory = seeded_directory()?;

        let filter = UserFilter {
            query: Some("jane".to_string()),
            ..UserFilter::default()
        };
        assert_eq!(directory.search(&filter).len(), 1);

        let filter = UserFilter {
            role: Some(Role::Admin),
            ..UserFilter::default()
        };
        assert_eq!(directory.search(&filter).len(), 1);

        Ok(())
    }
}
