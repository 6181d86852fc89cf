//! Login, password changes and profile edits.

use jiff::civil::DateTime;
use thiserror::Error;

use crate::users::{Directory, DirectoryError, Role, User, UserKey, UserStatus};

/// Errors related to signing in.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Email or password was left blank.
    #[error("please fill in all fields")]
    MissingFields,

    /// The email address is not plausibly shaped.
    #[error("please enter a valid email address")]
    InvalidEmail,

    /// No account matches the email/password pair.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The account is suspended.
    #[error("this account is suspended")]
    Suspended,
}

/// An authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// The signed-in account.
    pub user: UserKey,

    /// Access level at sign-in.
    pub role: Role,
}

/// Sign in with an email/password pair.
///
/// Field checks run before the credential lookup, in form order. A
/// successful login stamps the account's last-login time.
///
/// # Errors
///
/// Returns an [`AuthError`] if a field is blank, the email is malformed,
/// no account matches, or the account is suspended.
pub fn login(
    directory: &mut Directory,
    email: &str,
    password: &str,
    now: DateTime,
) -> Result<Session, AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }

    if !is_valid_email(email) {
        return Err(AuthError::InvalidEmail);
    }

    let (key, user) = directory
        .find_by_email(email)
        .filter(|(_, user)| user.password == password)
        .ok_or(AuthError::InvalidCredentials)?;

    if user.status == UserStatus::Suspended {
        return Err(AuthError::Suspended);
    }

    let role = user.role;

    // Stale keys cannot surface here; the key came from the lookup above.
    directory
        .record_login(key, now)
        .map_err(|_err| AuthError::InvalidCredentials)?;

    Ok(Session { user: key, role })
}

/// Errors related to changing a password.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    /// The current password field was left blank.
    #[error("please enter your current password")]
    MissingCurrent,

    /// The new password is shorter than six characters.
    #[error("new password must be at least 6 characters")]
    TooShort,

    /// The confirmation does not match the new password.
    #[error("new passwords do not match")]
    ConfirmationMismatch,

    /// The new password is the same as the current one.
    #[error("new password must be different from the current password")]
    Unchanged,

    /// The current password does not match the stored one.
    #[error("current password is incorrect")]
    WrongCurrent,

    /// The directory rejected the update.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// The three fields of the change-password form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    /// The password currently on the account.
    pub current: String,

    /// The replacement password.
    pub new: String,

    /// The replacement, typed again.
    pub confirm: String,
}

/// Apply a password change to an account.
///
/// Checks run in the form's order: current present, new long enough,
/// confirmation matching, new differing, then the stored comparison.
///
/// # Errors
///
/// Returns a [`PasswordError`] naming the first failed check.
pub fn change_password(
    directory: &mut Directory,
    key: UserKey,
    change: &PasswordChange,
) -> Result<(), PasswordError> {
    if change.current.is_empty() {
        return Err(PasswordError::MissingCurrent);
    }

    if change.new.chars().count() < 6 {
        return Err(PasswordError::TooShort);
    }

    if change.new != change.confirm {
        return Err(PasswordError::ConfirmationMismatch);
    }

    if change.new == change.current {
        return Err(PasswordError::Unchanged);
    }

    if directory.get(key)?.password != change.current {
        return Err(PasswordError::WrongCurrent);
    }

    directory.set_password(key, change.new.clone())?;

    Ok(())
}

/// Errors related to saving profile edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    /// The email address is not plausibly shaped.
    #[error("please enter a valid email address")]
    InvalidEmail,

    /// The phone number contains characters outside the accepted set.
    #[error("please enter a valid phone number")]
    InvalidPhone,

    /// The username is shorter than two characters.
    #[error("username must be at least 2 characters")]
    UsernameTooShort,

    /// The directory rejected the update.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// An editable copy of a user's contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    /// Display name.
    pub username: String,

    /// Login email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Postal address.
    pub address: String,
}

impl ProfileDraft {
    /// Start an edit from the account's current details.
    #[must_use]
    pub fn edit(user: &User) -> Self {
        ProfileDraft {
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
        }
    }

    /// Check the draft's fields without touching the directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] naming the first failed check.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !is_valid_email(&self.email) {
            return Err(ProfileError::InvalidEmail);
        }

        if !is_valid_phone(&self.phone) {
            return Err(ProfileError::InvalidPhone);
        }

        if self.username.trim().chars().count() < 2 {
            return Err(ProfileError::UsernameTooShort);
        }

        Ok(())
    }

    /// Validate and save the draft back to the directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] if a field fails validation or the email
    /// is taken by another account.
    pub fn apply(&self, directory: &mut Directory, key: UserKey) -> Result<(), ProfileError> {
        self.validate()?;

        directory.update_contact(
            key,
            self.username.trim().to_string(),
            self.email.trim().to_string(),
            self.phone.clone(),
            self.address.clone(),
        )?;

        Ok(())
    }
}

/// Plausible email shape: one `@` with a non-empty local part and a domain
/// containing an interior dot.
fn is_valid_email(email: &str) -> bool {
    let email = email.trim();

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty() && !tld.is_empty() && !email.contains(char::is_whitespace)
}

/// Digits plus the usual separators, with at least one digit.
fn is_valid_phone(phone: &str) -> bool {
    let accepted = |c: char| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')');

    phone.chars().any(|c| c.is_ascii_digit()) && phone.chars().all(accepted)
}
