//! User data model.
//!
//! A user is an integer identifier assigned by the store plus a unique name
//! and a unique email address. The newtypes here enforce the column limits of
//! the `users` table so invalid input is rejected before it reaches storage.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Maximum number of characters in a user name.
pub const NAME_MAX: usize = 80;
/// Maximum number of characters in an email address.
pub const EMAIL_MAX: usize = 120;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Identifier was zero or negative.
    #[error("user id must be a positive integer")]
    InvalidId,
    /// Name was empty once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Name exceeded [`NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Email was empty once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email exceeded [`EMAIL_MAX`] characters.
    #[error("email must be at most {max} characters")]
    EmailTooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// Validate and wrap a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::UserId;
    ///
    /// assert_eq!(UserId::new(7).expect("positive id").get(), 7);
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i32 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validate trimmed text against emptiness and a character budget.
fn bounded_text(
    raw: String,
    max: usize,
    empty: UserValidationError,
    too_long: UserValidationError,
) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

/// Unique user name, trimmed, at most [`NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        bounded_text(
            name.into(),
            NAME_MAX,
            UserValidationError::EmptyName,
            UserValidationError::NameTooLong { max: NAME_MAX },
        )
        .map(Self)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique email address, trimmed, at most [`EMAIL_MAX`] characters.
///
/// Only presence and length are checked; the address format is the client's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        bounded_text(
            email.into(),
            EMAIL_MAX,
            UserValidationError::EmptyEmail,
            UserValidationError::EmailTooLong { max: EMAIL_MAX },
        )
        .map(Self)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated field values for creating or overwriting a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: UserName,
    email: EmailAddress,
}

impl UserDraft {
    /// Build a draft from validated components.
    #[must_use]
    pub fn new(name: UserName, email: EmailAddress) -> Self {
        Self { name, email }
    }

    /// Fallible constructor validating both fields.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::{UserDraft, UserValidationError};
    ///
    /// let draft = UserDraft::try_from_strings("ada", "ada@example.com").expect("valid");
    /// assert_eq!(draft.name().as_ref(), "ada");
    /// assert_eq!(
    ///     UserDraft::try_from_strings("", "ada@example.com"),
    ///     Err(UserValidationError::EmptyName)
    /// );
    /// ```
    pub fn try_from_strings(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserName::new(name)?, EmailAddress::new(email)?))
    }

    /// Requested user name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Attach a store-assigned identifier.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.name, self.email)
    }
}

/// Persisted user.
///
/// ## Invariants
/// - `id` is positive and never changes after creation.
/// - `name` and `email` are non-blank and within their column limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = i32, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "Ada Lovelace")]
    name: UserName,
    #[schema(value_type = String, example = "ada@example.com")]
    email: EmailAddress,
}

impl User {
    /// Build a [`User`] from validated components.
    #[must_use]
    pub fn new(id: UserId, name: UserName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }

    /// Fallible constructor from raw values, used when reading storage rows.
    pub fn try_from_parts(
        id: i32,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            UserName::new(name)?,
            EmailAddress::new(email)?,
        ))
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique user name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Unique email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Replace the mutable fields with those of `draft`, keeping the id.
    #[must_use]
    pub fn with_draft(self, draft: UserDraft) -> Self {
        draft.into_user(self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDto {
    id: i32,
    name: String,
    email: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, name, email } = value;
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_parts(value.id, value.name, value.email)
    }
}
