//! Member registration
//!
//! `SessionService` creates user records. Email addresses are unique across
//! the `users` collection: a second registration with the same address fails
//! and leaves the store untouched. Comparison is exact (case-sensitive, no
//! trimming); callers that want normalized input trim before registering.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::document::collections;
use crate::models::{new_id, Role, User};
use crate::storage::StorageError;
use crate::store::RecordStore;

/// Errors from the registration path
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// A user with this email already exists
    #[error("The email '{email}' is already registered")]
    DuplicateEmail { email: String },

    /// A required field is missing or malformed
    #[error("Invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    /// The record store could not be written
    #[error("Could not save registration: {0}")]
    Storage(#[from] StorageError),
}

impl RegistrationError {
    /// Whether the user can fix the problem by editing the form
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            RegistrationError::DuplicateEmail { .. } | RegistrationError::Invalid { .. }
        )
    }
}

/// Registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub role: Role,
    pub email: String,
    pub password: String,
    pub name: String,
}

impl NewUser {
    /// Payload for a member registration
    pub fn member(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Member,
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }

    /// Check required fields
    ///
    /// Only presence and a minimal email shape are checked.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.name.trim().is_empty() {
            return Err(RegistrationError::Invalid {
                field: "name",
                reason: "must not be empty",
            });
        }
        if self.email.trim().is_empty() {
            return Err(RegistrationError::Invalid {
                field: "email",
                reason: "must not be empty",
            });
        }
        if !self.email.contains('@') {
            return Err(RegistrationError::Invalid {
                field: "email",
                reason: "must contain '@'",
            });
        }
        if self.password.is_empty() {
            return Err(RegistrationError::Invalid {
                field: "password",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

/// Registers users against a record store
pub struct SessionService<'a, R> {
    store: &'a R,
}

impl<'a, R: RecordStore> SessionService<'a, R> {
    pub fn new(store: &'a R) -> Self {
        Self { store }
    }

    /// Register a new user
    ///
    /// Fails with `DuplicateEmail` if any stored user record carries the
    /// same email. Does not create a membership.
    pub fn register(&self, payload: NewUser) -> Result<User, RegistrationError> {
        payload.validate()?;

        if self.email_taken(&payload.email) {
            return Err(RegistrationError::DuplicateEmail {
                email: payload.email,
            });
        }

        let user = User {
            id: new_id("u"),
            role: payload.role,
            email: payload.email,
            password: payload.password,
            name: payload.name,
            created_at: Utc::now(),
        };

        let user = self.store.insert_as(collections::USERS, user)?;
        info!(user_id = %user.id, "registered member");
        Ok(user)
    }

    /// Look up a user by exact email
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.store
            .find_one_as::<User, _>(collections::USERS, |u| u.email == email)
    }

    // Checks raw records so entries that no longer parse as `User` still
    // reserve their address
    fn email_taken(&self, email: &str) -> bool {
        self.store
            .find_one(collections::USERS, |u| {
                u.get("email").and_then(Value::as_str) == Some(email)
            })
            .is_some()
    }
}
