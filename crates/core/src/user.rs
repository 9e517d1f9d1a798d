// User domain types
//
// The public projection of a user account. The password hash lives only on
// the storage row and never reaches this type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A registered user as exposed by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address, stored lowercase.
    pub email: String,
    /// Timestamp when the account was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Normalize an email address for storage and lookup.
/// Emails are unique case-insensitively, so they are always compared lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
