use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{SearchField, SearchTerm, UserId};

/// Role assigned to users created without an explicit one.
pub const DEFAULT_ROLE: &str = "user";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub pincode: String,
    pub username: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub id: UserId,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub pincode: String,
    pub username: String,
    pub role: String,
    /// Bcrypt hash of the credential; the plain value never reaches this type.
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl NewUser {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        name: String,
        address: String,
        email: String,
        phone: String,
        pincode: String,
        username: String,
        role: Option<String>,
        password_hash: String,
    ) -> Self {
        Self {
            id: UserId::new(),
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
            pincode: pincode.trim().to_string(),
            username: username.trim().to_string(),
            role: role
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            password_hash,
            created_at: Utc::now().naive_utc(),
        }
    }

    /// Overrides the creation timestamp, used when importing existing records.
    #[must_use]
    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pincode: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub password_hash: Option<String>,
}

impl UpdateUser {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        name: Option<String>,
        address: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        pincode: Option<String>,
        username: Option<String>,
        role: Option<String>,
        password_hash: Option<String>,
    ) -> Self {
        Self {
            name: name.map(|s| s.trim().to_string()),
            address: address.map(|s| s.trim().to_string()),
            email: email.map(|s| s.trim().to_lowercase()),
            phone: phone.map(|s| s.trim().to_string()),
            pincode: pincode.map(|s| s.trim().to_string()),
            username: username.map(|s| s.trim().to_string()),
            role: role
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            password_hash,
        }
    }
}

/// Case-insensitive substring predicate over a single searchable column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSearch {
    pub field: SearchField,
    pub term: SearchTerm,
}

impl UserSearch {
    pub fn new(field: SearchField, term: SearchTerm) -> Self {
        Self { field, term }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_normalizes_input() {
        let user = NewUser::new(
            " Lakshmi ".to_string(),
            "12 Temple St".to_string(),
            " Lakshmi@Example.com".to_string(),
            " 9876543210 ".to_string(),
            "600001".to_string(),
            " lakshmi ".to_string(),
            Some("  ".to_string()),
            "hash".to_string(),
        );

        assert_eq!(user.name, "Lakshmi");
        assert_eq!(user.email, "lakshmi@example.com");
        assert_eq!(user.phone, "9876543210");
        assert_eq!(user.username, "lakshmi");
        assert_eq!(user.role, DEFAULT_ROLE);
    }

    #[test]
    fn update_user_normalizes_given_fields() {
        let update = UpdateUser::new(
            None,
            None,
            Some("NEW@EXAMPLE.COM".to_string()),
            None,
            None,
            None,
            None,
            None,
        );
        assert_eq!(update.email.as_deref(), Some("new@example.com"));
        assert!(update.name.is_none());
    }

    #[test]
    fn user_serializes_with_camel_case_and_without_credentials() {
        let now = Utc::now().naive_utc();
        let user = User {
            id: UserId::new(),
            name: "A".to_string(),
            address: String::new(),
            email: "a@example.com".to_string(),
            phone: String::new(),
            pincode: String::new(),
            username: "a".to_string(),
            role: DEFAULT_ROLE.to_string(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("passwordHash").is_none());
        assert_eq!(value["id"], user.id.to_string());
    }
}
