//! DTOs exposed by the users API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::User;
use crate::pagination::Page;

/// Query string of `GET /api/users/paginated`.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UsersPageQuery {
    /// Page number, 1-based. Defaults to the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size. Defaults to [`crate::pagination::DEFAULT_ITEMS_PER_PAGE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Search term matched as a case-insensitive substring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Column the search term applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Response of `GET /api/users/paginated`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedUsersResponse {
    pub success: bool,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub total_records: u64,
    pub users: Vec<User>,
}

impl From<Page<User>> for PaginatedUsersResponse {
    fn from(page: Page<User>) -> Self {
        Self {
            success: true,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            total_records: page.total_records,
            users: page.items,
        }
    }
}

/// JSON body sent by clients to create or edit a user.
///
/// Creation requires `name`, `email`, `username` and `password`; on edit
/// every omitted field keeps its stored value.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Body used for confirmations and for every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
