use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, UserId};
use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: String,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub pincode: String,
    pub username: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub id: String,
    pub name: &'a str,
    pub address: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub pincode: &'a str,
    pub username: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
/// Data used when updating a [`User`] record. `None` columns are skipped.
pub struct UpdateUser<'a> {
    pub name: Option<&'a str>,
    pub address: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub pincode: Option<&'a str>,
    pub username: Option<&'a str>,
    pub role: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id.parse::<UserId>()?,
            name: user.name,
            address: user.address,
            email: user.email,
            phone: user.phone,
            pincode: user.pincode,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str(),
            address: user.address.as_str(),
            email: user.email.as_str(),
            phone: user.phone.as_str(),
            pincode: user.pincode.as_str(),
            username: user.username.as_str(),
            role: user.role.as_str(),
            password_hash: user.password_hash.as_str(),
            created_at: user.created_at,
            updated_at: user.created_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(user: &'a DomainUpdateUser) -> Self {
        Self {
            name: user.name.as_deref(),
            address: user.address.as_deref(),
            email: user.email.as_deref(),
            phone: user.phone.as_deref(),
            pincode: user.pincode.as_deref(),
            username: user.username.as_deref(),
            role: user.role.as_deref(),
            password_hash: user.password_hash.as_deref(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_domain_new() -> DomainNewUser {
        DomainNewUser::new(
            "Meena".to_string(),
            "Addr".to_string(),
            "meena@example.com".to_string(),
            "12345".to_string(),
            "560001".to_string(),
            "meena".to_string(),
            None,
            "$2b$04$hash".to_string(),
        )
    }

    #[test]
    fn from_domain_new_creates_newuser() {
        let domain = sample_domain_new();
        let new: NewUser = (&domain).into();
        assert_eq!(new.id, domain.id.to_string());
        assert_eq!(new.name, domain.name);
        assert_eq!(new.email, domain.email);
        assert_eq!(new.password_hash, domain.password_hash);
        assert_eq!(new.created_at, new.updated_at);
    }

    #[test]
    fn from_domain_update_skips_missing_fields() {
        let domain = DomainUpdateUser::new(
            Some("Meenakshi".to_string()),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
        );
        let update: UpdateUser = (&domain).into();
        assert_eq!(update.name, Some("Meenakshi"));
        assert_eq!(update.email, None);
        assert_eq!(update.password_hash, None);
    }

    #[test]
    fn user_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let id = UserId::new();
        let db_user = User {
            id: id.to_string(),
            name: "n".to_string(),
            address: "a".to_string(),
            email: "e@example.com".to_string(),
            phone: "p".to_string(),
            pincode: "z".to_string(),
            username: "u".to_string(),
            role: "user".to_string(),
            password_hash: "h".to_string(),
            created_at: now,
            updated_at: now,
        };
        let domain = DomainUser::try_from(db_user).unwrap();
        assert_eq!(domain.id, id);
        assert_eq!(domain.name, "n");
        assert_eq!(domain.username, "u");
        assert_eq!(domain.created_at, now);
    }

    #[test]
    fn user_with_malformed_id_is_rejected() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_user = User {
            id: "42".to_string(),
            name: "n".to_string(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            pincode: String::new(),
            username: "u".to_string(),
            role: "user".to_string(),
            password_hash: "h".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            DomainUser::try_from(db_user),
            Err(TypeConstraintError::InvalidUuid)
        );
    }
}
