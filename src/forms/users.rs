//! Forms for creating and editing users.

use serde::Deserialize;
use validator::Validate;

use crate::{
    domain::{
        types::{UserEmail, UserName, Username},
        user::{NewUser, UpdateUser},
    },
    forms::FormError,
};

/// JSON body of `POST /api/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub address: String,
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 16))]
    pub pincode: String,
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 72))]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// JSON body of `PUT /api/users/{id}`; omitted fields keep their value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserForm {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    pub email: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 16))]
    pub pincode: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 72))]
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Checked contents of [`CreateUserForm`], still holding the plain password.
pub struct CreateUserPayload {
    pub name: UserName,
    pub address: String,
    pub email: UserEmail,
    pub phone: String,
    pub pincode: String,
    pub username: Username,
    pub password: String,
    pub role: Option<String>,
}

impl TryFrom<CreateUserForm> for CreateUserPayload {
    type Error = FormError;

    fn try_from(form: CreateUserForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: UserName::new(form.name).map_err(|_| FormError::InvalidName)?,
            address: form.address,
            email: UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: form.phone,
            pincode: form.pincode,
            username: Username::new(form.username).map_err(|_| FormError::InvalidUsername)?,
            password: form.password,
            role: form.role,
        })
    }
}

impl CreateUserPayload {
    pub fn into_domain(self, password_hash: String) -> NewUser {
        NewUser::new(
            self.name.into_inner(),
            self.address,
            self.email.into_inner(),
            self.phone,
            self.pincode,
            self.username.into_inner(),
            self.role,
            password_hash,
        )
    }
}

/// Checked contents of [`UpdateUserForm`].
pub struct UpdateUserPayload {
    pub name: Option<UserName>,
    pub address: Option<String>,
    pub email: Option<UserEmail>,
    pub phone: Option<String>,
    pub pincode: Option<String>,
    pub username: Option<Username>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl TryFrom<UpdateUserForm> for UpdateUserPayload {
    type Error = FormError;

    fn try_from(form: UpdateUserForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: form
                .name
                .map(UserName::new)
                .transpose()
                .map_err(|_| FormError::InvalidName)?,
            address: form.address,
            email: form
                .email
                .map(UserEmail::new)
                .transpose()
                .map_err(|_| FormError::InvalidEmail)?,
            phone: form.phone,
            pincode: form.pincode,
            username: form
                .username
                .map(Username::new)
                .transpose()
                .map_err(|_| FormError::InvalidUsername)?,
            password: form.password,
            role: form.role,
        })
    }
}

impl UpdateUserPayload {
    pub fn into_domain(self, password_hash: Option<String>) -> UpdateUser {
        UpdateUser::new(
            self.name.map(UserName::into_inner),
            self.address,
            self.email.map(UserEmail::into_inner),
            self.phone,
            self.pincode,
            self.username.map(Username::into_inner),
            self.role,
            password_hash,
        )
    }
}
