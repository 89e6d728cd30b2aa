//! Services handling user listing and CRUD.

use crate::domain::types::{SearchField, SearchTerm, UserId};
use crate::domain::user::{User, UserSearch};
use crate::dto::users::UsersPageQuery;
use crate::forms::users::{CreateUserForm, CreateUserPayload, UpdateUserForm, UpdateUserPayload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_PAGE, Page, PageRequest};
use crate::repository::{UserListQuery, UserReader, UserWriter};
use crate::services::credentials::hash_password;
use crate::services::{ServiceError, ServiceResult};

/// Ids that do not parse can never exist, so they are reported as missing.
fn parse_user_id(raw: &str) -> ServiceResult<UserId> {
    raw.parse::<UserId>().map_err(|_| ServiceError::NotFound)
}

/// Builds the optional search predicate from the raw `q`/`filter` pair.
///
/// A filter outside [`SearchField`] is rejected even without a term; a blank
/// term or a missing filter means no predicate.
fn build_search(q: Option<&str>, filter: Option<&str>) -> ServiceResult<Option<UserSearch>> {
    let field = filter
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::parse::<SearchField>)
        .transpose()?;

    let term = q.and_then(|q| SearchTerm::new(q).ok());

    Ok(match (field, term) {
        (Some(field), Some(term)) => Some(UserSearch::new(field, term)),
        _ => None,
    })
}

/// Returns every user, newest first.
pub fn list_all_users<R>(repo: &R) -> ServiceResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    let (_, users) = repo.list_users(UserListQuery::new()).map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;

    Ok(users)
}

/// Counts the filtered set, then fetches the requested window of it.
pub fn list_users_paginated<R>(repo: &R, params: UsersPageQuery) -> ServiceResult<Page<User>>
where
    R: UserReader + ?Sized,
{
    let request = PageRequest::new(
        params.page.unwrap_or(DEFAULT_PAGE),
        params.limit.unwrap_or(DEFAULT_ITEMS_PER_PAGE),
    )?;

    let mut query = UserListQuery::new().paginate(request);
    if let Some(search) = build_search(params.q.as_deref(), params.filter.as_deref())? {
        query = query.search(search);
    }

    let (total, users) = repo.list_users(query).map_err(|err| {
        log::error!("Failed to list paginated users: {err}");
        err
    })?;

    Ok(Page::new(users, request, total))
}

/// Fetches a single user.
pub fn get_user<R>(repo: &R, user_id: &str) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let id = parse_user_id(user_id)?;
    repo.get_user_by_id(id)?.ok_or(ServiceError::NotFound)
}

/// Validates the form, hashes the password and persists the new user.
pub fn create_user<R>(repo: &R, form: CreateUserForm, bcrypt_cost: u32) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let payload = CreateUserPayload::try_from(form)?;
    let password_hash = hash_password(&payload.password, bcrypt_cost)?;
    let new_user = payload.into_domain(password_hash);

    let user = repo.create_user(&new_user).map_err(|err| {
        log::error!("Failed to create user: {err}");
        err
    })?;

    Ok(user)
}

/// Applies a partial update; a supplied password is re-hashed.
pub fn update_user<R>(
    repo: &R,
    user_id: &str,
    form: UpdateUserForm,
    bcrypt_cost: u32,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let id = parse_user_id(user_id)?;
    let payload = UpdateUserPayload::try_from(form)?;
    let password_hash = payload
        .password
        .as_deref()
        .map(|password| hash_password(password, bcrypt_cost))
        .transpose()?;
    let updates = payload.into_domain(password_hash);

    Ok(repo.update_user(id, &updates)?)
}

/// Removes the user.
pub fn delete_user<R>(repo: &R, user_id: &str) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    let id = parse_user_id(user_id)?;
    repo.delete_user(id)?;
    Ok(())
}
