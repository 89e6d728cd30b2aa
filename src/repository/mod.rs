use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        types::UserId,
        user::{NewUser, UpdateUser, User, UserSearch},
    },
    pagination::PageRequest,
    repository::errors::RepositoryResult,
};

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod user;

/// Diesel-backed repository shared by all handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub search: Option<UserSearch>,
    pub pagination: Option<PageRequest>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: UserSearch) -> Self {
        self.search = Some(search);
        self
    }

    pub fn paginate(mut self, request: PageRequest) -> Self {
        self.pagination = Some(request);
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    /// Returns the total number of matching users and the requested window,
    /// newest first.
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(u64, Vec<User>)>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    /// Fails with [`errors::RepositoryError::NotFound`] when the id is unknown.
    fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
    /// Fails with [`errors::RepositoryError::NotFound`] when the id is unknown.
    fn delete_user(&self, id: UserId) -> RepositoryResult<()>;
}
