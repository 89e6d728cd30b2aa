//! Repository implementation for user records.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::fold_case,
    domain::{
        types::{SearchField, UserId},
        user::{NewUser, UpdateUser, User, UserSearch},
    },
    models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser},
    repository::{
        DieselRepository, UserListQuery, UserReader, UserWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::users,
};

/// Escapes LIKE wildcards so the term matches literally, then wraps it in `%`.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Applies the optional search predicate. Both sides go through `fold_case`
/// so matching ignores case beyond ASCII.
fn filtered(search: Option<&UserSearch>) -> users::BoxedQuery<'static, Sqlite> {
    let items = users::table.into_boxed::<Sqlite>();

    let Some(search) = search else {
        return items;
    };

    let pattern = fold_case(like_pattern(search.term.as_str()));
    match search.field {
        SearchField::Name => items.filter(fold_case(users::name).like(pattern).escape('\\')),
        SearchField::Email => items.filter(fold_case(users::email).like(pattern).escape('\\')),
        SearchField::Phone => items.filter(fold_case(users::phone).like(pattern).escape('\\')),
        SearchField::Role => items.filter(fold_case(users::role).like(pattern).escape('\\')),
    }
}

fn into_domain(db_user: DbUser) -> RepositoryResult<User> {
    User::try_from(db_user).map_err(RepositoryError::from)
}

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        let db_user = users::table
            .find(id.to_string())
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user.map(into_domain).transpose()
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(u64, Vec<User>)> {
        let mut conn = self.conn()?;

        let count = filtered(query.search.as_ref())
            .count()
            .get_result::<i64>(&mut conn)?;
        let total = u64::try_from(count)
            .map_err(|_| RepositoryError::Unexpected(format!("negative row count {count}")))?;

        let mut items = filtered(query.search.as_ref())
            .order((users::created_at.desc(), users::id.desc()));

        if let Some(pagination) = &query.pagination {
            let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
            items = items
                .offset(offset)
                .limit(i64::from(pagination.limit()));
        }

        let users = items
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<User>>>()?;

        Ok((total, users))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let insertable: DbNewUser = new_user.into();

        let db_user = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        into_domain(db_user)
    }

    fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let changes: DbUpdateUser = updates.into();

        let db_user = diesel::update(users::table.find(id.to_string()))
            .set(&changes)
            .get_result::<DbUser>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        into_domain(db_user)
    }

    fn delete_user(&self, id: UserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(users::table.find(id.to_string())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
