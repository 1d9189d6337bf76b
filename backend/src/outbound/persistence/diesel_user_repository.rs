//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::models::{NewUserRow, UserChanges, UserRecord, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository using `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    log_diesel_error(&error);
    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

/// Like [`map_diesel_error`], reporting unique violations as duplicate emails.
fn map_write_error(email: &str) -> impl FnOnce(DieselError) -> UserPersistenceError + '_ {
    move |error| match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            log_diesel_error(&error);
            UserPersistenceError::duplicate_email(email)
        }
        other => map_diesel_error(other),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        age,
    } = row;
    let id = UserId::new(id)
        .map_err(|err| UserPersistenceError::query(format!("stored user {id}: {err}")))?;
    let age = age
        .map(u32::try_from)
        .transpose()
        .map_err(|_| UserPersistenceError::query(format!("stored user {id} has a negative age")))?;
    let user = User::try_new(name, email, age)
        .map_err(|err| UserPersistenceError::query(format!("stored user {id}: {err}")))?;
    Ok(user.with_id(id))
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserPersistenceError> {
    rows.into_iter().map(row_to_user).collect()
}

fn age_for_db(age: Option<u32>) -> Result<Option<i32>, UserPersistenceError> {
    age.map(i32::try_from)
        .transpose()
        .map_err(|_| UserPersistenceError::query("age exceeds the storable range"))
}

/// Escape `LIKE` wildcards so `fragment` matches literally.
fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_users(rows)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_name_containing(
        &self,
        fragment: &str,
    ) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::name.like(like_pattern(fragment)))
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_users(rows)
    }

    async fn find_by_age(&self, age: u32) -> Result<Vec<User>, UserPersistenceError> {
        let Ok(age) = i32::try_from(age) else {
            return Ok(Vec::new());
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::age.eq(age))
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_users(rows)
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(users::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn save(&self, user: &User) -> Result<User, UserPersistenceError> {
        let age = age_for_db(user.age())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = match user.id() {
            None => {
                let new_row = NewUserRow {
                    name: user.name(),
                    email: user.email(),
                    age,
                };
                diesel::insert_into(users::table)
                    .values(&new_row)
                    .returning(UserRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(map_write_error(user.email()))?
            }
            Some(id) => {
                let record = UserRecord {
                    id: id.get(),
                    name: user.name(),
                    email: user.email(),
                    age,
                };
                let changes = UserChanges {
                    name: user.name(),
                    email: user.email(),
                    age,
                };
                let row = diesel::insert_into(users::table)
                    .values(&record)
                    .on_conflict(users::id)
                    .do_update()
                    .set(&changes)
                    .returning(UserRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(map_write_error(user.email()))?;

                // Explicit ids bypass the sequence; move it past them.
                diesel::sql_query(
                    "SELECT setval(pg_get_serial_sequence('users', 'id'), \
                     GREATEST((SELECT MAX(id) FROM users), 1))",
                )
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
                row
            }
        };

        row_to_user(row)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(id: i64, age: Option<i32>) -> UserRow {
        UserRow {
            id,
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            age,
        }
    }

    #[rstest]
    #[case("Ali", "%Ali%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("", "%%")]
    fn like_pattern_escapes_wildcards(#[case] fragment: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(fragment), expected);
    }

    #[rstest]
    fn rows_convert_to_users() {
        let user = row_to_user(row(3, Some(41))).expect("valid row");
        assert_eq!(user.id().map(UserId::get), Some(3));
        assert_eq!(user.age(), Some(41));
    }

    #[rstest]
    #[case(row(0, None))]
    #[case(row(1, Some(-1)))]
    fn invalid_rows_are_query_errors(#[case] invalid: UserRow) {
        let error = row_to_user(invalid).expect_err("invalid row");
        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn oversized_ages_are_rejected() {
        assert!(age_for_db(Some(u32::MAX)).is_err());
        assert_eq!(age_for_db(Some(30)), Ok(Some(30)));
        assert_eq!(age_for_db(None), Ok(None));
    }

    #[rstest]
    fn unique_violations_become_duplicate_email() {
        let error = map_write_error("ada@example.com")(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key value")),
        ));
        assert_eq!(
            error,
            UserPersistenceError::duplicate_email("ada@example.com")
        );
    }

    #[rstest]
    fn closed_connections_become_connection_errors() {
        let error = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("server closed the connection")),
        ));
        assert!(matches!(error, UserPersistenceError::Connection { .. }));
        assert!(matches!(
            map_diesel_error(DieselError::NotFound),
            UserPersistenceError::Query { .. }
        ));
    }
}
