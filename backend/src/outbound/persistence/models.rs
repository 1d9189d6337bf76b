//! Internal Diesel row structs for the users table.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;

use super::schema::users;

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

/// Insert payload letting the sequence assign the id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: Option<i32>,
}

/// Full record used to upsert a user under a known id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct UserRecord<'a> {
    pub id: i64,
    pub name: &'a str,
    pub email: &'a str,
    pub age: Option<i32>,
}

/// Changeset replacing every mutable column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserChanges<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: Option<i32>,
}
