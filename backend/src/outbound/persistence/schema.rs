//! Diesel table definitions.
//!
//! Mirrors `backend/migrations`; regenerate with `diesel print-schema` after
//! changing a migration.

diesel::table! {
    /// Registered users. `email` carries a unique constraint.
    users (id) {
        /// Primary key assigned from a `BIGSERIAL` sequence.
        id -> Int8,
        /// Display name, never blank.
        name -> Varchar,
        /// Contact email, unique across users.
        email -> Varchar,
        /// Age in years; `NULL` when unknown.
        age -> Nullable<Int4>,
    }
}
