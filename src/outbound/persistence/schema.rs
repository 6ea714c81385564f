//! Diesel table definitions for the dashboard schema.
//!
//! Kept in sync with the SQL migrations; regenerate with
//! `diesel print-schema` when the migrations change.

diesel::table! {
    /// Stored air-quality measurements, one row per provider result.
    records (id) {
        /// Store-assigned surrogate key.
        id -> Int4,
        /// UTC collection time as provider text.
        recorded_at -> Varchar,
        /// Pollutant concentration.
        value -> Float8,
    }
}
