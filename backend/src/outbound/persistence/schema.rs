//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered reporters.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Identifier supplied by the chat transport. Unique.
        external_id -> Varchar,
        /// Public alias shown on the leaderboard (max 30 characters).
        alias -> Nullable<Varchar>,
        /// Accumulated points, never negative.
        points -> Int8,
        /// Admin flag recorded at registration.
        is_admin -> Bool,
        /// Registration timestamp; breaks leaderboard ties.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Vacancy reports.
    reports (id) {
        /// Primary key from a sequence; never reused.
        id -> Int8,
        /// Author of the report.
        owner_id -> Uuid,
        /// Media store handle of the photo.
        image_reference -> Text,
        /// Free-text description of the dwelling.
        apartment_details -> Nullable<Text>,
        /// `Street HouseNumber, City`.
        address -> Text,
        /// Free-text estimate of how long the dwelling has been empty.
        duration_estimate -> Text,
        /// Number of confirmations received.
        confirmation_count -> Int4,
        /// Submission timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(reports -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(reports, users);
