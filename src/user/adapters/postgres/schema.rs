//! Diesel schema for user persistence.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Normalized login email.
        #[max_length = 255]
        email -> Varchar,
        /// Argon2 PHC password hash.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Account role.
        #[max_length = 32]
        role -> Varchar,
        /// Identity document kind.
        #[max_length = 16]
        document_type -> Nullable<Varchar>,
        /// Identity document number.
        #[max_length = 64]
        document_number -> Nullable<Varchar>,
        /// Owning organization.
        #[max_length = 255]
        organization -> Varchar,
        /// Business area.
        #[max_length = 32]
        area -> Nullable<Varchar>,
        /// Account status.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
