//! RocksDB column family definitions.

/// Users: user_id → User
pub const CF_USERS: &str = "users";

/// Natural-key index: "provider:email" → user_id
pub const CF_USERS_BY_EMAIL_PROVIDER: &str = "users_by_email_provider";

/// Get all column family names
pub fn all_column_families() -> Vec<&'static str> {
    vec![CF_USERS, CF_USERS_BY_EMAIL_PROVIDER]
}
