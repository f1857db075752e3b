use crate::role::Role;
use serde::{Deserialize, Serialize};

/// An account, as the API reports it. The password never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Stable account ID for use in later calls.
    pub id: i64,

    /// Email used for contact and login.
    pub email: String,

    /// The name shown on schedules.
    pub full_name: String,

    /// What this account is allowed to do.
    #[sqlx(try_from = "String")]
    pub role: Role,

    /// Deactivated accounts cannot log in.
    pub is_active: bool,

    /// Operators skip permission checks.
    pub is_superuser: bool,

    /// Whether the email has been confirmed.
    pub is_verified: bool,
}
