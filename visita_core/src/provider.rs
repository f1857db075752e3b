use serde::{Deserialize, Serialize};

/// A provider profile: what patients browse when they pick someone to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Provider {
    /// Stable profile ID for use in later calls.
    pub id: i64,

    /// The account backing this profile.
    pub user_id: i64,

    /// What the provider practices.
    pub specialty: String,

    /// A free-form introduction.
    pub bio: String,

    /// Where appointments happen, if the provider lists a location.
    pub clinic_address: Option<String>,
}
