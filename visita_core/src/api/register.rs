use crate::role::Role;
use crate::user::User;
use serde::{Deserialize, Serialize};

/// The request to create a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// Email to use for contact and login.
    pub email: String,

    /// Plaintext password. Hashed server-side; never stored.
    pub password: String,

    /// The name to show on schedules.
    pub full_name: String,

    /// The requested role. The server defaults to patient when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Accepted for compatibility with other clients. The server decides the
    /// real value for public registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Accepted for compatibility; ignored for public registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,

    /// Accepted for compatibility; ignored for public registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

impl Req {
    /// The payload the registration form builds: just the three fields,
    /// everything else left for the server to default.
    pub fn new(email: String, password: String, full_name: String) -> Self {
        Self {
            email,
            password,
            full_name,
            role: None,
            is_active: None,
            is_superuser: None,
            is_verified: None,
        }
    }
}

/// The created account.
pub type Resp = User;

/// Where the register endpoint lives.
pub const PATH: &str = "/auth/register";
