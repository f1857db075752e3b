use serde::{Deserialize, Serialize};

/// The request to log into the server. Sent form-encoded (the OAuth2
/// password flow), so the email travels in `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// The account's email.
    pub username: String,

    /// Plaintext password to check.
    pub password: String,
}

/// Result of logging in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resp {
    /// Bearer token to use for future requests.
    pub access_token: String,

    /// Always `bearer`.
    #[serde(default = "bearer")]
    pub token_type: String,
}

/// The only token type the server issues.
fn bearer() -> String {
    "bearer".to_string()
}

/// Where the login endpoint lives.
pub const PATH: &str = "/auth/jwt/login";
