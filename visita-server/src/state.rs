use axum::extract::FromRef;
use jsonwebtoken::{errors::Error, DecodingKey, EncodingKey};
use sqlx::{Pool, Postgres};

/// Shared state needed by requests.
#[derive(Clone, FromRef)]
pub struct State {
    /// Database connection pool.
    pool: Pool<Postgres>,

    /// Key for encoding new JWTs.
    encoding_key: EncodingKey,

    /// Key for verifying existing JWTs.
    decoding_key: DecodingKey,

    /// How long issued tokens live.
    token_ttl: TokenTtl,
}

/// Token lifetime in seconds. A newtype so handlers can pull it out of state
/// with `FromRef`.
#[derive(Debug, Clone, Copy)]
pub struct TokenTtl(pub i64);

impl State {
    /// Create a new state.
    ///
    /// ## Errors
    ///
    /// Fails if the JWT secret is not valid base64.
    pub fn new(
        pool: Pool<Postgres>,
        jwt_base64_secret: &str,
        token_ttl_seconds: i64,
    ) -> Result<Self, Error> {
        Ok(Self {
            pool,
            encoding_key: EncodingKey::from_base64_secret(jwt_base64_secret)?,
            decoding_key: DecodingKey::from_base64_secret(jwt_base64_secret)?,
            token_ttl: TokenTtl(token_ttl_seconds),
        })
    }
}
