use axum::extract::FromRef;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{async_trait, extract::FromRequestParts};
use axum::{Json, RequestPartsExt};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use visita_core::Role;

/// What a token says about its bearer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The account ID.
    pub sub: i64,

    /// The account email at issue time.
    pub email: String,

    /// The account role at issue time.
    pub role: Role,

    /// When the token was issued (unix seconds.)
    pub iat: i64,

    /// When the token expires (unix seconds.)
    pub exp: i64,
}

impl Claims {
    /// Mint claims for an account, good for `ttl_seconds` from now.
    pub fn new(sub: i64, email: String, role: Role, ttl_seconds: i64) -> Self {
        let now = chrono::Utc::now();

        Self {
            sub,
            email,
            role,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::seconds(ttl_seconds)).timestamp(),
        }
    }

    /// Sign these claims into a compact JWT.
    ///
    /// ## Errors
    ///
    /// Fails only if the encoding key is unusable.
    pub fn sign(&self, key: &EncodingKey) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), self, key)
    }

    /// Claims for an arbitrary test account.
    #[cfg(test)]
    pub fn test(sub: i64) -> Self {
        Self::new(sub, "test@example.com".to_string(), Role::Patient, 60 * 60)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    DecodingKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::InvalidToken)?;

        let token_data = decode::<Claims>(
            bearer.token(),
            &DecodingKey::from_ref(state),
            &Validation::default(),
        )
        .map_err(|err| {
            tracing::trace!(?err, "error decoding token");
            AuthError::InvalidToken
        })?;

        Ok(token_data.claims)
    }
}

/// Why a token was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Missing, malformed, expired, or signed with the wrong key.
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "invalid authentication credentials")
            }
        };

        let body = Json(json!({ "detail": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::Request;

    /// `visita-test-secret`, base64-encoded the way the real deployment's
    /// secret is.
    static TEST_SECRET: &str = "dmlzaXRhLXRlc3Qtc2VjcmV0";

    fn keys() -> (EncodingKey, DecodingKey) {
        (
            EncodingKey::from_base64_secret(TEST_SECRET).unwrap(),
            DecodingKey::from_base64_secret(TEST_SECRET).unwrap(),
        )
    }

    struct TestState(DecodingKey);

    impl FromRef<TestState> for DecodingKey {
        fn from_ref(state: &TestState) -> Self {
            state.0.clone()
        }
    }

    fn request_with_token(token: &str) -> Parts {
        let request = Request::builder()
            .uri("/appointments")
            .header("Authorization", format!("Bearer {token}"))
            .body(())
            .unwrap();

        request.into_parts().0
    }

    #[test_log::test(tokio::test)]
    async fn accepts_a_fresh_token() {
        let (encoding, decoding) = keys();

        let claims = Claims::test(1);
        let token = claims.sign(&encoding).unwrap();

        let mut parts = request_with_token(&token);
        let extracted = Claims::from_request_parts(&mut parts, &TestState(decoding))
            .await
            .unwrap();

        assert_eq!(extracted, claims);
    }

    #[test_log::test(tokio::test)]
    async fn rejects_a_missing_header() {
        let (_, decoding) = keys();

        let request = Request::builder().uri("/appointments").body(()).unwrap();
        let (mut parts, ()) = request.into_parts();

        let err = Claims::from_request_parts(&mut parts, &TestState(decoding))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test_log::test(tokio::test)]
    async fn rejects_a_garbage_token() {
        let (_, decoding) = keys();

        let mut parts = request_with_token("not.a.jwt");
        let err = Claims::from_request_parts(&mut parts, &TestState(decoding))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test_log::test(tokio::test)]
    async fn rejects_an_expired_token() {
        let (encoding, decoding) = keys();

        let mut claims = Claims::test(1);
        claims.exp = claims.iat - 60 * 60;
        let token = claims.sign(&encoding).unwrap();

        let mut parts = request_with_token(&token);
        let err = Claims::from_request_parts(&mut parts, &TestState(decoding))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test_log::test(tokio::test)]
    async fn rejects_a_token_signed_with_another_key() {
        let (_, decoding) = keys();

        // `some-other-secret`
        let other = EncodingKey::from_base64_secret("c29tZS1vdGhlci1zZWNyZXQ=").unwrap();
        let token = Claims::test(1).sign(&other).unwrap();

        let mut parts = request_with_token(&token);
        let err = Claims::from_request_parts(&mut parts, &TestState(decoding))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidToken);
    }
}
