use crate::conn::Conn;
use crate::error::Error;
use crate::jwt::Claims;
use crate::state::TokenTtl;
use crate::{bail, bail_if};
use argon2::{password_hash, Argon2, PasswordHash, PasswordVerifier};
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use jsonwebtoken::EncodingKey;
use visita_core::api::login::{Req, Resp};
use visita_core::Role;

/// This should be the same for both missing accounts and incorrect passwords
/// so as not to give additional information about what accounts exist to
/// someone probing the system.
static BAD_LOGIN_MESSAGE: &str = "incorrect email or password";

/// The columns a login check needs.
#[derive(sqlx::FromRow)]
struct Account {
    id: i64,
    email: String,
    hashed_password: String,
    role: String,
    is_active: bool,
}

#[tracing::instrument(skip(conn, encoding_key, ttl, req))]
pub async fn handler(
    Conn(mut conn): Conn,
    State(encoding_key): State<EncodingKey>,
    State(ttl): State<TokenTtl>,
    Form(req): Form<Req>,
) -> Result<Json<Resp>, Error> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT id, email, hashed_password, role, is_active \
         FROM users WHERE email = $1 LIMIT 1",
    )
    .bind(&req.username)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| Error::custom_with_status(BAD_LOGIN_MESSAGE, StatusCode::UNAUTHORIZED))?;

    let hash = PasswordHash::new(&account.hashed_password)?;

    if let Err(err) = Argon2::default().verify_password(req.password.as_bytes(), &hash) {
        if err == password_hash::Error::Password {
            bail!(BAD_LOGIN_MESSAGE, StatusCode::UNAUTHORIZED);
        }

        tracing::error!(?err, "error verifying password");
        return Err(Error::Internal);
    }

    // Deactivated accounts get the same answer as bad passwords.
    bail_if!(
        !account.is_active,
        BAD_LOGIN_MESSAGE,
        StatusCode::UNAUTHORIZED
    );

    let role: Role = account.role.parse().map_err(|err| {
        tracing::error!(?err, "account has a role the server does not know");
        Error::Internal
    })?;

    let claims = Claims::new(account.id, account.email, role, ttl.0);
    let access_token = claims.sign(&encoding_key)?;

    Ok(Json(Resp {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
