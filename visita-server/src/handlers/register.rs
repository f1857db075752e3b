use crate::conn::Conn;
use crate::error::Error;
use crate::{bail, bail_if};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{http::StatusCode, Json};
use sqlx::Acquire;
use visita_core::api::register::{Req, Resp};
use visita_core::{validate, User};

#[tracing::instrument(skip(conn, req))]
pub async fn handler(
    Conn(mut conn): Conn,
    Json(req): Json<Req>,
) -> Result<(StatusCode, Json<Resp>), Error> {
    validate_new_account(&req)?;

    let mut tx = conn.begin().await?;

    // Don't allow a duplicate account if one exists. The email is checked and
    // stored trimmed, like the name.
    let existing = sqlx::query("SELECT id FROM users WHERE email = $1 LIMIT 1")
        .bind(req.email.trim())
        .fetch_optional(&mut *tx)
        .await?;

    bail_if!(
        existing.is_some(),
        "this email is already registered",
        StatusCode::CONFLICT
    );

    // We're good, so create the account.
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);
    let hashed = argon2
        .hash_password(req.password.as_bytes(), &salt)?
        .to_string();

    // The role is honored; the privileged flags are not. Public registration
    // always produces an active, non-superuser, unverified account.
    let role = req.role.unwrap_or_default();

    let inserted = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, hashed_password, full_name, role) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, email, full_name, role, is_active, is_superuser, is_verified",
    )
    .bind(req.email.trim())
    .bind(&hashed)
    .bind(req.full_name.trim())
    .bind(role.as_str())
    .fetch_one(&mut *tx)
    .await;

    let user = match inserted {
        Ok(user) => user,
        // The unique constraint catches registrations racing each other past
        // the check above.
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            bail!("this email is already registered", StatusCode::CONFLICT)
        }
        Err(err) => return Err(err.into()),
    };

    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// The same checks the forms run, applied again here so non-form clients get
/// the same answers.
fn validate_new_account(req: &Req) -> Result<(), Error> {
    let mut problems = Vec::new();

    if let Err(problem) = validate::registration(&req.full_name, &req.email, &req.password) {
        problems.push(problem.to_string());
    }

    if !req.email.contains('@') {
        problems.push("email must contain an @".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::validation(problems))
    }
}
