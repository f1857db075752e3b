use crate::conn::Conn;
use crate::error::Error;
use crate::jwt::Claims;
use crate::{bail, bail_if};
use axum::{http::StatusCode, Json};
use sqlx::Acquire;
use visita_core::api::enroll::{Req, Resp};
use visita_core::{Provider, Role};

#[tracing::instrument(skip(conn))]
pub async fn handler(
    Conn(mut conn): Conn,
    claims: Claims,
    Json(req): Json<Req>,
) -> Result<(StatusCode, Json<Resp>), Error> {
    bail_if!(
        claims.role != Role::Provider,
        "only accounts with the provider role can create a profile",
        StatusCode::FORBIDDEN
    );

    bail_if!(req.specialty.trim().is_empty(), "specialty must not be blank");
    bail_if!(req.bio.trim().is_empty(), "bio must not be blank");

    let mut tx = conn.begin().await?;

    let existing = sqlx::query("SELECT id FROM providers WHERE user_id = $1 LIMIT 1")
        .bind(claims.sub)
        .fetch_optional(&mut *tx)
        .await?;

    bail_if!(existing.is_some(), "provider profile already exists");

    let inserted = sqlx::query_as::<_, Provider>(
        "INSERT INTO providers (user_id, specialty, bio, clinic_address) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, user_id, specialty, bio, clinic_address",
    )
    .bind(claims.sub)
    .bind(req.specialty.trim())
    .bind(req.bio.trim())
    .bind(&req.clinic_address)
    .fetch_one(&mut *tx)
    .await;

    let provider = match inserted {
        Ok(provider) => provider,
        // Two enrollments racing each other both get past the check above;
        // the unique constraint on user_id turns the loser into the same
        // answer a sequential duplicate gets.
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            bail!("provider profile already exists")
        }
        Err(err) => return Err(err.into()),
    };

    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(provider)))
}
