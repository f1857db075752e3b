use crate::conn::Conn;
use crate::error::Error;
use crate::jwt::Claims;
use crate::{bail, bail_if};
use axum::{http::StatusCode, Json};
use sqlx::Acquire;
use visita_core::api::book::{Req, Resp};
use visita_core::{Appointment, Slot};

#[tracing::instrument(skip(conn))]
pub async fn handler(
    Conn(mut conn): Conn,
    claims: Claims,
    Json(req): Json<Req>,
) -> Result<(StatusCode, Json<Resp>), Error> {
    let mut tx = conn.begin().await?;

    // Lock the slot row so two bookings can't both see it open.
    let slot = sqlx::query_as::<_, Slot>(
        "SELECT id, provider_id, start_time, end_time, is_booked \
         FROM availabilities WHERE id = $1 FOR UPDATE",
    )
    .bind(req.slot_id)
    .fetch_optional(&mut *tx)
    .await?;

    let slot = match slot {
        Some(slot) => slot,
        None => bail!("no such slot", StatusCode::NOT_FOUND),
    };

    bail_if!(
        slot.provider_id != req.provider_id,
        "slot belongs to a different provider"
    );
    bail_if!(slot.is_booked, "slot is already booked", StatusCode::CONFLICT);

    sqlx::query("UPDATE availabilities SET is_booked = TRUE WHERE id = $1")
        .bind(slot.id)
        .execute(&mut *tx)
        .await?;

    let inserted = sqlx::query_as::<_, Appointment>(
        "INSERT INTO appointments (patient_id, provider_id, slot_id) \
         VALUES ($1, $2, $3) \
         RETURNING id, patient_id, provider_id, slot_id, status, created_at, deleted_at",
    )
    .bind(claims.sub)
    .bind(req.provider_id)
    .bind(req.slot_id)
    .fetch_one(&mut *tx)
    .await;

    let appointment = match inserted {
        Ok(appointment) => appointment,
        // The unique index on live slot_ids is the real guard; the is_booked
        // check above just gets the friendly message most of the time.
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            bail!("slot is already booked", StatusCode::CONFLICT)
        }
        Err(err) => return Err(err.into()),
    };

    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}
