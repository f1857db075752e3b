use crate::bail_if;
use crate::conn::Conn;
use crate::error::Error;
use axum::extract::Path;
use axum::{http::StatusCode, Json};
use visita_core::api::availability::Resp;
use visita_core::Slot;

#[tracing::instrument(skip(conn))]
pub async fn handler(
    Conn(mut conn): Conn,
    Path(provider_id): Path<i64>,
) -> Result<Json<Resp>, Error> {
    // A provider that doesn't exist is a 404; one with no open time is an
    // empty list.
    let provider = sqlx::query("SELECT id FROM providers WHERE id = $1 LIMIT 1")
        .bind(provider_id)
        .fetch_optional(&mut *conn)
        .await?;

    bail_if!(provider.is_none(), "no such provider", StatusCode::NOT_FOUND);

    let slots = sqlx::query_as::<_, Slot>(
        "SELECT id, provider_id, start_time, end_time, is_booked \
         FROM availabilities \
         WHERE provider_id = $1 AND NOT is_booked AND start_time > now() \
         ORDER BY start_time",
    )
    .bind(provider_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Json(slots))
}
