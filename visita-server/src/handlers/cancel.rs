use crate::bail;
use crate::conn::Conn;
use crate::error::Error;
use crate::jwt::Claims;
use axum::extract::Path;
use axum::{http::StatusCode, Json};
use sqlx::Acquire;
use visita_core::api::cancel::Resp;
use visita_core::Appointment;

#[tracing::instrument(skip(conn))]
pub async fn handler(
    Conn(mut conn): Conn,
    claims: Claims,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Resp>, Error> {
    let mut tx = conn.begin().await?;

    let canceled = sqlx::query_as::<_, Appointment>(
        "UPDATE appointments \
         SET status = 'canceled', deleted_at = now() \
         WHERE id = $1 AND patient_id = $2 AND deleted_at IS NULL \
         RETURNING id, patient_id, provider_id, slot_id, status, created_at, deleted_at",
    )
    .bind(appointment_id)
    .bind(claims.sub)
    .fetch_optional(&mut *tx)
    .await?;

    let appointment = match canceled {
        Some(appointment) => appointment,
        // Absent, someone else's, or already canceled: all the same 404, so
        // we don't leak other patients' bookings.
        None => bail!("no such appointment", StatusCode::NOT_FOUND),
    };

    // Give the slot back.
    sqlx::query("UPDATE availabilities SET is_booked = FALSE WHERE id = $1")
        .bind(appointment.slot_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Json(appointment))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::handlers::test::{TestAccount, TestBooking};
    use sqlx::{pool::PoolConnection, query_scalar, PgPool, Postgres};
    use visita_core::appointment::Status;
    use visita_core::Role;

    #[test_log::test(sqlx::test)]
    async fn canceling_releases_the_slot(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let booking = TestBooking::create(&mut conn).await;

        let Json(appointment) = handler(
            Conn(conn),
            booking.patient.claims(),
            Path(booking.appointment_id),
        )
        .await
        .unwrap();

        assert_eq!(appointment.status, Status::Canceled);
        assert!(appointment.deleted_at.is_some());

        let is_booked =
            query_scalar::<_, bool>("SELECT is_booked FROM availabilities WHERE id = $1")
                .bind(booking.slot_id)
                .fetch_one(&pool)
                .await
                .unwrap();

        assert!(!is_booked);
    }

    #[test_log::test(sqlx::test)]
    async fn someone_elses_appointment_reads_as_missing(mut conn: PoolConnection<Postgres>) {
        let booking = TestBooking::create(&mut conn).await;
        let rival = TestAccount::create(&mut conn, "eve@example.com", Role::Patient).await;

        let err = handler(Conn(conn), rival.claims(), Path(booking.appointment_id))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            Error::custom_with_status("no such appointment", StatusCode::NOT_FOUND)
        );
    }

    #[test_log::test(sqlx::test)]
    async fn canceling_twice_reads_as_missing(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let booking = TestBooking::create(&mut conn).await;

        handler(
            Conn(conn),
            booking.patient.claims(),
            Path(booking.appointment_id),
        )
        .await
        .unwrap();

        let conn = pool.acquire().await.unwrap();
        let err = handler(
            Conn(conn),
            booking.patient.claims(),
            Path(booking.appointment_id),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err,
            Error::custom_with_status("no such appointment", StatusCode::NOT_FOUND)
        );
    }
}
