use crate::conn::Conn;
use crate::error::Error;
use crate::jwt::Claims;
use axum::Json;
use visita_core::api::appointments::Resp;
use visita_core::appointment::Summary;
use visita_core::Role;

#[tracing::instrument(skip(conn))]
pub async fn handler(Conn(mut conn): Conn, claims: Claims) -> Result<Json<Resp>, Error> {
    // Providers read their day's schedule; everyone else reads their own
    // bookings. Both come back as the same display shape.
    let query = match claims.role {
        Role::Provider => {
            "SELECT av.start_time AS date, u.full_name AS patient_name \
             FROM appointments a \
             JOIN availabilities av ON av.id = a.slot_id \
             JOIN users u ON u.id = a.patient_id \
             JOIN providers p ON p.id = a.provider_id \
             WHERE p.user_id = $1 AND a.deleted_at IS NULL \
             ORDER BY av.start_time"
        }
        _ => {
            "SELECT av.start_time AS date, u.full_name AS patient_name \
             FROM appointments a \
             JOIN availabilities av ON av.id = a.slot_id \
             JOIN users u ON u.id = a.patient_id \
             WHERE a.patient_id = $1 AND a.deleted_at IS NULL \
             ORDER BY av.start_time"
        }
    };

    let appointments = sqlx::query_as::<_, Summary>(query)
        .bind(claims.sub)
        .fetch_all(&mut *conn)
        .await?;

    Ok(Json(appointments))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::handlers::test::{TestAccount, TestBooking};
    use sqlx::{pool::PoolConnection, query, Postgres};

    #[test_log::test(sqlx::test)]
    async fn patients_see_their_own_bookings(mut conn: PoolConnection<Postgres>) {
        let booking = TestBooking::create(&mut conn).await;

        let Json(appointments) = handler(Conn(conn), booking.patient.claims()).await.unwrap();

        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].patient_name, "Test Person");
    }

    #[test_log::test(sqlx::test)]
    async fn providers_see_their_schedule(mut conn: PoolConnection<Postgres>) {
        let booking = TestBooking::create(&mut conn).await;

        let Json(appointments) = handler(Conn(conn), booking.provider.account.claims())
            .await
            .unwrap();

        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].patient_name, "Test Person");
    }

    #[test_log::test(sqlx::test)]
    async fn someone_else_sees_nothing(mut conn: PoolConnection<Postgres>) {
        TestBooking::create(&mut conn).await;
        let rival = TestAccount::create(&mut conn, "eve@example.com", Role::Patient).await;

        let Json(appointments) = handler(Conn(conn), rival.claims()).await.unwrap();

        assert!(appointments.is_empty());
    }

    #[test_log::test(sqlx::test)]
    async fn a_canceled_booking_disappears(mut conn: PoolConnection<Postgres>) {
        let booking = TestBooking::create(&mut conn).await;

        query("UPDATE appointments SET deleted_at = now() WHERE id = $1")
            .bind(booking.appointment_id)
            .execute(&mut *conn)
            .await
            .unwrap();

        let Json(appointments) = handler(Conn(conn), booking.patient.claims()).await.unwrap();

        assert!(appointments.is_empty());
    }
}
