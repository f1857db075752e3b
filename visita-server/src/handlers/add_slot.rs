use crate::conn::Conn;
use crate::error::Error;
use crate::jwt::Claims;
use crate::{bail, bail_if};
use axum::{http::StatusCode, Json};
use visita_core::api::add_slot::{Req, Resp};
use visita_core::{Role, Slot};

#[tracing::instrument(skip(conn))]
pub async fn handler(
    Conn(mut conn): Conn,
    claims: Claims,
    Json(req): Json<Req>,
) -> Result<(StatusCode, Json<Resp>), Error> {
    bail_if!(
        claims.role != Role::Provider,
        "only accounts with the provider role can offer slots",
        StatusCode::FORBIDDEN
    );

    bail_if!(
        req.start_time >= req.end_time,
        "a slot must end after it starts"
    );

    let provider_id =
        sqlx::query_scalar::<_, i64>("SELECT id FROM providers WHERE user_id = $1 LIMIT 1")
            .bind(claims.sub)
            .fetch_optional(&mut *conn)
            .await?;

    let provider_id = match provider_id {
        Some(id) => id,
        None => bail!("create a provider profile before offering slots"),
    };

    let slot = sqlx::query_as::<_, Slot>(
        "INSERT INTO availabilities (provider_id, start_time, end_time) \
         VALUES ($1, $2, $3) \
         RETURNING id, provider_id, start_time, end_time, is_booked",
    )
    .bind(provider_id)
    .bind(req.start_time)
    .bind(req.end_time)
    .fetch_one(&mut *conn)
    .await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::handlers::test::{TestAccount, TestProvider};
    use chrono::{Duration, Utc};
    use sqlx::{pool::PoolConnection, Postgres};

    fn tomorrow(length: Duration) -> Json<Req> {
        let start = Utc::now() + Duration::days(1);

        Json(Req {
            start_time: start,
            end_time: start + length,
        })
    }

    #[test_log::test(sqlx::test)]
    async fn a_provider_offers_a_slot(mut conn: PoolConnection<Postgres>) {
        let provider = TestProvider::create(&mut conn).await;

        let (status, Json(slot)) = handler(
            Conn(conn),
            provider.account.claims(),
            tomorrow(Duration::hours(1)),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(slot.provider_id, provider.provider_id);
        assert!(!slot.is_booked);
    }

    #[test_log::test(sqlx::test)]
    async fn a_profile_is_required_first(mut conn: PoolConnection<Postgres>) {
        let account = TestAccount::create(&mut conn, "doc@example.com", Role::Provider).await;

        let err = handler(Conn(conn), account.claims(), tomorrow(Duration::hours(1)))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            Error::custom("create a provider profile before offering slots")
        );
    }

    #[test_log::test(sqlx::test)]
    async fn a_slot_must_end_after_it_starts(mut conn: PoolConnection<Postgres>) {
        let provider = TestProvider::create(&mut conn).await;

        let err = handler(
            Conn(conn),
            provider.account.claims(),
            tomorrow(Duration::zero()),
        )
        .await
        .unwrap_err();

        assert_eq!(err, Error::custom("a slot must end after it starts"));
    }
}
