use crate::conn::Conn;
use crate::error::Error;
use axum::Json;
use visita_core::api::providers::Resp;
use visita_core::Provider;

#[tracing::instrument(skip(conn))]
pub async fn handler(Conn(mut conn): Conn) -> Result<Json<Resp>, Error> {
    let providers = sqlx::query_as::<_, Provider>(
        "SELECT id, user_id, specialty, bio, clinic_address FROM providers ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(Json(providers))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::handlers::test::TestProvider;
    use sqlx::{pool::PoolConnection, Postgres};

    #[test_log::test(sqlx::test)]
    async fn an_empty_directory_is_an_empty_list(conn: PoolConnection<Postgres>) {
        let Json(providers) = handler(Conn(conn)).await.unwrap();

        assert!(providers.is_empty());
    }

    #[test_log::test(sqlx::test)]
    async fn lists_enrolled_providers(mut conn: PoolConnection<Postgres>) {
        let provider = TestProvider::create(&mut conn).await;

        let Json(providers) = handler(Conn(conn)).await.unwrap();

        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].id, provider.provider_id);
        assert_eq!(providers[0].user_id, provider.account.id);
        assert_eq!(providers[0].specialty, "cardiology");
    }
}
