use crate::conn::Conn;
use crate::error::Error;
use crate::jwt::Claims;
use axum::http::StatusCode;
use axum::Json;
use visita_core::api::me::Resp;
use visita_core::User;

#[tracing::instrument(skip(conn))]
pub async fn handler(Conn(mut conn): Conn, claims: Claims) -> Result<Json<Resp>, Error> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, full_name, role, is_active, is_superuser, is_verified \
         FROM users WHERE id = $1 LIMIT 1",
    )
    .bind(claims.sub)
    .fetch_optional(&mut *conn)
    .await?;

    match user {
        Some(user) => Ok(Json(user)),
        // The token outlived the account.
        None => Err(Error::custom_with_status(
            "invalid authentication credentials",
            StatusCode::UNAUTHORIZED,
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::handlers::test::TestAccount;
    use sqlx::{pool::PoolConnection, Postgres};
    use visita_core::Role;

    #[test_log::test(sqlx::test)]
    async fn returns_the_calling_account(mut conn: PoolConnection<Postgres>) {
        let account = TestAccount::create(&mut conn, "ada@example.com", Role::Patient).await;

        let Json(user) = handler(Conn(conn), account.claims()).await.unwrap();

        assert_eq!(user.id, account.id);
        assert_eq!(user.email, account.email);
        assert_eq!(user.role, Role::Patient);
    }

    #[test_log::test(sqlx::test)]
    async fn a_token_that_outlived_its_account_is_unauthorized(
        mut conn: PoolConnection<Postgres>,
    ) {
        let account = TestAccount::create(&mut conn, "ada@example.com", Role::Patient).await;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(account.id)
            .execute(&mut *conn)
            .await
            .unwrap();

        let err = handler(Conn(conn), account.claims()).await.unwrap_err();

        assert_eq!(
            err,
            Error::custom_with_status(
                "invalid authentication credentials",
                StatusCode::UNAUTHORIZED
            )
        );
    }
}
