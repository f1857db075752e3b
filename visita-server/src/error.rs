use argon2::password_hash;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// An error from the API
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Something went wrong which we should log but not expose to clients.
    Internal,

    /// Some handler-specific error, shown to the client as a single message.
    Custom(StatusCode, String),

    /// Field problems, shown to the client as a list of `{ "msg": … }`
    /// objects (the shape the frontends unpack.)
    Validation(Vec<String>),
}

/// Return an error from a handler.
#[macro_export]
macro_rules! bail {
    ($message:expr) => {
        return Err($crate::error::Error::custom($message))
    };
    ($message:expr, $status:expr) => {
        return Err($crate::error::Error::custom_with_status($message, $status))
    };
}

/// `bail!` conditionally.
#[macro_export]
macro_rules! bail_if {
    ($cond:expr, $message:expr) => {
        if $cond {
            $crate::bail!($message);
        }
    };
    ($cond:expr, $message:expr, $status:expr) => {
        if $cond {
            $crate::bail!($message, $status);
        }
    };
}

impl Error {
    /// Construct a custom error
    pub fn custom(message: &str) -> Self {
        Self::custom_with_status(message, StatusCode::BAD_REQUEST)
    }

    /// Construct a custom error with a specific status code
    pub fn custom_with_status(message: &str, status: StatusCode) -> Self {
        Self::Custom(status, message.to_string())
    }

    /// Collect field problems into a 400.
    pub fn validation<I, S>(problems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation(problems.into_iter().map(Into::into).collect())
    }

    /// Unwrap a handler-specific error
    #[cfg(test)]
    pub fn unwrap_custom(self) -> (StatusCode, String) {
        match self {
            Self::Custom(status_code, message) => (status_code, message),
            other => panic!("called `Error::unwrap_custom` on {other:?}"),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(?err, "sqlx error");
        Self::Internal
    }
}

impl From<password_hash::Error> for Error {
    fn from(err: password_hash::Error) -> Self {
        tracing::error!(?err, "password hashing error");
        Self::Internal
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::error!(?err, "JWT error");
        Self::Internal
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "internal server error" })),
            )
                .into_response(),
            Self::Custom(status_code, message) => {
                (status_code, Json(json!({ "detail": message }))).into_response()
            }
            Self::Validation(problems) => {
                let detail: Vec<_> = problems
                    .into_iter()
                    .map(|msg| json!({ "msg": msg }))
                    .collect();

                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test_log::test(tokio::test)]
    async fn custom_defaults_to_bad_request() {
        let response = Error::custom("nope").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "detail": "nope" }));
    }

    #[test_log::test(tokio::test)]
    async fn custom_keeps_the_given_status() {
        let response = Error::custom_with_status("gone", StatusCode::NOT_FOUND).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test_log::test(tokio::test)]
    async fn validation_lists_each_problem() {
        let response = Error::validation(["too short", "not an email"]).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "detail": [{ "msg": "too short" }, { "msg": "not an email" }] })
        );
    }

    #[test_log::test(tokio::test)]
    async fn internal_hides_the_cause() {
        let response = Error::Internal.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "detail": "internal server error" })
        );
    }
}
