use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while calling the API
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We never got a usable response: connection refused, DNS failure, a
    /// dropped socket, or a body we couldn't read. The request may or may
    /// not have reached the server.
    #[error("could not reach the server ({0})")]
    Connection(String),

    /// The server refused the payload (400) and said why.
    #[error("{0}")]
    Validation(Detail),

    /// The token is missing, expired, or wrong (401.)
    #[error("not logged in, or the session expired")]
    Unauthorized,

    /// The request collides with something that already exists (409.)
    #[error("{0}")]
    Conflict(String),

    /// Some other client-side mistake (4xx.)
    #[error("request failed: {0}")]
    Client(Detail),

    /// The server had an internal problem (5xx.) Nothing to do but retry
    /// later.
    #[error("the server had an internal problem; try again later")]
    Server,

    /// The server returned something it never should (it is not supposed to
    /// issue redirects or informational responses.)
    #[error("unexpected status from the server: {0}")]
    Unexpected(StatusCode),
}

impl Error {
    /// Classify a non-success status, attaching the server's `detail` where
    /// the variant keeps one.
    pub fn for_status(status: StatusCode, detail: Detail) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::Validation(detail),
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::CONFLICT => Self::Conflict(detail.to_string()),
            _ if status.is_client_error() => Self::Client(detail),
            _ if status.is_server_error() => Self::Server,
            _ => Self::Unexpected(status),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Connection(err.to_string())
    }
}

/// The body the server sends along with an error status.
#[derive(Debug, Deserialize)]
pub struct ErrorResp {
    /// What went wrong.
    pub detail: Detail,
}

/// `detail` comes in two shapes: one message covering the whole request, or
/// a list of per-field problems.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    /// One message covering the whole request.
    Message(String),

    /// Per-field problems.
    Problems(Vec<Problem>),
}

impl Detail {
    /// A stand-in for error responses whose body we couldn't interpret.
    pub fn unknown() -> Self {
        Self::Message("Unknown error".to_string())
    }
}

impl Display for Detail {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::Problems(problems) => {
                let mut sep = "";
                for problem in problems {
                    f.write_str(sep)?;
                    f.write_str(problem.msg())?;
                    sep = ", ";
                }

                Ok(())
            }
        }
    }
}

/// One entry in an error list. Servers send both objects and bare strings in
/// these, so we accept either.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Problem {
    /// `{ "msg": "…" }`
    Field {
        /// The message for this field.
        msg: String,
    },

    /// A bare string.
    Message(String),
}

impl Problem {
    /// The message, whichever shape it arrived in.
    pub fn msg(&self) -> &str {
        match self {
            Self::Field { msg } | Self::Message(msg) => msg,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn detail(json: &str) -> Detail {
        let resp: ErrorResp = serde_json::from_str(json).unwrap();
        resp.detail
    }

    #[test]
    fn reads_a_single_message() {
        assert_eq!(
            detail(r#"{"detail":"email already registered"}"#),
            Detail::Message("email already registered".to_string())
        );
    }

    #[test]
    fn reads_a_list_of_field_problems() {
        assert_eq!(
            detail(r#"{"detail":[{"msg":"too short"},{"msg":"not an email"}]}"#),
            Detail::Problems(vec![
                Problem::Field {
                    msg: "too short".to_string()
                },
                Problem::Field {
                    msg: "not an email".to_string()
                },
            ])
        );
    }

    #[test]
    fn reads_a_list_of_bare_strings() {
        assert_eq!(
            detail(r#"{"detail":["too short"]}"#),
            Detail::Problems(vec![Problem::Message("too short".to_string())])
        );
    }

    #[test]
    fn displays_problems_joined_with_commas() {
        let detail = detail(r#"{"detail":[{"msg":"too short"},"not an email"]}"#);

        assert_eq!(detail.to_string(), "too short, not an email");
    }

    fn message(text: &str) -> Detail {
        Detail::Message(text.to_string())
    }

    #[test]
    fn a_bad_request_is_a_validation_error() {
        assert_eq!(
            Error::for_status(StatusCode::BAD_REQUEST, message("too short")),
            Error::Validation(message("too short"))
        );
    }

    #[test]
    fn unauthorized_drops_the_detail() {
        assert_eq!(
            Error::for_status(StatusCode::UNAUTHORIZED, message("who are you?")),
            Error::Unauthorized
        );
    }

    #[test]
    fn a_conflict_keeps_the_message() {
        assert_eq!(
            Error::for_status(StatusCode::CONFLICT, message("email taken")),
            Error::Conflict("email taken".to_string())
        );
    }

    #[test]
    fn other_client_errors_keep_the_detail() {
        assert_eq!(
            Error::for_status(StatusCode::NOT_FOUND, message("no such slot")),
            Error::Client(message("no such slot"))
        );
    }

    #[test]
    fn all_server_errors_look_alike() {
        assert_eq!(
            Error::for_status(StatusCode::INTERNAL_SERVER_ERROR, Detail::unknown()),
            Error::Server
        );
        assert_eq!(
            Error::for_status(StatusCode::BAD_GATEWAY, Detail::unknown()),
            Error::Server
        );
    }

    #[test]
    fn redirects_are_unexpected() {
        assert_eq!(
            Error::for_status(StatusCode::FOUND, Detail::unknown()),
            Error::Unexpected(StatusCode::FOUND)
        );
    }
}
