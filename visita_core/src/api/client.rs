use super::error::{self, Detail, Error};
use super::{
    add_slot, appointments, availability, book, cancel, enroll, login, me, providers, register,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// Client for the visita API
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `https://visita.your-domain.com`.
    pub server: String,

    /// Bearer token. Set by logging in; sent with every authenticated call.
    pub token: Option<String>,
}

impl Client {
    /// Construct a new client with no credentials
    pub fn new(server: String) -> Self {
        Self {
            server,
            token: None,
        }
    }

    /// True once a login has stored a token.
    pub fn logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Create an account. A duplicate email comes back as `Error::Conflict`.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn register(
        &self,
        http: &reqwest::Client,
        req: &register::Req,
    ) -> error::Result<register::Resp> {
        let url = self.url(register::PATH)?;

        Self::handle_response(http.post(url).json(req)).await
    }

    /// Trade credentials for a token. The body goes form-encoded: the login
    /// endpoint speaks the OAuth2 password flow, not JSON, and the email
    /// travels in `username`.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn login(
        &self,
        http: &reqwest::Client,
        req: &login::Req,
    ) -> error::Result<login::Resp> {
        let url = self.url(login::PATH)?;

        Self::handle_response(http.post(url).form(req)).await
    }

    /// Check that your token still works, and who it belongs to.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn me(&self, http: &reqwest::Client) -> error::Result<me::Resp> {
        let url = self.url(me::PATH)?;

        self.authenticated(|token| http.get(url).bearer_auth(token))
            .await
    }

    /// Browse the provider directory.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn providers(&self, http: &reqwest::Client) -> error::Result<providers::Resp> {
        let url = self.url(providers::PATH)?;

        Self::handle_response(http.get(url)).await
    }

    /// Create a provider profile for the logged-in account.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn enroll(
        &self,
        http: &reqwest::Client,
        req: &enroll::Req,
    ) -> error::Result<enroll::Resp> {
        let url = self.url(enroll::PATH)?;

        self.authenticated(|token| http.post(url).bearer_auth(token).json(req))
            .await
    }

    /// Browse a provider's open slots.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn availability(
        &self,
        http: &reqwest::Client,
        provider_id: i64,
    ) -> error::Result<availability::Resp> {
        let url = self.url(&availability::make_path(provider_id))?;

        Self::handle_response(http.get(url)).await
    }

    /// Offer a new slot (providers only.)
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn add_slot(
        &self,
        http: &reqwest::Client,
        req: &add_slot::Req,
    ) -> error::Result<add_slot::Resp> {
        let url = self.url(add_slot::PATH)?;

        self.authenticated(|token| http.post(url).bearer_auth(token).json(req))
            .await
    }

    /// List the appointments the server will show this account.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn appointments(&self, http: &reqwest::Client) -> error::Result<appointments::Resp> {
        let url = self.url(appointments::PATH)?;

        self.authenticated(|token| http.get(url).bearer_auth(token))
            .await
    }

    /// Book a slot.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`; a slot someone else got
    /// first comes back as `Error::Conflict`.
    pub async fn book(&self, http: &reqwest::Client, req: &book::Req) -> error::Result<book::Resp> {
        let url = self.url(book::PATH)?;

        self.authenticated(|token| http.post(url).bearer_auth(token).json(req))
            .await
    }

    /// Call off an appointment.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn cancel(
        &self,
        http: &reqwest::Client,
        appointment_id: i64,
    ) -> error::Result<cancel::Resp> {
        let url = self.url(&cancel::make_path(appointment_id))?;

        self.authenticated(|token| http.delete(url).bearer_auth(token))
            .await
    }

    /// Resolve a path against the configured server.
    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&self.server)?.join(path)
    }

    /// Run a request with the stored token, or fail fast without touching
    /// the network if there is none.
    async fn authenticated<CB, T>(&self, cb: CB) -> error::Result<T>
    where
        CB: FnOnce(&str) -> reqwest::RequestBuilder,
        T: DeserializeOwned,
    {
        match &self.token {
            Some(token) => Self::handle_response(cb(token)).await,
            None => Err(Error::Unauthorized),
        }
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx)
    /// - `Error::Validation` if the server refused the payload (400)
    /// - `Error::Unauthorized` if the token was missing or bad (401)
    /// - `Error::Conflict` if the request collides with existing state (409)
    /// - `Error::Client` for any other client error (4xx)
    /// - `Error::Server` if the server returned a server error (5xx)
    /// - `Error::Unexpected` if the server returned something else
    /// - `Error::Connection` if we never got a usable response at all
    async fn handle_response<T>(req: reqwest::RequestBuilder) -> error::Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = req.send().await?;

        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json().await?);
        }

        Err(Error::for_status(status, Self::error_detail(resp).await))
    }

    /// Pull the `detail` out of an error body, degrading gracefully when the
    /// body is missing or not a shape we know.
    async fn error_detail(resp: reqwest::Response) -> Detail {
        match resp.json::<error::ErrorResp>().await {
            Ok(body) => body.detail,
            Err(_) => Detail::unknown(),
        }
    }
}
