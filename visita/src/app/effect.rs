use super::Action;
use crate::config::Config;
use tokio::{fs, io};
use visita_core::api::{login, register, Client};

/// Connections to external services that effects use. We keep these around to
/// have some level of connection sharing for the app as a whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,
}

impl EffectContext {
    /// Get a new `EffectContext`
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Load client auth from disk
    LoadAuth,

    /// Save client auth to disk
    SaveAuth(Client),

    /// Register a new account on the server
    Register(Client, register::Req),

    /// Log in to an existing account
    LogIn(Client, login::Req),

    /// Fetch the schedule from the server
    FetchAppointments(Client),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, conn: &EffectContext, config: &Config) -> Option<Action> {
        match self.run_inner(conn, config).await {
            Ok(action) => action,
            Err(problem) => {
                tracing::error!(?problem, "problem running effect");
                Some(Action::Problem(problem.to_string()))
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to make
    /// it more ergonomic to write.
    async fn run_inner(
        self,
        conn: &EffectContext,
        config: &Config,
    ) -> Result<Option<Action>, Problem> {
        match self {
            Self::LoadAuth => {
                tracing::debug!("loading client auth");

                let store = config.data_dir().join("auth.json");

                let client = match fs::read(&store).await {
                    Ok(data) => serde_json::from_slice(&data)?,
                    Err(err) if err.kind() == io::ErrorKind::NotFound => {
                        Client::new(config.server.clone())
                    }
                    Err(err) => return Err(err.into()),
                };

                Ok(Some(Action::LoadedAuth(client)))
            }

            Self::SaveAuth(client) => {
                tracing::info!("saving client auth");

                let base = config.data_dir();
                fs::create_dir_all(&base).await?;

                let store = base.join("auth.json");

                let data = serde_json::to_vec(&client)?;
                fs::write(&store, &data).await?;

                Ok(Some(Action::SavedAuth))
            }

            Self::Register(client, req) => {
                tracing::info!("registering");

                let resp = client.register(&conn.http, &req).await;

                Ok(Some(Action::Registered(resp)))
            }

            Self::LogIn(mut client, req) => {
                tracing::info!("logging in");

                let resp = client.login(&conn.http, &req).await;

                let resp = resp.map(|resp| {
                    client.token = Some(resp.access_token);
                    client
                });

                Ok(Some(Action::LoggedIn(resp)))
            }

            Self::FetchAppointments(client) => {
                tracing::info!("fetching appointments");

                let resp = client.appointments(&conn.http).await;

                Ok(Some(Action::GotAppointments(resp)))
            }
        }
    }
}

/// Problems that can happen while running an `Effect`.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We had a problem reading or writing disk, for example with permissions
    /// or missing directories.
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// We had a problem loading or saving JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
