use clap::Parser;
use std::path::PathBuf;

/// A TUI for booking appointments from the terminal
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// The server to talk to. Should only be the protocol and domain, e.g.
    /// `https://visita.your-domain.com`.
    #[clap(long, default_value = "http://127.0.0.1:3000")]
    pub server: String,

    /// Where should we store data?
    #[clap(long)]
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("com", "visita", "visita")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
