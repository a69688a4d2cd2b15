use std::path::PathBuf;

/// Host bound when `LISTEN_HOST` is unset.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Serving root when `SERVE_ROOT` is unset: the working directory.
pub const DEFAULT_ROOT: &str = ".";

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: String,
    pub root: PathBuf,
}

impl Config {
    /// Builds the configuration for `port`, reading `LISTEN_HOST` and
    /// `SERVE_ROOT` from the environment.
    pub fn load(port: u16) -> Self {
        let host = std::env::var("LISTEN_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let root = std::env::var("SERVE_ROOT").unwrap_or_else(|_| DEFAULT_ROOT.to_string());

        Self {
            listen_addr: format!("{}:{}", host, port),
            root: PathBuf::from(root),
        }
    }
}
