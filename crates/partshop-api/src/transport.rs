// Shared transport configuration for building the reqwest::Client.
//
// Shop and auth endpoints may live on different hosts but share one client,
// so cookies set by the auth host ride along with shop requests.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;

use crate::error::Error;

const USER_AGENT: &str = concat!("partshop/", env!("CARGO_PKG_VERSION"));

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the bundled web-PKI roots.
    #[default]
    System,
    /// Additionally trust the CA certificate in the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (local development backends).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Whole-request timeout. `None` leaves requests to the OS network stack.
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    /// Build a `reqwest::Client` that stores and replays cookies through `jar`.
    pub fn build_client(&self, jar: Arc<Jar>) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(jar);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let pem = std::fs::read(path)?;
                builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&pem)?);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        Ok(builder.build()?)
    }
}
