// ── Runtime connection configuration ──
//
// Describes *where* the backend lives and how to reach it. Built by the
// config crate or by hand; core never reads config files or env vars.

use partshop_api::TransportConfig;
use url::Url;

/// Host used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection settings for one storefront backend.
///
/// Shop and auth endpoints are configured independently because the auth
/// service may run on its own host.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub shop_url: Url,
    pub auth_url: Url,
    pub transport: TransportConfig,
}

impl StorefrontConfig {
    /// Both endpoints on the same host.
    pub fn single_host(url: Url) -> Self {
        Self {
            shop_url: url.clone(),
            auth_url: url,
            transport: TransportConfig::default(),
        }
    }
}
