// ── Storefront facade ──
//
// The one entry point consumers hold. Wraps the raw `ApiClient` and exposes
// domain-level operations grouped by audience: public catalog, auth
// session, checkout, customer account and owner admin. Each group lives in
// its own file as a further `impl Storefront` block.

mod account;
mod admin;
mod auth;
mod catalog;
mod checkout;

use std::sync::Arc;

use secrecy::SecretString;

use partshop_api::{ApiClient, Error, Session};

use crate::config::StorefrontConfig;
use crate::sequence::RequestSequencer;

pub use admin::{AdminOrderPage, Paged};

/// Domain-level client for one storefront backend.
///
/// Cheaply cloneable; clones share the HTTP client, cookie jar, session
/// token and request sequencer.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    api: ApiClient,
    sequencer: RequestSequencer,
}

impl Storefront {
    /// Build a storefront client with a fresh, unauthenticated session.
    pub fn new(config: &StorefrontConfig) -> Result<Self, Error> {
        let api = ApiClient::new(
            config.shop_url.clone(),
            config.auth_url.clone(),
            &config.transport,
        )?;
        Ok(Self::from_client(api))
    }

    /// Build a storefront client that shares an existing session.
    pub fn with_session(config: &StorefrontConfig, session: Arc<Session>) -> Result<Self, Error> {
        let api = ApiClient::with_session(
            config.shop_url.clone(),
            config.auth_url.clone(),
            &config.transport,
            session,
        )?;
        Ok(Self::from_client(api))
    }

    /// Wrap a pre-built [`ApiClient`].
    pub fn from_client(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(StorefrontInner {
                api,
                sequencer: RequestSequencer::new(),
            }),
        }
    }

    /// Raw wire-level client, for calls this facade does not cover.
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn session(&self) -> &Arc<Session> {
        self.inner.api.session()
    }

    /// Current bearer token, if any.
    pub fn access_token(&self) -> Option<Arc<SecretString>> {
        self.session().access_token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Shared stale-response guard for UI query slots.
    pub fn sequencer(&self) -> &RequestSequencer {
        &self.inner.sequencer
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("shop_url", &self.inner.api.shop_base().as_str())
            .field("auth_url", &self.inner.api.auth_base().as_str())
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
