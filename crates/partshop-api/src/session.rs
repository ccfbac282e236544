// In-memory bearer token store.
//
// The token is never persisted. It is written by login/register/refresh,
// read on every outgoing request, and cleared by logout or any 401 that is
// not an `allow_401` call. Each `Session` is independent, so tests (or
// multiple storefront connections) never share auth state by accident.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;
use tracing::trace;

/// Process-local holder for the bearer token.
///
/// Reads are lock-free. A request already in flight when the token changes
/// keeps whatever value it read; the backend's 401 on such a stale request
/// clears the token again.
#[derive(Debug, Default)]
pub struct Session {
    token: ArcSwapOption<SecretString>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bearer token, if authenticated.
    pub fn access_token(&self) -> Option<Arc<SecretString>> {
        self.token.load_full()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.load().is_some()
    }

    /// Store a freshly issued token. Blank tokens clear the session instead.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        if token.trim().is_empty() {
            self.clear();
            return;
        }
        trace!("storing bearer token");
        self.token.store(Some(Arc::new(SecretString::from(token))));
    }

    pub fn clear(&self) {
        if self.token.swap(None).is_some() {
            trace!("bearer token cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn starts_unauthenticated() {
        let session = Session::new();
        assert!(session.access_token().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn set_and_clear() {
        let session = Session::new();
        session.set_token("abc");
        assert!(session.is_authenticated());
        assert_eq!(
            session.access_token().map(|t| t.expose_secret().to_owned()),
            Some("abc".to_owned())
        );

        session.clear();
        assert!(session.access_token().is_none());
    }

    #[test]
    fn blank_token_clears() {
        let session = Session::new();
        session.set_token("abc");
        session.set_token("  ");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn sessions_are_isolated() {
        let a = Session::new();
        let b = Session::new();
        a.set_token("only-a");
        assert!(a.is_authenticated());
        assert!(!b.is_authenticated());
    }
}
