// Auth endpoints (`/api/auth/*`, always sent to the auth base URL).
//
// Login-class calls (owner login, register) use `allow_401` so a rejected
// password surfaces as `Error::InvalidCredentials` with the backend's own
// message instead of clearing a session that was never established.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::debug;

use crate::client::{ApiClient, RequestBody};
use crate::error::Error;
use crate::models::{AuthResponse, PasswordChange, ProfileResponse, ProfileUpdate, RegisterRequest};

/// The two kinds of principal the backend can log in.
///
/// Both produce the same [`AuthResponse`] shape; they differ in endpoint,
/// in the name of the identifier field, and in how a 401 is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStrategy {
    /// `POST /api/auth/login` with `{username, password}`.
    Customer,
    /// `POST /api/auth/owner/login` with `{email, password}`.
    Owner,
}

impl LoginStrategy {
    /// Order in which a single login form tries the strategies.
    pub const SEQUENCE: [Self; 2] = [Self::Customer, Self::Owner];

    pub fn path(self) -> &'static str {
        match self {
            Self::Customer => "/api/auth/login",
            Self::Owner => "/api/auth/owner/login",
        }
    }

    /// Whether a 401 from this endpoint means "wrong credentials".
    pub fn allow_401(self) -> bool {
        matches!(self, Self::Owner)
    }

    fn identifier_field(self) -> &'static str {
        match self {
            Self::Customer => "username",
            Self::Owner => "email",
        }
    }

    fn body(self, email: &str, password: &SecretString) -> Value {
        let mut body = json!({ "password": password.expose_secret() });
        body[self.identifier_field()] = Value::from(email);
        body
    }
}

impl ApiClient {
    /// Log in with one strategy. On success the returned token (if any) is
    /// stored in the session.
    pub async fn login(
        &self,
        strategy: LoginStrategy,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, Error> {
        debug!(?strategy, "logging in");
        let mut options = self.auth_options().skip_auth();
        if strategy.allow_401() {
            options = options.allow_401();
        }
        let body = RequestBody::json(&strategy.body(email, password))?;
        let resp: AuthResponse = self
            .request(Method::POST, strategy.path(), body, options)
            .await?;
        self.store_token(&resp);
        Ok(resp)
    }

    /// Create a customer account and log it in.
    ///
    /// `POST /api/auth/register`
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        first_name: &str,
        last_name: &str,
    ) -> Result<AuthResponse, Error> {
        debug!("registering customer account");
        let req = RegisterRequest::customer(email, password.expose_secret(), first_name, last_name);
        let resp: AuthResponse = self
            .request(
                Method::POST,
                "/api/auth/register",
                RequestBody::json(&req)?,
                self.auth_options().skip_auth().allow_401(),
            )
            .await?;
        self.store_token(&resp);
        Ok(resp)
    }

    /// `GET /api/auth/profile`
    pub async fn profile(&self) -> Result<ProfileResponse, Error> {
        self.request(
            Method::GET,
            "/api/auth/profile",
            RequestBody::Empty,
            self.auth_options(),
        )
        .await
    }

    /// `PUT /api/auth/profile`
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileResponse, Error> {
        debug!("updating profile");
        self.request(
            Method::PUT,
            "/api/auth/profile",
            RequestBody::json(update)?,
            self.auth_options(),
        )
        .await
    }

    /// `POST /api/auth/change-password`
    ///
    /// A wrong current password comes back as a 400 or 401 depending on the
    /// backend build; both are surfaced without clearing the session.
    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), Error> {
        debug!("changing password");
        let req = PasswordChange {
            current_password: current.expose_secret(),
            new_password: new.expose_secret(),
        };
        let _: Value = self
            .request(
                Method::POST,
                "/api/auth/change-password",
                RequestBody::json(&req)?,
                self.auth_options().allow_401(),
            )
            .await?;
        Ok(())
    }

    /// Tell the backend to end the session. Does not touch the local token.
    ///
    /// `POST /api/auth/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        let _: Value = self
            .request(
                Method::POST,
                "/api/auth/logout",
                RequestBody::Empty,
                self.auth_options(),
            )
            .await?;
        Ok(())
    }

    /// Exchange the current session for a fresh token.
    ///
    /// `POST /api/auth/refresh`
    pub async fn refresh(&self) -> Result<AuthResponse, Error> {
        debug!("refreshing session");
        let resp: AuthResponse = self
            .request(
                Method::POST,
                "/api/auth/refresh",
                RequestBody::Empty,
                self.auth_options(),
            )
            .await?;
        self.store_token(&resp);
        Ok(resp)
    }

    fn store_token(&self, resp: &AuthResponse) {
        if let Some(token) = resp.token.as_deref() {
            self.session().set_token(token);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn strategy_bodies_use_distinct_identifier_fields() {
        let pw = SecretString::from("hunter2");
        assert_eq!(
            LoginStrategy::Customer.body("a@b.c", &pw),
            json!({ "username": "a@b.c", "password": "hunter2" })
        );
        assert_eq!(
            LoginStrategy::Owner.body("a@b.c", &pw),
            json!({ "email": "a@b.c", "password": "hunter2" })
        );
    }

    #[test]
    fn only_owner_login_reads_401_as_credentials() {
        assert!(!LoginStrategy::Customer.allow_401());
        assert!(LoginStrategy::Owner.allow_401());
        assert_eq!(LoginStrategy::SEQUENCE[0], LoginStrategy::Customer);
    }
}
