// ── Auth session operations ──

use secrecy::SecretString;
use tracing::{debug, info, warn};

use partshop_api::models::ProfileUpdate;
use partshop_api::{Error, LoginStrategy};

use super::Storefront;
use crate::model::User;

impl Storefront {
    /// Sign in with one form for both kinds of principal.
    ///
    /// Tries the customer strategy, then the owner strategy. When both fail
    /// the owner error is returned: it comes from the `allow_401` endpoint
    /// and carries the backend's credential message.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, Error> {
        let [first, second] = LoginStrategy::SEQUENCE;

        let first_err = match self.api().login(first, email, password).await {
            Ok(resp) => {
                info!(strategy = ?first, "signed in");
                return Ok(resp.into());
            }
            Err(err) => err,
        };
        debug!(strategy = ?first, status = first_err.status(), "login attempt failed");

        match self.api().login(second, email, password).await {
            Ok(resp) => {
                info!(strategy = ?second, "signed in");
                Ok(resp.into())
            }
            Err(err) => {
                debug!(strategy = ?second, status = err.status(), "login attempt failed");
                Err(err)
            }
        }
    }

    /// Create a customer account and sign it in.
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, Error> {
        let resp = self
            .api()
            .register(email, password, first_name, last_name)
            .await?;
        info!("registered customer account");
        Ok(resp.into())
    }

    /// The signed-in user, or `None` when not authenticated.
    ///
    /// A 401 here is an expected answer, not an error. Other failures
    /// propagate.
    pub async fn current_user(&self) -> Result<Option<User>, Error> {
        match self.api().profile().await {
            Ok(profile) => Ok(Some(profile.into())),
            Err(err) if err.is_unauthorized() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Sign out. The local token is cleared even if the backend call fails.
    pub async fn logout(&self) {
        if let Err(err) = self.api().logout().await {
            warn!(error = %err, "backend logout failed; clearing local session anyway");
        }
        self.session().clear();
    }

    /// Swap the current session for a fresh token.
    pub async fn refresh(&self) -> Result<User, Error> {
        Ok(self.api().refresh().await?.into())
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, Error> {
        Ok(self.api().update_profile(update).await?.into())
    }

    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), Error> {
        self.api().change_password(current, new).await
    }
}
