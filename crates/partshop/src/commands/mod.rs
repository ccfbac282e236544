//! Command dispatch.
//!
//! Catalog commands run anonymously. Everything under `orders`,
//! `addresses`, `admin` and `whoami` signs in first with the resolved
//! profile credentials.

pub mod addresses;
pub mod admin;
pub mod catalog;
pub mod config_cmd;
pub mod orders;
pub mod util;

use tracing::debug;

use partshop_core::{Storefront, User};

use crate::cli::{Command, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;

/// A connected storefront plus the profile it was built from.
pub struct Context {
    pub shop: Storefront,
    pub profile_name: String,
    pub profile: Profile,
}

impl Context {
    /// Sign in with the resolved credentials.
    pub async fn sign_in(&self, global: &GlobalOpts) -> Result<User, CliError> {
        let (email, password) =
            config::resolve_credentials(&self.profile, &self.profile_name, global)?;
        debug!(profile = %self.profile_name, "signing in");
        self.shop
            .login(&email, &password)
            .await
            .map_err(|err| match CliError::from(err) {
                CliError::AuthFailed { message, .. } => CliError::AuthFailed {
                    message,
                    profile: self.profile_name.clone(),
                },
                other => other,
            })
    }

    /// Sign in, then ask the backend who the session belongs to.
    pub async fn current_user(&self, global: &GlobalOpts) -> Result<User, CliError> {
        self.sign_in(global).await?;
        let user = self.shop.current_user().await?;
        require_session(user, &self.profile_name)
    }
}

/// A freshly issued session the profile endpoint rejects is an auth failure.
fn require_session(user: Option<User>, profile: &str) -> Result<User, CliError> {
    user.ok_or_else(|| CliError::AuthFailed {
        message: "session not accepted by the backend".into(),
        profile: profile.to_owned(),
    })
}

pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => catalog::handle_products(&ctx.shop, args, global).await,
        Command::Categories(args) => catalog::handle_categories(&ctx.shop, args, global).await,
        Command::Brands { root_category } => {
            catalog::handle_brands(&ctx.shop, root_category, global).await
        }
        Command::Whoami => {
            let user = ctx.current_user(global).await?;
            let out = crate::output::render_single(
                &global.output,
                &user,
                |u| {
                    crate::output::detail_lines(&[
                        ("Name", u.name.clone()),
                        ("Email", u.email.clone()),
                        ("Role", u.role.to_string()),
                        ("Phone", u.phone.clone().unwrap_or_default()),
                    ])
                },
                |u| u.email.clone(),
            );
            crate::output::print_output(&out, global.quiet);
            Ok(())
        }
        Command::Orders(args) => {
            ctx.sign_in(global).await?;
            orders::handle(&ctx.shop, args, global).await
        }
        Command::Addresses(args) => {
            ctx.sign_in(global).await?;
            addresses::handle(&ctx.shop, args, global).await
        }
        Command::Admin(args) => {
            let user = ctx.sign_in(global).await?;
            if !user.role.is_owner() {
                return Err(CliError::Forbidden);
            }
            admin::handle(&ctx.shop, args, global).await
        }
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
