//! CLI configuration: thin wrapper around `partshop_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --email, etc.).

use std::io::IsTerminal;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use partshop_config::ConfigError;
use partshop_core::{StorefrontConfig, TlsMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use partshop_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config, store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref())
}

/// Translate config + profile + global flags into a `StorefrontConfig`.
///
/// CLI flag overrides take priority over environment and profile values.
pub fn resolve_storefront_config(
    cfg: &Config,
    profile: &Profile,
    global: &GlobalOpts,
) -> Result<StorefrontConfig, CliError> {
    let mut resolved = partshop_config::profile_to_storefront_config(cfg, profile)?;

    if let Some(ref raw) = global.api_url {
        let url: Url = raw.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
        resolved.shop_url = url.clone();
        resolved.auth_url = url;
    }

    if global.insecure {
        resolved.transport.tls = TlsMode::DangerAcceptInvalid;
    }

    if let Some(secs) = global.timeout {
        resolved.transport.timeout = Some(Duration::from_secs(secs));
    }

    Ok(resolved)
}

/// Email and password for signing in.
///
/// Email: `--email`, then the profile, then `PARTSHOP_EMAIL`. Password:
/// the shared env/keyring/plaintext chain, then an interactive prompt when
/// stdin is a terminal.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<(String, SecretString), CliError> {
    let email = match global.email {
        Some(ref email) => email.clone(),
        None => partshop_config::resolve_email(profile, profile_name)?,
    };

    let password = match partshop_config::resolve_password(profile, profile_name) {
        Ok(pw) => pw,
        Err(ConfigError::NoCredentials { .. }) if std::io::stdin().is_terminal() => {
            let pw = rpassword::prompt_password(format!("Password for {email}: "))?;
            SecretString::from(pw)
        }
        Err(e) => return Err(e.into()),
    };

    Ok((email, password))
}
