//! Shared configuration for partshop tools.
//!
//! TOML profiles layered under `PARTSHOP_*` environment variables,
//! credential resolution (env + keyring + plaintext) and translation to
//! `partshop_core::StorefrontConfig`. The CLI adds flag-aware wrappers on
//! top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use partshop_core::{DEFAULT_BASE_URL, StorefrontConfig, TlsMode, TransportConfig};

/// Environment prefix for every configuration key.
pub const ENV_PREFIX: &str = "PARTSHOP_";

/// Keyring service name for stored passwords.
const KEYRING_SERVICE: &str = "partshop";

const PASSWORD_ENV: &str = "PARTSHOP_PASSWORD";
const EMAIL_ENV: &str = "PARTSHOP_EMAIL";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
///
/// The three endpoint keys at the top level are what the environment
/// overrides (`PARTSHOP_API_URL`, `PARTSHOP_SHOP_API_BASE_URL`,
/// `PARTSHOP_AUTH_API_BASE_URL`); they win over anything in a profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Shared fallback for both endpoints.
    pub api_url: Option<String>,

    pub shop_api_base_url: Option<String>,

    pub auth_api_base_url: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            api_url: None,
            shop_api_base_url: None,
            auth_api_base_url: None,
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// A named backend profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Base URL for both shop and auth endpoints (e.g. "https://shop.example").
    pub api_url: Option<String>,

    /// Shop endpoint override.
    pub shop_api_base_url: Option<String>,

    /// Auth endpoint override.
    pub auth_api_base_url: Option<String>,

    /// Login email.
    pub email: Option<String>,

    /// Password (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,
}

impl Config {
    /// Name of the profile to use: `explicit`, else `default_profile`, else "default".
    pub fn profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
            .to_owned()
    }

    /// The named profile, or an empty one when it is not defined.
    ///
    /// An undefined profile is not an error: environment variables alone
    /// are enough to reach a backend.
    pub fn profile_or_default(&self, name: &str) -> Profile {
        self.profiles.get(name).cloned().unwrap_or_default()
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "partshop", "partshop").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("partshop");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` (which need not exist) + environment.
///
/// Nested keys use a double underscore: `PARTSHOP_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["password", "email", "profile"])
                .split("__"),
        );

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Endpoint resolution ─────────────────────────────────────────────

/// Shop and auth base URLs.
///
/// Each endpoint takes the first of: its top-level key (environment), its
/// profile key, the top-level `api_url`, the profile `api_url`, and
/// finally [`DEFAULT_BASE_URL`].
pub fn resolve_endpoints(cfg: &Config, profile: &Profile) -> Result<(Url, Url), ConfigError> {
    let fallback = cfg
        .api_url
        .as_deref()
        .or(profile.api_url.as_deref())
        .unwrap_or(DEFAULT_BASE_URL);

    let shop = cfg
        .shop_api_base_url
        .as_deref()
        .or(profile.shop_api_base_url.as_deref())
        .unwrap_or(fallback);
    let auth = cfg
        .auth_api_base_url
        .as_deref()
        .or(profile.auth_api_base_url.as_deref())
        .unwrap_or(fallback);

    Ok((
        parse_base_url("shop_api_base_url", shop)?,
        parse_base_url("auth_api_base_url", auth)?,
    ))
}

fn parse_base_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    let url: Url = raw.trim().parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Login email: the profile's, else `PARTSHOP_EMAIL`.
pub fn resolve_email(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .email
        .clone()
        .or_else(|| std::env::var(EMAIL_ENV).ok())
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve a password from env, then the system keyring, then plaintext.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_password_with(profile, profile_name, |name| {
        keyring::Entry::new(KEYRING_SERVICE, &keyring_user(name))
            .and_then(|entry| entry.get_password())
            .ok()
    })
}

/// [`resolve_password`] with a caller-supplied keyring lookup.
pub fn resolve_password_with(
    profile: &Profile,
    profile_name: &str,
    keyring_lookup: impl FnOnce(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    if let Some(pw) = keyring_lookup(profile_name) {
        return Ok(SecretString::from(pw));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store `password` for `profile_name` in the system keyring.
pub fn store_password(profile_name: &str, password: &SecretString) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))?;
    entry.set_password(password.expose_secret())?;
    Ok(())
}

fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

// ── Translation ─────────────────────────────────────────────────────

/// TLS and timeout settings, profile values overriding global defaults.
pub fn transport_config(cfg: &Config, profile: &Profile) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(cfg.defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: profile
            .timeout
            .or(cfg.defaults.timeout)
            .map(Duration::from_secs),
    }
}

/// Build a `StorefrontConfig` for one profile, with no CLI flag overrides.
pub fn profile_to_storefront_config(
    cfg: &Config,
    profile: &Profile,
) -> Result<StorefrontConfig, ConfigError> {
    let (shop_url, auth_url) = resolve_endpoints(cfg, profile)?;
    Ok(StorefrontConfig {
        shop_url,
        auth_url,
        transport: transport_config(cfg, profile),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    fn load(jail: &Jail) -> Config {
        load_config_from(&jail.directory().join("config.toml")).unwrap()
    }

    #[test]
    fn defaults_to_localhost_without_file_or_env() {
        Jail::expect_with(|jail| {
            let cfg = load(jail);
            let profile = cfg.profile_or_default(&cfg.profile_name(None));
            let (shop, auth) = resolve_endpoints(&cfg, &profile).unwrap();
            assert_eq!(shop.as_str(), "http://localhost:8080/");
            assert_eq!(auth, shop);

            let transport = transport_config(&cfg, &profile);
            assert!(matches!(transport.tls, TlsMode::System));
            assert_eq!(transport.timeout, None);
            Ok(())
        });
    }

    #[test]
    fn profile_endpoints_and_shared_fallback() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "staging"

                [profiles.staging]
                api_url = "https://staging.shop.test"
                auth_api_base_url = "https://auth.shop.test"
                timeout = 15
                "#,
            )?;
            let cfg = load(jail);
            let name = cfg.profile_name(None);
            assert_eq!(name, "staging");

            let sf = profile_to_storefront_config(&cfg, &cfg.profile_or_default(&name)).unwrap();
            assert_eq!(sf.shop_url.as_str(), "https://staging.shop.test/");
            assert_eq!(sf.auth_url.as_str(), "https://auth.shop.test/");
            assert_eq!(sf.transport.timeout, Some(Duration::from_secs(15)));
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_profile() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [profiles.default]
                shop_api_base_url = "https://file.shop.test"
                "#,
            )?;
            jail.set_env("PARTSHOP_SHOP_API_BASE_URL", "https://env.shop.test");
            jail.set_env("PARTSHOP_API_URL", "https://shared.shop.test");
            jail.set_env("PARTSHOP_DEFAULTS__TIMEOUT", "5");

            let cfg = load(jail);
            let profile = cfg.profile_or_default("default");
            let (shop, auth) = resolve_endpoints(&cfg, &profile).unwrap();
            assert_eq!(shop.as_str(), "https://env.shop.test/");
            assert_eq!(auth.as_str(), "https://shared.shop.test/");
            assert_eq!(cfg.defaults.timeout, Some(5));
            Ok(())
        });
    }

    #[test]
    fn rejects_non_http_base_url() {
        Jail::expect_with(|jail| {
            jail.set_env("PARTSHOP_API_URL", "ftp://shop.test");
            let cfg = load(jail);
            let err = resolve_endpoints(&cfg, &Profile::default()).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { .. }));
            Ok(())
        });
    }

    #[test]
    fn password_chain_order() {
        Jail::expect_with(|_jail| {
            let profile = Profile {
                password: Some("plain".into()),
                ..Profile::default()
            };

            let pw = resolve_password_with(&profile, "default", |_| None).unwrap();
            assert_eq!(pw.expose_secret(), "plain");

            let pw = resolve_password_with(&profile, "default", |name| {
                (name == "default").then(|| "from-keyring".to_owned())
            })
            .unwrap();
            assert_eq!(pw.expose_secret(), "from-keyring");

            let err = resolve_password_with(&Profile::default(), "shop", |_| None).unwrap_err();
            assert!(matches!(err, ConfigError::NoCredentials { ref profile } if profile == "shop"));
            Ok(())
        });
    }

    #[test]
    fn password_env_wins() {
        Jail::expect_with(|jail| {
            jail.set_env("PARTSHOP_PASSWORD", "from-env");
            let profile = Profile {
                password: Some("plain".into()),
                ..Profile::default()
            };
            let pw = resolve_password_with(&profile, "default", |_| Some("kr".into())).unwrap();
            assert_eq!(pw.expose_secret(), "from-env");

            // Credentials never land in the loaded config.
            let cfg = load(jail);
            assert!(cfg.profiles.is_empty());
            Ok(())
        });
    }

    #[test]
    fn insecure_and_ca_cert() {
        let mut cfg = Config::default();
        let profile = Profile {
            ca_cert: Some(PathBuf::from("/etc/shop-ca.pem")),
            ..Profile::default()
        };
        assert!(matches!(
            transport_config(&cfg, &profile).tls,
            TlsMode::CustomCa(ref p) if p == Path::new("/etc/shop-ca.pem")
        ));

        cfg.defaults.insecure = true;
        assert!(matches!(
            transport_config(&cfg, &profile).tls,
            TlsMode::DangerAcceptInvalid
        ));
    }

    #[test]
    fn saved_config_loads_back() {
        Jail::expect_with(|jail| {
            let mut cfg = Config::default();
            cfg.profiles.insert(
                "default".into(),
                Profile {
                    api_url: Some("https://shop.test".into()),
                    email: Some("owner@shop.test".into()),
                    ..Profile::default()
                },
            );
            let path = jail.directory().join("nested").join("config.toml");
            save_config_to(&cfg, &path).unwrap();

            let loaded = load_config_from(&path).unwrap();
            let profile = loaded.profile_or_default("default");
            assert_eq!(profile.email.as_deref(), Some("owner@shop.test"));
            assert_eq!(resolve_email(&profile, "default").unwrap(), "owner@shop.test");
            Ok(())
        });
    }
}
