//! Config subcommand handlers.

use dialoguer::{Input, Select};
use secrecy::SecretString;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    let mut out = cfg.clone();
    for profile in out.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("****".into());
        }
    }
    out
}

fn format_config(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("error: cannot render config: {e}"))
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    let path = config::save_config(cfg)?;
    tracing::debug!(path = %path.display(), "config saved");
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

fn prompt_password(label: &str) -> Result<SecretString, CliError> {
    let secret = rpassword::prompt_password(label).map_err(prompt_err)?;
    if secret.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(secret))
}

/// Store a password in the keyring, or hand it back for the config file.
///
/// Returns `Some(password)` if the user chose plaintext.
fn prompt_password_storage(
    profile_name: &str,
    password: &SecretString,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        config::store_password(profile_name, password)?;
        eprintln!("   ✓ Password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(secrecy::ExposeSecret::expose_secret(password).to_owned()))
    }
}

fn parse_flag<T: std::str::FromStr>(key: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.trim().parse().map_err(|_| CliError::Validation {
        field: key.into(),
        reason: format!("must be {expected}"),
    })
}

/// Apply one `config set` key to a profile.
fn apply_setting(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "api_url" | "api-url" => profile.api_url = Some(value),
        "shop_api_base_url" | "shop-api-base-url" => profile.shop_api_base_url = Some(value),
        "auth_api_base_url" | "auth-api-base-url" => profile.auth_api_base_url = Some(value),
        "email" => profile.email = Some(value),
        "insecure" => profile.insecure = Some(parse_flag(key, &value, "'true' or 'false'")?),
        "timeout" => profile.timeout = Some(parse_flag(key, &value, "a number (seconds)")?),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: api_url, shop_api_base_url, \
                     auth_api_base_url, email, insecure, timeout, ca_cert"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config, |c| {
                c.profile_name(global.profile.as_deref())
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            apply_setting(profile, &key, value)?;
            save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.profile_name(None);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: partshop config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if *name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name: profile_name,
                });
            }
            let password = prompt_password("Password: ")?;
            config::store_password(&profile_name, &password)?;
            eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

/// Interactive first-run wizard.
fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("partshop configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let api_url: String = Input::new()
        .with_prompt("Backend URL")
        .default(partshop_core::DEFAULT_BASE_URL.into())
        .interact_text()
        .map_err(prompt_err)?;

    let email: String = Input::new()
        .with_prompt("Email (leave empty for anonymous browsing)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let (email, password) = if email.trim().is_empty() {
        (None, None)
    } else {
        let password = prompt_password("Password: ")?;
        let stored = prompt_password_storage(&profile_name, &password)?;
        (Some(email.trim().to_owned()), stored)
    };

    let mut cfg = config::load_config_or_default();
    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            api_url: Some(api_url),
            email,
            password,
            ..Profile::default()
        },
    );
    cfg.default_profile = Some(profile_name.clone());
    save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: partshop whoami");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn show_masks_plaintext_passwords() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "shop".into(),
            Profile {
                email: Some("owner@shop.test".into()),
                password: Some("hunter2".into()),
                ..Profile::default()
            },
        );
        let text = format_config(&redacted(&cfg));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("****"));
        assert!(text.contains("owner@shop.test"));
    }

    #[test]
    fn set_parses_typed_keys() {
        let mut profile = Profile::default();
        apply_setting(&mut profile, "timeout", "15".into()).unwrap();
        apply_setting(&mut profile, "insecure", "true".into()).unwrap();
        apply_setting(&mut profile, "api-url", "https://shop.test".into()).unwrap();
        assert_eq!(profile.timeout, Some(15));
        assert_eq!(profile.insecure, Some(true));
        assert_eq!(profile.api_url.as_deref(), Some("https://shop.test"));

        assert!(apply_setting(&mut profile, "timeout", "soon".into()).is_err());
        assert!(apply_setting(&mut profile, "site", "x".into()).is_err());
    }
}
