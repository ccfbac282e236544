mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use partshop_core::Storefront;

use crate::cli::{Cli, ColorMode, Command};
use crate::commands::Context;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose, &cli.global.color);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, color: &ColorMode) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_ansi(output::should_color(color))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "partshop", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let ctx = build_context(&cli.global)?;
            tracing::debug!(command = ?cmd, profile = %ctx.profile_name, "dispatching command");
            commands::dispatch(cmd, &ctx, &cli.global).await
        }
    }
}

/// Resolve config, profile and flag overrides into a connected storefront.
fn build_context(global: &cli::GlobalOpts) -> Result<Context, CliError> {
    let cfg = config::load_config()?;
    let profile_name = config::active_profile_name(global, &cfg);

    if global.profile.is_some() && !cfg.profiles.contains_key(&profile_name) {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }

    let profile = cfg.profile_or_default(&profile_name);
    let storefront_config = config::resolve_storefront_config(&cfg, &profile, global)?;
    tracing::debug!(
        shop = %storefront_config.shop_url,
        auth = %storefront_config.auth_url,
        "resolved backend"
    );
    let shop = Storefront::new(&storefront_config)?;

    Ok(Context {
        shop,
        profile_name,
        profile,
    })
}
