//! AstroDodge - near-earth object tracker.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppResult, Profile};
use web_lib::constants::{DEFAULT_PROFILE, ENV_PROFILE, ENV_SERVER_HOST, ENV_SERVER_PORT};
use web_lib::{AppConfig, Application};

#[derive(Parser)]
#[command(name = "astrododge")]
#[command(about = "AstroDodge web server")]
struct Cli {
    /// Configuration profile: docker, staging or testing
    #[arg(long, env = ENV_PROFILE, default_value = DEFAULT_PROFILE)]
    profile: String,

    /// Override the bind host
    #[arg(long, env = ENV_SERVER_HOST)]
    host: Option<String>,

    /// Override the bind port
    #[arg(long, env = ENV_SERVER_PORT)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = match assemble(&cli).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = app.serve().await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn assemble(cli: &Cli) -> AppResult<Application> {
    let profile: Profile = cli.profile.parse()?;
    let mut config = AppConfig::for_profile(profile)?;

    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    Application::from_config(config).await
}
