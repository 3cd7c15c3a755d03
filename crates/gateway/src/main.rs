//! Account directory HTTP gateway.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_service_lib::config::AccountServiceConfig;
use account_service_lib::MigrateAction;
use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "Account directory HTTP API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and start the HTTP server
    Serve {
        #[arg(long, env = "GATEWAY_HOST")]
        host: Option<String>,
        #[arg(long, env = "GATEWAY_PORT")]
        port: Option<u16>,
    },
    /// Manage database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateCommand,
    },
}

#[derive(Subcommand)]
enum MigrateCommand {
    /// Apply all pending migrations
    Up,
    /// Roll back the last migration
    Down,
    /// Show applied and pending migrations
    Status,
    /// Drop all tables and re-apply every migration
    Fresh,
}

impl From<MigrateCommand> for MigrateAction {
    fn from(cmd: MigrateCommand) -> Self {
        match cmd {
            MigrateCommand::Up => MigrateAction::Up,
            MigrateCommand::Down => MigrateAction::Down,
            MigrateCommand::Status => MigrateAction::Status,
            MigrateCommand::Fresh => MigrateAction::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = GatewayConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            gateway_lib::run_server(config, AccountServiceConfig::from_env()).await?;
        }
        Commands::Migrate { action } => {
            account_service_lib::run_migrations(action.into()).await?;
        }
    }

    Ok(())
}
