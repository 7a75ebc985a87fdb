//! User Service - store maintenance and user inspection.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use domain::{PageRequest, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use user_service_lib::commands::{self, UsersAction};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User directory maintenance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Inspect stored users
    Users {
        #[command(subcommand)]
        action: UsersCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum UsersCommands {
    /// Print one page of users
    List {
        /// Zero-based page number
        #[arg(long, default_value_t = DEFAULT_PAGE_NUMBER)]
        page: u64,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u64,
    },
    /// Print every username
    Usernames,
    /// Print one user as JSON
    Show { id: Uuid },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(migrate_action).await
        }
        Commands::Users { action } => {
            let users_action = match action {
                UsersCommands::List { page, page_size } => {
                    UsersAction::List(PageRequest::new(page, page_size))
                }
                UsersCommands::Usernames => UsersAction::Usernames,
                UsersCommands::Show { id } => UsersAction::Show(id),
            };
            let config = UserServiceConfig::from_env();
            async {
                let repo = user_service_lib::connect_repository(&config).await?;
                commands::execute(&repo, users_action).await
            }
            .await
        }
    };

    if let Err(e) = result {
        tracing::error!(code = e.code(), "{}", e);
        return Err(e.into());
    }

    Ok(())
}
