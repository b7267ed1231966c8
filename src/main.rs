use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tableau_groups::{GroupService, TableauConf};

/// Manage the groups of a Tableau site.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML connection config
    #[arg(
        short,
        long,
        env = "TABLEAU_GROUPS_CONFIG",
        default_value = "tableau.toml"
    )]
    config: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show a single group
    Get {
        /// Group ID
        id: String,
    },
    /// List every group on the site
    List,
    /// Create a group
    Create {
        name: String,
        /// Minimum site role granted to imported members
        #[arg(long, default_value = "Unlicensed")]
        site_role: String,
    },
    /// Rename a group or change its minimum site role
    Update {
        id: String,
        name: String,
        #[arg(long, default_value = "Unlicensed")]
        site_role: String,
    },
    /// Delete a group
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let conf = TableauConf::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config))?;
    let service = GroupService::from_config(&conf).context("failed to build HTTP client")?;

    match cli.command {
        Commands::Get { id } => {
            let group = service
                .fetch_group_by_id(&id)
                .await
                .with_context(|| format!("failed to fetch group {}", id))?;
            print_json(&group)?;
        }
        Commands::List => {
            let groups = service.list_groups().await.context("failed to list groups")?;
            print_json(&groups)?;
        }
        Commands::Create { name, site_role } => {
            let group = service
                .create_group(&name, &site_role)
                .await
                .with_context(|| format!("failed to create group {}", name))?;
            print_json(&group)?;
        }
        Commands::Update {
            id,
            name,
            site_role,
        } => {
            let group = service
                .update_group(&id, &name, &site_role)
                .await
                .with_context(|| format!("failed to update group {}", id))?;
            print_json(&group)?;
        }
        Commands::Delete { id } => {
            service
                .delete_group(&id)
                .await
                .with_context(|| format!("failed to delete group {}", id))?;
            println!("Deleted group {}", id);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
