use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "routeplan")]
#[command(about = "Delivery route planning command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write a CSV template documenting the expected import shape
    Template {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Resolve a free-text address to coordinates
    Geocode { address: String },
    /// Resolve a coordinate pair to a display address
    Reverse { latitude: f64, longitude: f64 },
    /// Print up to 5 address completions for a partial query
    Suggest { query: String },
    /// Import jobs from a CSV file and print the resulting job list
    Import {
        file: PathBuf,
        /// Replace jobs whose ids conflict instead of keeping the first
        #[arg(long)]
        replace: bool,
    },
    /// Import jobs, call the optimizer and export the optimized route
    Optimize {
        file: PathBuf,
        /// Write the route CSV to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Replace jobs whose ids conflict instead of keeping the first
        #[arg(long)]
        replace: bool,
    },
    /// Manage the persisted warehouse origin
    Warehouse {
        #[command(subcommand)]
        action: WarehouseAction,
    },
}

#[derive(Debug, Subcommand)]
enum WarehouseAction {
    /// Resolve an address and persist it as the route origin
    Set { address: String },
    /// Print the active warehouse
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = routeplan_core::load_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Template { output } => commands::template::run(output.as_deref()),
        Commands::Geocode { address } => commands::geocode::resolve(&config, &address).await,
        Commands::Reverse {
            latitude,
            longitude,
        } => commands::geocode::reverse(&config, latitude, longitude).await,
        Commands::Suggest { query } => commands::geocode::suggest(&config, &query).await,
        Commands::Import { file, replace } => commands::import::run(&config, &file, replace).await,
        Commands::Optimize {
            file,
            output,
            replace,
        } => commands::optimize::run(&config, &file, output.as_deref(), replace).await,
        Commands::Warehouse { action } => match action {
            WarehouseAction::Set { address } => commands::warehouse::set(&config, &address).await,
            WarehouseAction::Show => commands::warehouse::show(&config),
        },
    }
}
