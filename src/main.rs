use anyhow::bail;
use clap::{Parser, Subcommand};
use configuration::Config;
use core_types::{ProductSearchRequest, ProductSearchResponse};
use database::{run_migrations, ConnectionProvider, DbRepository, PosStore};

/// The entry point for the POS backend.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Settings are read once here and passed down explicitly.
    let mut config = configuration::load_config()?;
    let _guard = web_server::telemetry::init_tracing(&config.logging)?;
    tracing::debug!(?config, "Configuration loaded.");

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Some(port) = args.port {
                config.server.port = port;
            }
            web_server::run_server(&config).await?;
        }
        Commands::Lookup(args) => handle_lookup(args, &config).await?,
        Commands::Migrate => {
            run_migrations(&ConnectionProvider::new(config.database.clone())).await?;
            tracing::info!("Migrations applied.");
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Point-of-sale backend: product lookup and checkout over HTTP.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
    /// Look a product up by code and print it as JSON.
    Lookup(LookupArgs),
    /// Apply the bundled schema migrations.
    Migrate,
}

#[derive(Parser)]
struct ServeArgs {
    /// Port to listen on. Overrides the PORT environment variable.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct LookupArgs {
    /// The product code (e.g., a JAN barcode).
    #[arg(long)]
    code: String,
}

async fn handle_lookup(args: LookupArgs, config: &Config) -> anyhow::Result<()> {
    let request = ProductSearchRequest { code: args.code };
    let Some(code) = request.normalized_code() else {
        bail!("a product code is required");
    };

    let store = DbRepository::new(ConnectionProvider::new(config.database.clone()));
    let product = store.find_product_by_code(code).await?;

    println!("{}", serde_json::to_string_pretty(&ProductSearchResponse { product })?);
    Ok(())
}
