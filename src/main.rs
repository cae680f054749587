//! Nutrition Calculator (NutriCalc)
//!
//! An MCP server for food nutrition lookup with a persisted search history.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutricalc::build_info;
use nutricalc::config::AppConfig;
use nutricalc::db::Database;
use nutricalc::history::{HistoryStore, SqliteKvStore};
use nutricalc::mcp::NutriCalcService;
use nutricalc::nutrition::{FoodCatalog, Resolver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutricalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = AppConfig::from_env();
    eprintln!("Database path: {}", config.database_path.display());
    eprintln!("Food data directory: {}", config.data_dir.display());

    let database = Database::open(&config.database_path)?;
    let history = HistoryStore::load(Arc::new(SqliteKvStore::new(database)));

    // Lookups before the catalog arrives fall back to the default profile
    let resolver = Arc::new(Resolver::new());
    {
        let resolver = resolver.clone();
        let data_dir = config.data_dir.clone();
        tokio::spawn(async move {
            let catalog = FoodCatalog::load(&data_dir).await;
            resolver.install(catalog);
        });
    }

    let service = NutriCalcService::new(
        config.database_path.clone(),
        resolver,
        history,
        config.lookup_latency,
    );

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
