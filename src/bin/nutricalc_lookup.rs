//! One-shot nutrition lookup
//!
//! Usage: nutricalc-lookup <food name> [grams] [auto|cooked|raw]
//!
//! Resolves against the configured food data directory and prints the result
//! as JSON. No latency, no history.

use nutricalc::config::AppConfig;
use nutricalc::models::Variant;
use nutricalc::nutrition::{FoodCatalog, Resolver, DEFAULT_SERVING_GRAMS};
use nutricalc::tools::lookup::validate_food_name;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(raw_name) = args.first() else {
        eprintln!("Usage: nutricalc-lookup <food name> [grams] [auto|cooked|raw]");
        std::process::exit(2);
    };

    let food_name = validate_food_name(raw_name)?;
    let serving = match args.get(1) {
        Some(s) => s.parse::<f64>().map_err(|_| format!("Invalid serving size: {}", s))?,
        None => DEFAULT_SERVING_GRAMS,
    };
    let variant = args.get(2).map(|s| Variant::from_str(s)).unwrap_or_default();

    let config = AppConfig::from_env();
    let resolver = Resolver::with_catalog(FoodCatalog::load(&config.data_dir).await);

    let result = resolver.resolve(food_name, serving, variant);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
