use std::env;
use std::sync::Arc;
use std::time::Duration;

use recipe_radar::{spawn_refresh_loop, AppConfig, RecipeService};

const USAGE: &str = "usage: recipe-radar <trending | category <key> | search <terms...> | watch>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;
    let service = RecipeService::new(&config)?;

    let mut args = env::args().skip(1);
    let command = args.next().ok_or(USAGE)?;

    if command == "watch" {
        // Run the refresh loop in the foreground until killed.
        let service = Arc::new(service);
        let handle = spawn_refresh_loop(
            Arc::clone(&service),
            Duration::from_secs(config.refresh_interval_secs),
        );
        handle.await?;
        return Ok(());
    }

    let recipes = match command.as_str() {
        "trending" => {
            service.force_refresh_trending().await;
            service.trending().await.recipes
        }
        "category" => {
            let key = args.next().ok_or("category requires a key")?;
            service.category(&key, config.link_limit).await?
        }
        "search" => {
            let query = args.collect::<Vec<_>>().join(" ");
            if query.is_empty() {
                return Err("search requires a query".into());
            }
            service.search(&query, config.link_limit).await
        }
        _ => return Err(USAGE.into()),
    };

    println!("{}", serde_json::to_string_pretty(&recipes)?);

    Ok(())
}
