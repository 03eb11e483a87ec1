//! Recipe service binary.
//!
//! ```text
//! RUST_LOG=debug cargo run               # reads ./recipes.toml if present
//! cargo run -- /etc/recipes/settings     # or a settings file of your choice
//! RECIPES_PORT=8080 cargo run
//! ```

use recipes::{Error, RecipeStore, Server, Settings};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(&path)?,
        None => Settings::load()?,
    };

    let store = if settings.seed { RecipeStore::seeded() } else { RecipeStore::new() };
    info!(recipes = store.len(), seeded = settings.seed, "store ready");

    Server::bind(settings.addr()).await?
        .serve(recipes::router(store))
        .await
}
