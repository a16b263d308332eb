//! Armoury Engine - Main entry point.
//!
//! Loads an item catalog and prints the wargear summary of its archetypes
//! (all of them, or those named on the command line).

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use armoury_domain::ItemId;
use armoury_engine::{
    infrastructure::{
        editor::LoggingEditor,
        memory::InMemoryItemStore,
        settings::{Settings, CATALOG_PATH_VAR},
    },
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "armoury_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Armoury Engine");

    // Load configuration
    let settings = Settings::from_env();
    let catalog_path = settings
        .catalog_path
        .clone()
        .with_context(|| format!("{CATALOG_PATH_VAR} is not set"))?;

    tracing::info!(path = %catalog_path.display(), "Loading item catalog");
    let store = Arc::new(
        InMemoryItemStore::load_json(&catalog_path)
            .await
            .with_context(|| format!("failed to load {}", catalog_path.display()))?,
    );
    tracing::info!(items = store.len(), "Item catalog loaded");

    let app = App::new(
        store.clone(),
        store.clone(),
        Arc::new(LoggingEditor),
        settings,
    );

    let requested: Vec<ItemId> = std::env::args().skip(1).map(ItemId::new).collect();
    let archetypes: Vec<ItemId> = if requested.is_empty() {
        store
            .list()
            .into_iter()
            .filter(|item| item.is_archetype())
            .map(|item| item.id)
            .collect()
    } else {
        requested
    };

    for id in &archetypes {
        match app.use_cases.wargear.summarize.execute(id).await {
            Ok(summary) => println!("{}: {}", summary.archetype_name, summary.text),
            Err(e) => tracing::error!(archetype_id = %id, error = %e, "Failed to summarize wargear"),
        }
    }

    tracing::info!(archetypes = archetypes.len(), "Done");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
