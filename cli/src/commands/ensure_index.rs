use anyhow::{Context, Result};
use config::Settings;
use resolver::create_store;

use crate::output;

pub async fn run(settings: &Settings, json: bool) -> Result<()> {
    let store = create_store(&settings.store, settings.observability.metrics_enabled)
        .await
        .context("Failed to open configuration store")?;

    store
        .ensure_index()
        .await
        .with_context(|| format!("Failed to create index on {}", settings.store.key_field))?;

    if json {
        let output = serde_json::json!({
            "store": store.store_name(),
            "key_field": settings.store.key_field,
            "unique": true
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::success(&format!(
        "Unique index on {} ready ({} store)",
        settings.store.key_field,
        store.store_name()
    ));
    Ok(())
}
