use super::{ConfigStore, InstrumentedStore, load_documents};
use config::StoreSettings;
use errors::StoreError;
use std::path::Path;
use std::sync::Arc;

/// Creates the store selected by `settings.backend`.
///
/// With `instrument` set the store is wrapped in [`InstrumentedStore`].
pub async fn create_store(
    settings: &StoreSettings,
    instrument: bool
) -> Result<Arc<dyn ConfigStore>, StoreError> {
    match settings.backend.as_str() {
        "file" => {
            let path = settings
                .documents_path
                .as_deref()
                .ok_or_else(|| StoreError::Configuration {
                    message: "File store requires documents_path".into()
                })?;
            let store = load_documents(Path::new(path))?;
            Ok(wrap(store, instrument))
        }
        "mongodb" => {
            #[cfg(feature = "mongodb")]
            {
                let store = super::MongoConfigStore::connect(settings).await?;
                Ok(wrap(store, instrument))
            }
            #[cfg(not(feature = "mongodb"))]
            {
                Err(StoreError::Configuration {
                    message: "MongoDB store not enabled. Compile with --features mongodb".into()
                })
            }
        }
        other => Err(StoreError::Configuration {
            message: format!(
                "Unknown store backend: {}. Valid options: mongodb, file",
                other
            )
        })
    }
}

fn wrap<S: ConfigStore + 'static>(store: S, instrument: bool) -> Arc<dyn ConfigStore> {
    if instrument {
        Arc::new(InstrumentedStore::new(store))
    } else {
        Arc::new(store)
    }
}
