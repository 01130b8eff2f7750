use super::ConfigStore;
use crate::document::ConfigDocument;
use async_trait::async_trait;
use errors::StoreError;
use metrics::{counter, histogram};
use std::time::{Duration, Instant};

/// Wraps a store and records lookup metrics.
///
/// - `config_store_lookups_total{store, result}`: `result` is `hit` or `miss`
/// - `config_store_lookup_errors_total{store}`
/// - `config_store_lookup_duration_seconds{store}`
pub struct InstrumentedStore<S: ConfigStore> {
    inner: S
}

impl<S: ConfigStore> InstrumentedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn record_lookup(&self, duration: Duration, result: &Result<Option<ConfigDocument>, StoreError>) {
        let store = self.inner.store_name();
        histogram!("config_store_lookup_duration_seconds", "store" => store)
            .record(duration.as_secs_f64());

        match result {
            Ok(Some(_)) => {
                counter!("config_store_lookups_total", "store" => store, "result" => "hit").increment(1);
            }
            Ok(None) => {
                counter!("config_store_lookups_total", "store" => store, "result" => "miss").increment(1);
            }
            Err(_) => {
                counter!("config_store_lookup_errors_total", "store" => store).increment(1);
            }
        }
    }
}

#[async_trait]
impl<S: ConfigStore> ConfigStore for InstrumentedStore<S> {
    async fn find_by_namespace(&self, namespace: &str) -> Result<Option<ConfigDocument>, StoreError> {
        let start = Instant::now();
        let result = self.inner.find_by_namespace(namespace).await;
        self.record_lookup(start.elapsed(), &result);
        result
    }

    async fn ensure_index(&self) -> Result<(), StoreError> {
        let result = self.inner.ensure_index().await;
        if result.is_err() {
            counter!("config_store_index_errors_total", "store" => self.inner.store_name())
                .increment(1);
        }
        result
    }

    fn store_name(&self) -> &'static str {
        self.inner.store_name()
    }
}
