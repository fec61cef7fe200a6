//! Advertised model registry.
//!
//! The registry is built once at startup from configuration and never mutated
//! afterwards. It is shared read-only through `AppState`, so no synchronization
//! is needed.

use crate::api::models::ModelInfo;
use crate::core::config::AppConfig;

/// Creation timestamp advertised for all registry entries.
///
/// The contract requires a `created` field per model; the shim has no real
/// creation time, so a fixed epoch-second value keeps GET /models idempotent.
const MODEL_CREATED: i64 = 1677610602;

/// Immutable, process-wide list of advertised models.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelInfo>,
}

impl ModelRegistry {
    /// Build the registry from the configured model ids.
    ///
    /// Order follows the configuration and stays stable for the process lifetime.
    pub fn from_config(config: &AppConfig) -> Self {
        let models = config
            .models
            .iter()
            .map(|id| ModelInfo {
                id: id.clone(),
                object: "model".to_string(),
                created: MODEL_CREATED,
                owned_by: "chat-shim".to_string(),
                permission: vec![],
            })
            .collect();

        Self { models }
    }

    /// All advertised models, in stable order.
    pub fn list(&self) -> &[ModelInfo] {
        &self.models
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ServerConfig;

    fn test_config(models: Vec<String>) -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            backend_url: "http://localhost:9000/generate".to_string(),
            backend_timeout_secs: 30,
            models,
            stream_chunk_delay_ms: 0,
        }
    }

    #[test]
    fn test_registry_preserves_order() {
        let config = test_config(vec!["model-b".to_string(), "model-a".to_string()]);
        let registry = ModelRegistry::from_config(&config);

        let ids: Vec<&str> = registry.list().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["model-b", "model-a"]);
    }

    #[test]
    fn test_registry_entry_shape() {
        let config = test_config(vec!["mock-gpt-model".to_string()]);
        let registry = ModelRegistry::from_config(&config);

        let model = &registry.list()[0];
        assert_eq!(model.object, "model");
        assert_eq!(model.created, MODEL_CREATED);
        assert!(model.permission.is_empty());
    }

    #[test]
    fn test_registry_is_stable_across_calls() {
        let config = test_config(vec!["m1".to_string(), "m2".to_string()]);
        let registry = ModelRegistry::from_config(&config);

        let first: Vec<String> = registry.list().iter().map(|m| m.id.clone()).collect();
        let second: Vec<String> = registry.list().iter().map(|m| m.id.clone()).collect();
        assert_eq!(first, second);
    }
}
