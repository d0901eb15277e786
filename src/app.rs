use axum::{Router, error_handling::HandleErrorLayer};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceBuilder;

use crate::{
    adapters::{
        inbound::http::{
            middleware::{UndeleteLayer, handle_undelete_error},
            router::{AppState, create_router},
        },
        outbound::storage::InMemoryBackend,
    },
    domain::{
        models::TrashPolicy,
        value_objects::{DEFAULT_TRASH_PREFIX, TrashPrefix},
    },
    ports::storage::ObjectBackend,
};

/// Configuration for the undelete filter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UndeleteConfig {
    /// Prepended to a container name to compute its trash container
    pub trash_prefix: String,
}

impl Default for UndeleteConfig {
    fn default() -> Self {
        Self {
            trash_prefix: DEFAULT_TRASH_PREFIX.to_string(),
        }
    }
}

impl UndeleteConfig {
    pub fn new(trash_prefix: impl Into<String>) -> Self {
        Self {
            trash_prefix: trash_prefix.into(),
        }
    }

    /// Validate the configuration into a trash policy
    pub fn trash_policy(&self) -> Result<TrashPolicy, AppError> {
        let prefix =
            TrashPrefix::new(self.trash_prefix.clone()).map_err(|e| AppError::Configuration {
                message: format!("invalid trash_prefix {:?}: {}", self.trash_prefix, e),
            })?;
        Ok(TrashPolicy::new(prefix))
    }

    /// Build the filter layer for this configuration
    pub fn layer(&self) -> Result<UndeleteLayer, AppError> {
        Ok(UndeleteLayer::new(self.trash_policy()?))
    }
}

/// Build the undelete filter from paste-deploy style options.
///
/// Local options override global ones. `trash_prefix` is the only
/// recognized key; anything else is ignored.
pub fn filter_factory(
    global_conf: &HashMap<String, String>,
    local_conf: &HashMap<String, String>,
) -> Result<UndeleteLayer, AppError> {
    let merged: serde_json::Map<String, serde_json::Value> = global_conf
        .iter()
        .chain(local_conf.iter())
        .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
        .collect();

    let config: UndeleteConfig = serde_json::from_value(serde_json::Value::Object(merged))
        .map_err(|e| AppError::Configuration {
            message: e.to_string(),
        })?;

    config.layer()
}

/// Wrap the backend router for `backend` with the undelete filter.
///
/// Fatal filter errors are converted to responses by
/// [`handle_undelete_error`].
pub fn create_app(
    backend: Arc<dyn ObjectBackend>,
    config: &UndeleteConfig,
) -> Result<Router, AppError> {
    let undelete = config.layer()?;

    Ok(create_router(AppState { backend }).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_undelete_error))
            .layer(undelete),
    ))
}

/// Create an in-memory application for testing and development
pub fn create_in_memory_app(config: &UndeleteConfig) -> Result<Router, AppError> {
    create_app(Arc::new(InMemoryBackend::new()), config)
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}
