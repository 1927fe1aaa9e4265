use std::path::PathBuf;
use std::sync::Arc;

use ephemeris::{EngineError, SharedEngine};
use models::ServiceSettings;

/// Engine as resolved at startup
#[derive(Clone)]
pub enum EngineSlot {
    Ready(SharedEngine),
    /// The engine could not be loaded; the string says why
    Unavailable(String),
}

impl EngineSlot {
    pub fn from_connect(result: std::result::Result<SharedEngine, EngineError>) -> Self {
        match result {
            Ok(engine) => EngineSlot::Ready(engine),
            Err(EngineError::Unavailable(details)) => EngineSlot::Unavailable(details),
            Err(other) => EngineSlot::Unavailable(other.to_string()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, EngineSlot::Ready(_))
    }
}

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub engine: EngineSlot,
    pub ephe_path: Arc<PathBuf>,
    pub settings: Arc<ServiceSettings>,
}

impl AppState {
    pub fn new(engine: EngineSlot, ephe_path: PathBuf, settings: ServiceSettings) -> Self {
        Self {
            engine,
            ephe_path: Arc::new(ephe_path),
            settings: Arc::new(settings),
        }
    }
}
