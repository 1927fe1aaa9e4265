use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::engine::{EngineError, EphemerisEngine};

/// One engine per process, serialized behind a mutex
pub type SharedEngine = Arc<Mutex<dyn EphemerisEngine>>;

pub fn share<E: EphemerisEngine + 'static>(engine: E) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

/// Open the engine this binary was built with, reading data files from `data_path`.
#[cfg(feature = "swisseph")]
pub fn connect(data_path: &Path) -> Result<SharedEngine, EngineError> {
    let engine = crate::swiss::SwissEphemeris::new(data_path)?;
    Ok(share(engine))
}

/// Open the engine this binary was built with, reading data files from `data_path`.
#[cfg(not(feature = "swisseph"))]
pub fn connect(data_path: &Path) -> Result<SharedEngine, EngineError> {
    tracing::warn!(
        "No ephemeris engine compiled in; charts for {} will be refused",
        data_path.display()
    );
    Err(EngineError::Unavailable(
        "this build does not include the Swiss Ephemeris (enable the `swisseph` feature)".to_string(),
    ))
}
