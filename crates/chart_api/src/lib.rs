pub mod error;
pub mod handlers;
pub mod paths;
pub mod response;
pub mod router;
pub mod server;
pub mod state;

pub use error::{ApiError, Result};
pub use response::JsonPayload;
pub use router::create_router;
pub use server::{init_tracing, run_server};
pub use state::{AppState, EngineSlot};
