//! Natal chart core: request normalization, sign arithmetic and chart assembly
//! around an [`ephemeris::EphemerisEngine`].

pub mod assembler;
pub mod bodies;
pub mod data_dir;
pub mod error;
pub mod houses;
pub mod time;
pub mod zodiac;

pub use assembler::{assemble_chart, derive_south_node, ChartInput};
pub use bodies::{lookup_body, normalize_body_name, resolve_requested, CanonicalBody, DEFAULT_BODIES};
pub use data_dir::{verify_data_directory, DataDirectory, REQUIRED_DATA_FILES};
pub use error::{ChartError, Result};
pub use houses::{resolve_house_system, HouseSystem};
pub use time::{format_utc, fractional_ut_hour, normalize_datetime, parse_utc_datetime};
pub use zodiac::{normalize_longitude, sign_and_degree};
