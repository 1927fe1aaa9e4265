use std::fmt;
use std::ops::BitOr;

use thiserror::Error;

/// Errors raised by an ephemeris engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Ephemeris engine is not available: {0}")]
    Unavailable(String),
    #[error("Failed to calculate position for body {code} at JD {jd_ut}: {message}")]
    BodyCalculation {
        code: BodyCode,
        jd_ut: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculation { message: String },
}

/// Bodies the chart core can ask an engine about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    MeanNode,
}

impl Body {
    /// Body number in the Swiss Ephemeris numbering scheme.
    pub const fn swiss_number(self) -> i32 {
        match self {
            Body::Sun => 0,
            Body::Moon => 1,
            Body::Mercury => 2,
            Body::Venus => 3,
            Body::Mars => 4,
            Body::Jupiter => 5,
            Body::Saturn => 6,
            Body::Uranus => 7,
            Body::Neptune => 8,
            Body::Pluto => 9,
            Body::MeanNode => 10,
            Body::Chiron => 15,
        }
    }
}

/// Engine-specific body identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyCode(pub i32);

impl fmt::Display for BodyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calculation flags handed to `compute_body`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalcFlags(pub u32);

impl CalcFlags {
    pub const SWISS_EPHEMERIS: CalcFlags = CalcFlags(2);
    pub const SPEED: CalcFlags = CalcFlags(256);

    pub fn contains(self, other: CalcFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CalcFlags {
    type Output = CalcFlags;

    fn bitor(self, rhs: CalcFlags) -> CalcFlags {
        CalcFlags(self.0 | rhs.0)
    }
}

/// Raw body position as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees, not necessarily normalized
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    /// Distance in engine units (AU for planets)
    pub distance: f64,
    /// Speed in longitude, degrees per day
    pub speed_longitude: f64,
}

/// House cusps and the two chart angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseCusps {
    /// Cusp longitudes for houses 1..12
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

/// Capability interface over an ephemeris engine.
///
/// Engines are not assumed to be reentrant, so every call takes `&mut self`;
/// share one across threads through [`crate::SharedEngine`].
pub trait EphemerisEngine: Send {
    /// Version tag of the underlying library, when it reports one.
    fn version(&self) -> Option<String>;

    /// Engine code for `body`, or `None` when the engine does not know it.
    fn body_code(&self, body: Body) -> Option<BodyCode>;

    fn calendar_to_julian_day(&mut self, year: i32, month: u32, day: u32, ut_hour: f64) -> f64;

    fn compute_body(
        &mut self,
        jd_ut: f64,
        code: BodyCode,
        flags: CalcFlags,
    ) -> Result<BodyPosition, EngineError>;

    fn compute_houses(
        &mut self,
        jd_ut: f64,
        latitude: f64,
        longitude: f64,
        house_code: u8,
    ) -> Result<HouseCusps, EngineError>;
}
