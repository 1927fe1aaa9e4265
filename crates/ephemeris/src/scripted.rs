//! Deterministic in-memory engine for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::engine::{Body, BodyCode, BodyPosition, CalcFlags, EngineError, EphemerisEngine, HouseCusps};

/// A call received by a [`ScriptedEngine`]
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    JulianDay { year: i32, month: u32, day: u32, ut_hour: f64 },
    Body { jd_ut: f64, code: BodyCode, flags: CalcFlags },
    Houses { jd_ut: f64, latitude: f64, longitude: f64, house_code: u8 },
}

pub type CallLog = Arc<Mutex<Vec<EngineCall>>>;

/// Engine answering from fixed tables.
///
/// Bodies without a scripted position get a synthetic one derived from their
/// code, so every known body resolves.
pub struct ScriptedEngine {
    positions: HashMap<BodyCode, BodyPosition>,
    houses: HouseCusps,
    failing_body: Option<BodyCode>,
    failing_houses: bool,
    panic_once: Option<BodyCode>,
    knows_chiron: bool,
    version: Option<String>,
    calls: CallLog,
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedEngine {
    pub fn new() -> Self {
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = 15.0 + 30.0 * i as f64;
        }
        Self {
            positions: HashMap::new(),
            houses: HouseCusps {
                cusps,
                ascendant: 15.0,
                midheaven: 285.0,
            },
            failing_body: None,
            failing_houses: false,
            panic_once: None,
            knows_chiron: true,
            version: Some("scripted-1".to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_body(mut self, body: Body, position: BodyPosition) -> Self {
        self.positions.insert(BodyCode(body.swiss_number()), position);
        self
    }

    pub fn with_houses(mut self, houses: HouseCusps) -> Self {
        self.houses = houses;
        self
    }

    pub fn failing_on(mut self, body: Body) -> Self {
        self.failing_body = Some(BodyCode(body.swiss_number()));
        self
    }

    pub fn failing_houses(mut self) -> Self {
        self.failing_houses = true;
        self
    }

    pub fn without_chiron(mut self) -> Self {
        self.knows_chiron = false;
        self
    }

    /// Panic on the first calculation of `body`; later calls answer normally.
    pub fn panicking_once_on(mut self, body: Body) -> Self {
        self.panic_once = Some(BodyCode(body.swiss_number()));
        self
    }

    /// Shared handle on the call log; clone it before moving the engine away.
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: EngineCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

/// Julian Day for a Gregorian calendar date (Meeus, ch. 7).
pub fn gregorian_julian_day(year: i32, month: u32, day: u32, ut_hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + ut_hour / 24.0
}

impl EphemerisEngine for ScriptedEngine {
    fn version(&self) -> Option<String> {
        self.version.clone()
    }

    fn body_code(&self, body: Body) -> Option<BodyCode> {
        if body == Body::Chiron && !self.knows_chiron {
            return None;
        }
        Some(BodyCode(body.swiss_number()))
    }

    fn calendar_to_julian_day(&mut self, year: i32, month: u32, day: u32, ut_hour: f64) -> f64 {
        self.record(EngineCall::JulianDay { year, month, day, ut_hour });
        gregorian_julian_day(year, month, day, ut_hour)
    }

    fn compute_body(
        &mut self,
        jd_ut: f64,
        code: BodyCode,
        flags: CalcFlags,
    ) -> Result<BodyPosition, EngineError> {
        self.record(EngineCall::Body { jd_ut, code, flags });
        if self.panic_once == Some(code) {
            self.panic_once = None;
            panic!("scripted panic for body code {}", code.0);
        }
        if self.failing_body == Some(code) {
            return Err(EngineError::BodyCalculation {
                code,
                jd_ut,
                message: "scripted failure".to_string(),
            });
        }
        Ok(self.positions.get(&code).copied().unwrap_or(BodyPosition {
            longitude: 10.0 + 33.0 * code.0 as f64,
            latitude: 0.25,
            distance: 1.0 + code.0 as f64,
            speed_longitude: 0.5,
        }))
    }

    fn compute_houses(
        &mut self,
        jd_ut: f64,
        latitude: f64,
        longitude: f64,
        house_code: u8,
    ) -> Result<HouseCusps, EngineError> {
        self.record(EngineCall::Houses { jd_ut, latitude, longitude, house_code });
        if self.failing_houses {
            return Err(EngineError::HouseCalculation {
                message: "scripted failure".to_string(),
            });
        }
        Ok(self.houses)
    }
}
