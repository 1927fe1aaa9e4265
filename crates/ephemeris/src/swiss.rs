use std::path::Path;

use swisseph::swe::{calc_ut, houses_ex, julday, set_ephe_path, version};
use swisseph::{AscMc, Cusp};

use crate::engine::{Body, BodyCode, BodyPosition, CalcFlags, EngineError, EphemerisEngine, HouseCusps};

const GREGORIAN_CALENDAR: u32 = 1;
const TROPICAL_HOUSE_FLAGS: i32 = 0;

/// Swiss Ephemeris binding
pub struct SwissEphemeris;

impl SwissEphemeris {
    /// Point the library at `data_path`. The path is checked again per request
    /// by the chart core, so a missing directory is not fatal here.
    pub fn new(data_path: &Path) -> Result<Self, EngineError> {
        let path_str = data_path.to_str().ok_or_else(|| {
            EngineError::Unavailable(format!(
                "ephemeris path is not valid UTF-8: {}",
                data_path.display()
            ))
        })?;
        set_ephe_path(path_str);
        tracing::info!("Swiss Ephemeris data path set to {}", data_path.display());

        Ok(Self)
    }
}

impl EphemerisEngine for SwissEphemeris {
    fn version(&self) -> Option<String> {
        let tag = version();
        if tag.is_empty() {
            None
        } else {
            Some(tag)
        }
    }

    fn body_code(&self, body: Body) -> Option<BodyCode> {
        Some(BodyCode(body.swiss_number()))
    }

    fn calendar_to_julian_day(&mut self, year: i32, month: u32, day: u32, ut_hour: f64) -> f64 {
        julday(year, month as i32, day as i32, ut_hour, GREGORIAN_CALENDAR)
    }

    fn compute_body(
        &mut self,
        jd_ut: f64,
        code: BodyCode,
        flags: CalcFlags,
    ) -> Result<BodyPosition, EngineError> {
        let result = calc_ut(jd_ut, code.0 as u32, flags.0).map_err(|e| {
            EngineError::BodyCalculation {
                code,
                jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(BodyPosition {
            longitude: out[0],
            latitude: out[1],
            distance: out[2],
            speed_longitude: out[3],
        })
    }

    fn compute_houses(
        &mut self,
        jd_ut: f64,
        latitude: f64,
        longitude: f64,
        house_code: u8,
    ) -> Result<HouseCusps, EngineError> {
        let (c, a) = houses_ex(jd_ut, TROPICAL_HOUSE_FLAGS, latitude, longitude, house_code as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::HouseCalculation {
                message: format!(
                    "non-finite cusp for latitude {} longitude {} system {}",
                    latitude, longitude, house_code as char
                ),
            });
        }

        Ok(HouseCusps {
            cusps: values,
            ascendant: ascmc.ascendant,
            midheaven: ascmc.mc,
        })
    }
}
