use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use ephemeris::{BodyPosition, CalcFlags, EphemerisEngine};
use models::{AnglePlacement, BodyPlacement, ChartMeta, ChartRequest, ChartResponse, HouseData, PlanetTable};

use crate::bodies::{resolve_requested, CanonicalBody};
use crate::error::Result;
use crate::houses::resolve_house_system;
use crate::time::{format_utc, fractional_ut_hour};
use crate::zodiac::{normalize_longitude, sign_and_degree};

/// Everything the assembler needs besides the engine
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub request: &'a ChartRequest,
    /// Already-validated timestamp
    pub utc: DateTime<Utc>,
    pub ephe_path: &'a Path,
}

/// Build the chart for one request.
///
/// Calls the engine once per resolvable body and once for houses when both
/// coordinates are present. Any engine failure aborts the whole chart.
pub fn assemble_chart(engine: &mut dyn EphemerisEngine, input: &ChartInput<'_>) -> Result<ChartResponse> {
    let utc = input.utc;
    let jd_ut = engine.calendar_to_julian_day(utc.year(), utc.month(), utc.day(), fractional_ut_hour(&utc));
    let flags = CalcFlags::SWISS_EPHEMERIS | CalcFlags::SPEED;

    let requested = input.request.requested_names();
    let mut planets = PlanetTable::new();
    for body in resolve_requested(requested.as_deref()) {
        let Some(engine_body) = body.engine_body() else {
            continue;
        };
        let Some(code) = engine.body_code(engine_body) else {
            tracing::debug!("Engine has no code for {}; omitted", body.name());
            continue;
        };
        let position = engine.compute_body(jd_ut, code, flags)?;
        planets.insert(body.name().to_string(), placement_from(&position));
    }

    let north = CanonicalBody::NorthNode.name();
    let south = CanonicalBody::SouthNode.name();
    if !planets.contains_key(south) {
        if let Some(node) = planets.get(north).cloned() {
            planets.insert(south.to_string(), derive_south_node(&node));
        }
    }

    let houses = match input.request.coordinates() {
        Some((latitude, longitude)) => {
            let system = resolve_house_system(input.request.house_system.as_deref());
            let raw = engine.compute_houses(jd_ut, latitude, longitude, system.code())?;
            Some(HouseData {
                house_system: input.request.house_system_label().to_string(),
                ascendant: angle_from(raw.ascendant),
                midheaven: angle_from(raw.midheaven),
                cusps: raw.cusps,
            })
        }
        None => None,
    };

    tracing::debug!(
        "Assembled chart at JD {:.6}: {} bodies, houses: {}",
        jd_ut,
        planets.len(),
        houses.is_some()
    );

    Ok(ChartResponse {
        meta: ChartMeta {
            engine_version: engine.version(),
            jd_ut,
            utc_datetime: format_utc(&utc),
            ephe_path: input.ephe_path.display().to_string(),
            zodiac_system: input.request.zodiac_label().to_string(),
        },
        planets,
        houses,
    })
}

/// Mirror the North Node across the node axis.
///
/// Longitude is shifted by 180° and latitude negated; distance and speed are
/// copied unchanged.
pub fn derive_south_node(north: &BodyPlacement) -> BodyPlacement {
    let longitude = normalize_longitude(north.longitude + 180.0);
    let (sign, degree) = sign_and_degree(longitude);
    BodyPlacement {
        longitude,
        latitude: -north.latitude,
        distance: north.distance,
        speed_longitude: north.speed_longitude,
        sign,
        degree,
    }
}

fn placement_from(position: &BodyPosition) -> BodyPlacement {
    let longitude = normalize_longitude(position.longitude);
    let (sign, degree) = sign_and_degree(longitude);
    BodyPlacement {
        longitude,
        latitude: position.latitude,
        distance: position.distance,
        speed_longitude: position.speed_longitude,
        sign,
        degree,
    }
}

fn angle_from(longitude: f64) -> AnglePlacement {
    let longitude = normalize_longitude(longitude);
    let (sign, degree) = sign_and_degree(longitude);
    AnglePlacement { longitude, sign, degree }
}
