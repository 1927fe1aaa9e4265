use models::ZodiacSign;

/// Wrap any longitude into [0, 360).
pub fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = longitude.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Zodiac sign and degree within that sign for an ecliptic longitude.
///
/// No rounding is applied.
pub fn sign_and_degree(longitude: f64) -> (ZodiacSign, f64) {
    let lon = normalize_longitude(longitude);
    let index = (lon / 30.0).floor() as usize % 12;
    let degree = lon.rem_euclid(30.0);
    (ZodiacSign::from_index(index), if degree >= 30.0 { 0.0 } else { degree })
}
