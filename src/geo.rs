//! Small geodesy helpers.

/// Mean Earth radius in meters (IUGG).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance between two WGS-84 positions in meters.
///
/// Haversine is accurate to well under a meter at V2X ranges, which is far
/// below the position resolution the messages carry anyway.
#[must_use]
pub fn distance_m(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let phi_a = lat_a.to_radians();
    let phi_b = lat_b.to_radians();
    let d_phi = (lat_b - lat_a).to_radians();
    let d_lambda = (lon_b - lon_a).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Convert a microdegree coordinate to degrees.
#[must_use]
pub fn microdegrees_to_degrees(micro: i32) -> f64 {
    f64::from(micro) / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance() {
        assert_eq!(distance_m(48.74, 9.32, 48.74, 9.32), 0.0);
    }

    #[test]
    fn known_distance() {
        // one degree of longitude at the equator is about 111.2 km
        let d = distance_m(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111_195.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn short_range_accuracy() {
        // roughly 100 m of latitude
        let d = distance_m(48.74, 9.32, 48.7409, 9.32);
        assert!((d - 100.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn microdegree_conversion() {
        assert_eq!(microdegrees_to_degrees(48_740_000), 48.74);
        assert_eq!(microdegrees_to_degrees(-9_320_000), -9.32);
    }
}
