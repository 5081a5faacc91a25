//! Great-circle distance helpers.

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance between two points in meters (Haversine formula).
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Straight-line distance between the first and last point of a path, in km.
pub fn path_span_km(path: &[[f64; 2]]) -> Option<f64> {
    let first = path.first()?;
    let last = path.last()?;
    Some(haversine_distance(first[0], first[1], last[0], last[1]) / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Test known distance: approx 111km per degree of latitude
        let dist = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 111_320.0).abs() < 1000.0); // Within 1km tolerance
    }

    #[test]
    fn path_span_uses_endpoints() {
        // Powai to Santacruz East, roughly 7 km apart
        let path = [[19.1176, 72.9060], [19.1000, 72.8800], [19.0800, 72.8530]];
        let span = path_span_km(&path).unwrap();
        assert!(span > 6.0 && span < 8.0, "span was {}", span);
    }

    #[test]
    fn empty_path_has_no_span() {
        assert!(path_span_km(&[]).is_none());
    }
}
