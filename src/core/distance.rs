/// Kilometers per degree, applied to both latitude and longitude
pub const KM_PER_DEGREE: f64 = 111.0;

/// Calculate the flat-earth (equirectangular) distance between two points in kilometers
///
/// Both axes are scaled by [`KM_PER_DEGREE`] without a cosine correction for
/// longitude, so the result is only meaningful for short regional distances.
/// Rankings depend on this exact formula; do not swap it for a geodesic one.
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn equirectangular_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dx = (lat1 - lat2) * KM_PER_DEGREE;
    let dy = (lon1 - lon2) * KM_PER_DEGREE;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        assert_eq!(equirectangular_distance(37.7749, -122.4194, 37.7749, -122.4194), 0.0);
    }

    #[test]
    fn test_one_degree_latitude() {
        let distance = equirectangular_distance(10.0, 20.0, 11.0, 20.0);
        assert!((distance - 111.0).abs() < 1e-9);
    }

    #[test]
    fn test_longitude_not_scaled_by_latitude() {
        // A geodesic formula would shrink this near the poles
        let at_equator = equirectangular_distance(0.0, 0.0, 0.0, 1.0);
        let near_pole = equirectangular_distance(80.0, 0.0, 80.0, 1.0);
        assert!((at_equator - near_pole).abs() < 1e-9);
    }

    #[test]
    fn test_pythagorean() {
        let distance = equirectangular_distance(0.0, 0.0, 0.03, 0.04);
        assert!((distance - 5.55).abs() < 1e-9, "got {}", distance);
    }

    #[test]
    fn test_symmetric() {
        let ab = equirectangular_distance(37.7749, -122.4194, 37.8049, -122.3894);
        let ba = equirectangular_distance(37.8049, -122.3894, 37.7749, -122.4194);
        assert_eq!(ab, ba);
    }
}
