use geo::Point;

/// Roughly 5.5km, enough to tell same-named towns apart.
pub const NEARBY_THRESHOLD_DEGREES: f64 = 0.05;

/// Great-circle separation between A and B in degrees, using the spherical
/// law of cosines. The cosine is clamped to [-1, 1] so identical or antipodal
/// points don't fall outside the domain of `acos` through rounding.
pub fn angular_distance(lat_a: f64, long_a: f64, lat_b: f64, long_b: f64) -> f64 {
    // sin² + cos² can round just below 1, which acos turns into ~1e-6 degrees
    if lat_a == lat_b && long_a == long_b {
        return 0.0;
    }

    let lat1 = lat_a.to_radians();
    let long1 = long_a.to_radians();
    let lat2 = lat_b.to_radians();
    let long2 = long_b.to_radians();

    let cos = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (long1 - long2).cos();
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Same as [`angular_distance`], for points with x = longitude and y = latitude.
pub fn point_distance(a: &Point, b: &Point) -> f64 {
    angular_distance(a.y(), a.x(), b.y(), b.x())
}

/// NaN never counts as nearby.
pub fn is_nearby(a: &Point, b: &Point, threshold: f64) -> bool {
    point_distance(a, b) < threshold
}

#[cfg(test)]
mod tests {
    use geo::HaversineDistance;

    use super::*;

    #[test]
    fn identical_points() {
        for (lat, long) in [(0.0, 0.0), (48.8566, 2.3522), (-33.8688, 151.2093), (90.0, 0.0)] {
            assert_eq!(angular_distance(lat, long, lat, long), 0.0);
        }
    }

    #[test]
    fn symmetric() {
        let a = (48.8566, 2.3522);
        let b = (33.6610, -95.5555);
        assert_eq!(
            angular_distance(a.0, a.1, b.0, b.1),
            angular_distance(b.0, b.1, a.0, a.1)
        );
    }

    #[test]
    fn adjacent_points_stay_in_acos_domain() {
        // one ulp apart: the cosine rounds above 1 without clamping
        let lat = -58.1327f64;
        let next = f64::from_bits(lat.to_bits() + 1);
        let d = angular_distance(lat, 10.0, next, 10.0);
        assert!(d.is_finite(), "{d}");
        assert!(d < 1e-6, "{d}");
        assert!(is_nearby(
            &Point::new(10.0, lat),
            &Point::new(10.0, next),
            NEARBY_THRESHOLD_DEGREES
        ));
    }

    #[test]
    fn known_separations() {
        assert!((angular_distance(0.0, 0.0, 0.0, 90.0) - 90.0).abs() < 1e-9);
        assert!((angular_distance(0.0, 0.0, 0.0, 180.0) - 180.0).abs() < 1e-9);
        assert!((angular_distance(90.0, 0.0, -90.0, 0.0) - 180.0).abs() < 1e-9);
        assert!((angular_distance(10.0, 20.0, 11.0, 20.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn nan_is_not_nearby() {
        let a = Point::new(f64::NAN, 0.0);
        let b = Point::new(0.0, 0.0);
        assert!(point_distance(&a, &b).is_nan());
        assert!(!is_nearby(&a, &b, NEARBY_THRESHOLD_DEGREES));
    }

    #[test]
    fn threshold_is_about_five_kilometres() {
        // along a meridian one degree is the same everywhere
        let a = Point::new(2.3522, 48.8566);
        let b = Point::new(2.3522, 48.8566 + NEARBY_THRESHOLD_DEGREES);
        let metres = a.haversine_distance(&b);
        assert!((5_000.0..6_000.0).contains(&metres), "{metres}");
        assert!((point_distance(&a, &b) - NEARBY_THRESHOLD_DEGREES).abs() < 1e-9);
    }
}
