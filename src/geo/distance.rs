use super::types::GeoPoint;

// WGS-84 ellipsoid
const SEMI_MAJOR_AXIS_M: f64 = 6_378_137.0;
const FLATTENING: f64 = 1.0 / 298.257_223_563;
const SEMI_MINOR_AXIS_M: f64 = SEMI_MAJOR_AXIS_M * (1.0 - FLATTENING);

const MEAN_EARTH_RADIUS_KM: f64 = 6_371.2;

const CONVERGENCE_THRESHOLD: f64 = 1e-12;
const MAX_ITERATIONS: usize = 200;

/// Distance in kilometers between two points along the surface of the
/// WGS-84 ellipsoid, solved with Vincenty's inverse formula.
/// https://en.wikipedia.org/wiki/Vincenty%27s_formulae
///
/// Near-antipodal pairs can defeat the iteration; those fall back to the
/// great-circle distance on a mean-radius sphere so the function stays total.
pub fn geodesic_distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lng_diff = (to.longitude - from.longitude).to_radians();

    // Reduced latitudes on the auxiliary sphere
    let u1 = ((1.0 - FLATTENING) * from.latitude.to_radians().tan()).atan();
    let u2 = ((1.0 - FLATTENING) * to.latitude.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = lng_diff;
    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // coincident points
            return 0.0;
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // cos_sq_alpha is zero on equatorial lines, where the term drops out
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let c = FLATTENING / 16.0 * cos_sq_alpha * (4.0 + FLATTENING * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_prev = lambda;
        lambda = lng_diff
            + (1.0 - c)
                * FLATTENING
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        if (lambda - lambda_prev).abs() < CONVERGENCE_THRESHOLD {
            let u_sq = cos_sq_alpha
                * (SEMI_MAJOR_AXIS_M.powi(2) - SEMI_MINOR_AXIS_M.powi(2))
                / SEMI_MINOR_AXIS_M.powi(2);
            let a =
                1.0 + u_sq / 16_384.0 * (4_096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let b = u_sq / 1_024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = b
                * sin_sigma
                * (cos_2sigma_m
                    + b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                            - b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

            return SEMI_MINOR_AXIS_M * a * (sigma - delta_sigma) / 1_000.0;
        }
    }

    great_circle_distance_km(from, to)
}

/// Great-circle distance on a mean-radius sphere.
/// Only reached when the ellipsoidal iteration fails to converge.
fn great_circle_distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let (lat1_sin, lat1_cos) = from.latitude.to_radians().sin_cos();
    let (lat2_sin, lat2_cos) = to.latitude.to_radians().sin_cos();
    let (dlng_sin, dlng_cos) = (to.longitude - from.longitude).abs().to_radians().sin_cos();

    let nom1 = lat2_cos * dlng_sin;
    let nom2 = lat1_cos * lat2_sin - lat1_sin * lat2_cos * dlng_cos;
    let nom = (nom1 * nom1 + nom2 * nom2).sqrt();
    let denom = lat1_sin * lat2_sin + lat1_cos * lat2_cos * dlng_cos;

    MEAN_EARTH_RADIUS_KM * nom.atan2(denom)
}

/// Round a kilometer value to two decimal places for display
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATION: GeoPoint = GeoPoint::new(-33.8178, 151.0035);
    const PARK: GeoPoint = GeoPoint::new(-33.8145, 151.0024);

    #[test]
    fn coincident_points_are_zero() {
        assert_eq!(geodesic_distance_km(STATION, STATION), 0.0);
    }

    #[test]
    fn station_to_park_is_a_short_walk() {
        let d = geodesic_distance_km(STATION, PARK);
        assert!(d > 0.3 && d < 0.45, "got {} km", d);
        assert_eq!(round_km(d), 0.38);
    }

    #[test]
    fn symmetric_distance() {
        let forward = geodesic_distance_km(STATION, PARK);
        let backward = geodesic_distance_km(PARK, STATION);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn matches_known_city_pair_distances() {
        let stuttgart = GeoPoint::new(48.7755, 9.1827);
        let mannheim = GeoPoint::new(49.4836, 8.4630);
        let d = geodesic_distance_km(stuttgart, mannheim);
        assert!(d > 94.0 && d < 95.0, "got {} km", d);

        let new_york = GeoPoint::new(40.714268, -74.005974);
        let sydney = GeoPoint::new(-33.867138, 151.207108);
        let d = geodesic_distance_km(new_york, sydney);
        assert!(d > 15_985.0 && d < 15_995.0, "got {} km", d);
    }

    #[test]
    fn antipodal_points_fall_back_without_panicking() {
        // Vincenty does not converge for this pair
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let d = geodesic_distance_km(a, b);
        assert!(d > 19_900.0 && d < 20_100.0, "got {} km", d);
    }

    #[test]
    fn distances_are_finite_and_non_negative() {
        let pairs = [
            (GeoPoint::new(89.9, 0.0), GeoPoint::new(-89.9, 0.0)),
            (GeoPoint::new(0.0, 179.9), GeoPoint::new(0.0, -179.9)),
            (GeoPoint::new(-33.0, 151.0), GeoPoint::new(-33.0, 151.0001)),
        ];
        for (a, b) in pairs {
            let d = geodesic_distance_km(a, b);
            assert!(d.is_finite() && d >= 0.0, "got {} km", d);
        }
    }

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round_km(1.234567), 1.23);
        assert_eq!(round_km(5.678), 5.68);
        assert_eq!(round_km(0.0), 0.0);
    }
}
