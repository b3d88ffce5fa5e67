use super::distance::{geodesic_distance_km, round_km};
use super::traits::Geocoder;
use super::types::ReferencePoints;
use crate::models::Distances;
use tracing::{debug, warn};

/// Turns a listing address into distances to the two reference points.
///
/// Every failure mode of the lookup (network error, malformed response,
/// empty candidate list) collapses to `None`. Callers never see an error;
/// a listing without distances is still a useful listing.
pub struct DistanceResolver<G> {
    geocoder: G,
    points: ReferencePoints,
}

impl<G: Geocoder> DistanceResolver<G> {
    pub fn new(geocoder: G, points: ReferencePoints) -> Self {
        Self { geocoder, points }
    }

    pub async fn resolve(&self, address: &str) -> Option<Distances> {
        match self.geocoder.locate(address).await {
            Ok(Some(point)) => Some(Distances {
                to_station_km: round_km(geodesic_distance_km(point, self.points.station)),
                to_park_km: round_km(geodesic_distance_km(point, self.points.park)),
            }),
            Ok(None) => {
                debug!(address, "No geocoding match");
                None
            }
            Err(e) => {
                warn!(address, error = %e, "Geocoding lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::types::GeoPoint;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    struct FixedGeocoder(GeoPoint);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn locate(&self, _address: &str) -> Result<Option<GeoPoint>> {
            Ok(Some(self.0))
        }
    }

    struct NoMatchGeocoder;

    #[async_trait]
    impl Geocoder for NoMatchGeocoder {
        async fn locate(&self, _address: &str) -> Result<Option<GeoPoint>> {
            Ok(None)
        }
    }

    struct FailingGeocoder;

    #[async_trait]
    impl Geocoder for FailingGeocoder {
        async fn locate(&self, _address: &str) -> Result<Option<GeoPoint>> {
            Err(anyhow!("connection refused"))
        }
    }

    fn synthetic_points() -> ReferencePoints {
        // one degree of latitude apart so the expected distance is obvious
        ReferencePoints {
            station: GeoPoint::new(0.0, 0.0),
            park: GeoPoint::new(1.0, 0.0),
        }
    }

    #[tokio::test]
    async fn resolves_both_distances_rounded_to_two_decimals() {
        let resolver =
            DistanceResolver::new(FixedGeocoder(GeoPoint::new(0.0, 0.0)), synthetic_points());

        let d = resolver.resolve("1 Test St").await.unwrap();
        assert_eq!(d.to_station_km, 0.0);
        // one degree of meridian arc near the equator
        assert!(
            d.to_park_km > 110.0 && d.to_park_km < 111.0,
            "got {} km",
            d.to_park_km
        );
    }

    #[tokio::test]
    async fn empty_candidate_list_degrades_to_none() {
        let resolver = DistanceResolver::new(NoMatchGeocoder, synthetic_points());
        assert!(resolver.resolve("nowhere at all").await.is_none());
    }

    #[tokio::test]
    async fn lookup_failure_degrades_to_none() {
        let resolver = DistanceResolver::new(FailingGeocoder, synthetic_points());
        assert!(resolver.resolve("1 Test St").await.is_none());
    }
}
