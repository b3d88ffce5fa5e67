use crate::analysis::assess;
use crate::geo::{DistanceResolver, Geocoder};
use crate::models::{EnrichedListing, RawListing};
use tracing::debug;

/// Runs every raw listing through the rule table and the distance resolver,
/// strictly in input order.
pub struct ListingPipeline<G> {
    resolver: DistanceResolver<G>,
}

impl<G: Geocoder> ListingPipeline<G> {
    pub fn new(resolver: DistanceResolver<G>) -> Self {
        Self { resolver }
    }

    /// Enrich listings one at a time, in order.
    ///
    /// One output per input: a failed geocode leaves that record without
    /// distances but never drops it and never aborts the batch. Addresses
    /// are looked up sequentially to keep the load on the geocoding
    /// provider at one request at a time.
    pub async fn enrich(&self, listings: Vec<RawListing>) -> Vec<EnrichedListing> {
        let mut enriched = Vec::with_capacity(listings.len());

        for listing in listings {
            let assessment = assess(
                listing.bedrooms,
                listing.bathrooms,
                listing.parking_spaces,
                listing.price,
            );
            let distances = self.resolver.resolve(&listing.address).await;
            debug!(title = %listing.title, ?distances, "Enriched listing");

            enriched.push(EnrichedListing {
                listing,
                assessment,
                distances,
            });
        }

        enriched
    }
}
