use crate::models::RawListing;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all listing sources
/// This allows easy addition of new portals (Domain, Allhomes, etc) in the future
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the current batch of raw listings from the source
    async fn fetch(&self) -> Result<Vec<RawListing>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
