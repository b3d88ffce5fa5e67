use super::types::GeoPoint;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for address-to-coordinate lookups
/// This allows swapping providers and keeps the pipeline testable with stubs
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text address to a coordinate.
    ///
    /// `Ok(None)` means the provider had no match for the address.
    /// `Err` means the lookup itself failed (network, malformed response).
    async fn locate(&self, address: &str) -> Result<Option<GeoPoint>>;
}
