pub mod distance;
pub mod nominatim;
pub mod resolver;
pub mod traits;
pub mod types;

pub use nominatim::NominatimGeocoder;
pub use resolver::DistanceResolver;
pub use traits::Geocoder;
pub use types::ReferencePoints;
