pub mod realestate;
pub mod traits;
pub mod types;

pub use realestate::RealestateScraper;
pub use traits::ListingSource;
