use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single listing as scraped from the source page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawListing {
    pub title: String,
    /// Asking price in whole dollars
    pub price: i64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_spaces: u32,
    pub address: String,
    pub link: String,
    pub scraped_at: DateTime<Utc>,
}

/// Rule-based observations for a listing, kept in rule-evaluation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Distances from a resolved address to the two reference points,
/// in kilometres rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distances {
    pub to_station_km: f64,
    pub to_park_km: f64,
}

/// A raw listing plus everything the pipeline derived for it.
///
/// `distances` is `None` whenever geocoding failed for the address;
/// the listing itself always survives into the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedListing {
    #[serde(flatten)]
    pub listing: RawListing,
    #[serde(flatten)]
    pub assessment: Assessment,
    pub distances: Option<Distances>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enriched_listing_serializes_flat() {
        let enriched = EnrichedListing {
            listing: RawListing {
                title: "2 bed unit".to_string(),
                price: 480_000,
                bedrooms: 2,
                bathrooms: 1,
                parking_spaces: 1,
                address: "5 Sorrell St, Parramatta".to_string(),
                link: "https://www.realestate.com.au/property-unit-1".to_string(),
                scraped_at: DateTime::from_timestamp(1_722_470_400, 0).unwrap(),
            },
            assessment: Assessment {
                pros: vec!["Has car space".to_string()],
                cons: vec![],
            },
            distances: None,
        };

        let value = serde_json::to_value(&enriched).unwrap();
        // scraped fields and assessment lists sit at the top level
        assert!(value.get("title").is_some());
        assert!(value.get("pros").is_some());
        assert!(value.get("listing").is_none());
        assert!(value.get("assessment").is_none());
        assert!(value["distances"].is_null());
    }

    #[test]
    fn enriched_listing_round_trips_through_json() {
        let json = r#"{
            "title": "2 bed unit",
            "price": 480000,
            "bedrooms": 2,
            "bathrooms": 1,
            "parking_spaces": 1,
            "address": "5 Sorrell St, Parramatta",
            "link": "https://www.realestate.com.au/property-unit-1",
            "scraped_at": "2024-08-01T00:00:00Z",
            "pros": [],
            "cons": ["Only 1 bathroom for 2 bedrooms"],
            "distances": {"to_station_km": 0.5, "to_park_km": 0.7}
        }"#;

        let enriched: EnrichedListing = serde_json::from_str(json).unwrap();
        assert_eq!(enriched.listing.price, 480_000);
        assert_eq!(enriched.assessment.cons.len(), 1);
        assert_eq!(
            enriched.distances,
            Some(Distances {
                to_station_km: 0.5,
                to_park_km: 0.7,
            })
        );
    }
}
