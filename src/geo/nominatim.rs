use super::traits::Geocoder;
use super::types::GeoPoint;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// One candidate match in a Nominatim search response.
/// Nominatim serializes coordinates as strings; they are parsed on use.
#[derive(Debug, Deserialize)]
struct NominatimCandidate {
    lat: String,
    lon: String,
}

/// Address lookup backed by Nominatim (OpenStreetMap)
pub struct NominatimGeocoder {
    client: Client,
    locality: String,
}

impl NominatimGeocoder {
    /// Create a geocoder scoped to the default suburb
    pub fn new() -> Result<Self> {
        Self::with_locality("Parramatta, NSW")
    }

    /// Create a geocoder that appends `locality` to every query, so bare
    /// street addresses resolve to the right suburb
    pub fn with_locality(locality: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("parramatta-scout/0.1 (personal research)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            locality: locality.to_string(),
        })
    }

    fn search_url(&self, address: &str) -> String {
        let query = format!("{}, {}", address.trim(), self.locality);
        format!(
            "{}/search?format=json&q={}",
            NOMINATIM_BASE_URL,
            urlencoding::encode(&query)
        )
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn locate(&self, address: &str) -> Result<Option<GeoPoint>> {
        let url = self.search_url(address);
        debug!("Geocoding via {}", url);

        let candidates: Vec<NominatimCandidate> = self
            .client
            .get(&url)
            .send()
            .await
            .context("Geocoding request failed")?
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        first_candidate_point(&candidates)
    }
}

/// Nominatim orders candidates by relevance, so the head of the list wins.
/// An empty list means the address is unknown to the provider.
fn first_candidate_point(candidates: &[NominatimCandidate]) -> Result<Option<GeoPoint>> {
    let candidate = match candidates.first() {
        Some(candidate) => candidate,
        None => return Ok(None),
    };

    let latitude: f64 = candidate
        .lat
        .parse()
        .context("Invalid latitude in geocoding response")?;
    let longitude: f64 = candidate
        .lon
        .parse()
        .context("Invalid longitude in geocoding response")?;

    Ok(Some(GeoPoint::new(latitude, longitude)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_scopes_the_query_to_the_locality() {
        let geocoder = NominatimGeocoder::new().unwrap();
        assert_eq!(
            geocoder.search_url("22 Hunter Street"),
            "https://nominatim.openstreetmap.org/search?format=json&q=22%20Hunter%20Street%2C%20Parramatta%2C%20NSW"
        );
    }

    #[test]
    fn search_url_trims_ragged_scraped_addresses() {
        let geocoder = NominatimGeocoder::with_locality("Parramatta, NSW").unwrap();
        assert_eq!(
            geocoder.search_url("  5 Sorrell Street "),
            "https://nominatim.openstreetmap.org/search?format=json&q=5%20Sorrell%20Street%2C%20Parramatta%2C%20NSW"
        );
    }

    #[test]
    fn response_candidates_deserialize_with_extra_fields_ignored() {
        let body = r#"[
            {"place_id": 1, "lat": "-33.8150", "lon": "151.0011", "display_name": "22, Hunter Street, Parramatta"},
            {"place_id": 2, "lat": "-33.9000", "lon": "151.1000", "display_name": "Hunter Street, Sydney"}
        ]"#;
        let candidates: Vec<NominatimCandidate> = serde_json::from_str(body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].lat, "-33.8150");
    }

    #[test]
    fn first_candidate_wins() {
        let candidates = vec![
            NominatimCandidate {
                lat: "-33.8150".to_string(),
                lon: "151.0011".to_string(),
            },
            NominatimCandidate {
                lat: "-33.9000".to_string(),
                lon: "151.1000".to_string(),
            },
        ];
        let point = first_candidate_point(&candidates).unwrap().unwrap();
        assert_eq!(point, GeoPoint::new(-33.8150, 151.0011));
    }

    #[test]
    fn empty_candidate_list_is_not_an_error() {
        assert!(first_candidate_point(&[]).unwrap().is_none());
    }

    #[test]
    fn unparsable_coordinates_are_an_error() {
        let candidates = vec![NominatimCandidate {
            lat: "not-a-number".to_string(),
            lon: "151.0".to_string(),
        }];
        assert!(first_candidate_point(&candidates).is_err());
    }
}
