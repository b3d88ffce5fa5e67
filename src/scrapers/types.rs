use serde::{Deserialize, Serialize};

/// Search parameters for the realestate.com.au buy listings page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Suburb slug, lower case
    pub suburb: String,
    /// State abbreviation, lower case
    pub state: String,
    /// Postcode of the suburb
    pub postcode: String,
    /// Property type slugs, joined with '+' in the URL
    pub property_types: Vec<String>,
    /// Minimum number of bedrooms
    pub min_bedrooms: u32,
    /// Maximum number of bedrooms
    pub max_bedrooms: u32,
    /// Upper price bound (whole AUD)
    pub max_price: i64,
    /// Results page, 1-based
    pub page: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            suburb: "parramatta".to_string(),
            state: "nsw".to_string(),
            postcode: "2150".to_string(),
            property_types: vec!["unit".to_string(), "apartment".to_string()],
            min_bedrooms: 1,
            max_bedrooms: 2,
            max_price: 500_000,
            page: 1,
        }
    }
}

impl SearchParams {
    /// Build the listings page URL for these parameters
    pub fn search_url(&self) -> String {
        format!(
            "https://www.realestate.com.au/buy/property-{}-with-{}-{}-bedrooms-under-{}-in-{},+{}+{}/list-{}",
            self.property_types.join("+"),
            self.min_bedrooms,
            self.max_bedrooms,
            self.max_price,
            self.suburb,
            self.state,
            self.postcode,
            self.page
        )
    }
}
