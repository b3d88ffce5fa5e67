use crate::models::RawListing;
use crate::scrapers::traits::ListingSource;
use crate::scrapers::types::SearchParams;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

const SITE_ORIGIN: &str = "https://www.realestate.com.au";

/// realestate.com.au scraper implementation
pub struct RealestateScraper {
    client: Client,
    params: SearchParams,
}

impl RealestateScraper {
    /// Create a scraper with the default search (Parramatta units under 500k)
    pub fn new() -> Result<Self> {
        Self::with_params(SearchParams::default())
    }

    /// Create a scraper with custom search parameters
    pub fn with_params(params: SearchParams) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, params })
    }
}

#[async_trait]
impl ListingSource for RealestateScraper {
    async fn fetch(&self) -> Result<Vec<RawListing>> {
        let url = self.params.search_url();
        info!("Fetching listings page: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch listings page")?;

        if !response.status().is_success() {
            anyhow::bail!("Listings page returned status {}", response.status());
        }

        let html = response
            .text()
            .await
            .context("Failed to read listings page body")?;
        debug!("Downloaded {} bytes of HTML", html.len());

        let listings = parse_listings(&html);
        if listings.is_empty() {
            warn!("No listings parsed from the page - the markup may have changed");
        }

        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "realestate.com.au"
    }
}

/// Parse listing cards out of a search results page.
///
/// Cards are `<article>` elements. A card must carry a link, an address and
/// a parsable price to be kept; bedroom, bathroom and car counts fall back
/// to zero when the card does not mention them.
fn parse_listings(html: &str) -> Vec<RawListing> {
    let document = Html::parse_document(html);
    let card_selector = Selector::parse("article").unwrap();

    let mut listings = Vec::new();
    for card in document.select(&card_selector) {
        match parse_card(card) {
            Some(listing) => listings.push(listing),
            None => debug!("Skipped a card without link, address or price"),
        }
    }

    listings
}

fn parse_card(card: ElementRef) -> Option<RawListing> {
    let link_selector = Selector::parse("a[href]").unwrap();
    let href = card.select(&link_selector).next()?.value().attr("href")?;
    let link = if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", SITE_ORIGIN, href)
    };

    let text = collapse_whitespace(&card.text().collect::<Vec<_>>().join(" "));
    let address = extract_address(card)?;
    let price = extract_price(card, &text)?;

    // Feature counts appear both as aria-labels on the icon row and as
    // plain text, so scan both
    let mut haystack = text.clone();
    for aria in aria_labels(card) {
        haystack.push(' ');
        haystack.push_str(&aria);
    }
    let bedrooms = extract_count(&haystack, r"bed(?:room)?s?").unwrap_or(0);
    let bathrooms = extract_count(&haystack, r"bath(?:room)?s?").unwrap_or(0);
    let parking_spaces = extract_count(&haystack, r"car(?:\s*(?:space|park|port))?s?").unwrap_or(0);

    let title = match extract_heading(card) {
        Some(heading) => heading,
        None => text.chars().take(60).collect(),
    };

    Some(RawListing {
        title,
        price,
        bedrooms,
        bathrooms,
        parking_spaces,
        address,
        link,
        scraped_at: Utc::now(),
    })
}

fn extract_address(card: ElementRef) -> Option<String> {
    for selector in [r#"[class*="address"]"#, "h2 a", "h2"] {
        let address_selector = Selector::parse(selector).unwrap();
        if let Some(el) = card.select(&address_selector).next() {
            let text = collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "));
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn extract_heading(card: ElementRef) -> Option<String> {
    let heading_selector = Selector::parse("h2, h3").unwrap();
    let heading = card.select(&heading_selector).next()?;
    let text = collapse_whitespace(&heading.text().collect::<Vec<_>>().join(" "));
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn extract_price(card: ElementRef, card_text: &str) -> Option<i64> {
    let price_selector = Selector::parse(r#"[class*="price"]"#).unwrap();
    if let Some(el) = card.select(&price_selector).next() {
        let text = el.text().collect::<String>();
        if let Some(price) = parse_dollar_amount(&text) {
            return Some(price);
        }
    }
    parse_dollar_amount(card_text)
}

/// Pull the first "$123,456" style amount out of a blob of text
fn parse_dollar_amount(text: &str) -> Option<i64> {
    let re = Regex::new(r"\$\s*([0-9][0-9,]*)").unwrap();
    let caps = re.captures(text)?;
    caps[1].replace(',', "").parse().ok()
}

/// Find "2 bedrooms", "1 bath", "1 car space" style counts.
/// The trailing word boundary keeps street names like "2 Carson St" out.
fn extract_count(text: &str, noun_pattern: &str) -> Option<u32> {
    let re = Regex::new(&format!(r"(?i)\b(\d+)\s*{}\b", noun_pattern)).unwrap();
    let caps = re.captures(text)?;
    caps[1].parse().ok()
}

fn aria_labels(card: ElementRef) -> Vec<String> {
    let aria_selector = Selector::parse("[aria-label]").unwrap();
    card.select(&aria_selector)
        .filter_map(|el| el.value().attr("aria-label"))
        .map(|label| label.replace('\u{a0}', " "))
        .collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
