mod analysis;
mod geo;
mod models;
mod pipeline;
mod report;
mod scrapers;

use geo::{DistanceResolver, NominatimGeocoder, ReferencePoints};
use pipeline::ListingPipeline;
use scrapers::{ListingSource, RealestateScraper};
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Parramatta Scout - units under $500k near the station");
    info!("=========================================================");
    info!("");

    let scraper = RealestateScraper::new()?;

    info!("Scraping listings from {}...", scraper.source_name());
    let raw_listings = scraper.fetch().await?;
    info!("✅ Scraped {} listings", raw_listings.len());

    let points = ReferencePoints::default();
    let pipeline = ListingPipeline::new(DistanceResolver::new(NominatimGeocoder::new()?, points));

    info!("Geocoding addresses and applying the rule table...");
    let enriched = pipeline.enrich(raw_listings).await;

    for (i, item) in enriched.iter().enumerate() {
        println!("{}. {} (${})", i + 1, item.listing.address, item.listing.price);
        println!(
            "   {} bed, {} bath, {} car",
            item.listing.bedrooms, item.listing.bathrooms, item.listing.parking_spaces
        );
        if let Some(d) = item.distances {
            println!(
                "   {:.2} km to station, {:.2} km to park",
                d.to_station_km, d.to_park_km
            );
        }
        if !item.assessment.pros.is_empty() {
            println!("   Pros: {}", item.assessment.pros.join(", "));
        }
        if !item.assessment.cons.is_empty() {
            println!("   Cons: {}", item.assessment.cons.join(", "));
        }
        println!("   Link: {}", item.listing.link);
        println!();
    }

    report::write_report(&enriched, &points, report::DEFAULT_REPORT_FILENAME)?;
    info!("💾 Saved report to {}", report::DEFAULT_REPORT_FILENAME);

    Ok(())
}
