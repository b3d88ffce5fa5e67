use crate::models::Assessment;

/// Price below which a listing counts as an affordable entry point.
const AFFORDABLE_BELOW: i64 = 450_000;
/// Price at which a listing is flagged as near the top of the budget.
const BUDGET_CEILING: i64 = 490_000;

/// Apply the fixed pros/cons rule table to a listing's headline numbers.
///
/// Rules run in a fixed order and each contributes at most one observation,
/// so the output lists read in rule order. The bathroom-balance and
/// price-band rules are non-exhaustive: a 3-bedroom listing, or a price in
/// [450_000, 490_000), simply says nothing.
pub fn assess(bedrooms: u32, bathrooms: u32, parking_spaces: u32, price: i64) -> Assessment {
    let mut assessment = Assessment::default();

    if parking_spaces >= 1 {
        assessment.pros.push("Has car space".to_string());
    } else {
        assessment.cons.push("No dedicated parking".to_string());
    }

    if bedrooms == 2 && bathrooms == 2 {
        assessment
            .pros
            .push("2 bathrooms for 2 bedrooms (good balance)".to_string());
    } else if bedrooms == 2 && bathrooms == 1 {
        assessment
            .cons
            .push("Only 1 bathroom for 2 bedrooms".to_string());
    }

    if price < AFFORDABLE_BELOW {
        assessment
            .pros
            .push("Affordable entry point for Parramatta".to_string());
    } else if price >= BUDGET_CEILING {
        assessment
            .cons
            .push("Near the top of your budget".to_string());
    }

    assessment
}
