//! # Domain Invariants
//!
//! Reference lists, the total index projection, and the verified-flag
//! monotonicity check.

use super::entities::LoyaltyPoint;
use super::value_objects::RecordId;
use std::collections::HashSet;

/// Partner brand reference list.
pub const BRANDS: [&str; 6] = ["Nike", "Adidas", "Apple", "Samsung", "Starbucks", "Amazon"];

/// Category reference list.
pub const CATEGORIES: [&str; 5] = ["Fashion", "Tech", "Food", "Lifestyle", "Entertainment"];

/// Project a stored brand index onto the reference list.
///
/// Total for any index: reduction is modulo the list length, so no stored
/// value can produce an out-of-range access.
#[must_use]
pub fn brand_name(index: u32) -> &'static str {
    BRANDS[index as usize % BRANDS.len()]
}

/// Project a stored category index onto the reference list. Total, like
/// [`brand_name`].
#[must_use]
pub fn category_name(index: u32) -> &'static str {
    CATEGORIES[index as usize % CATEGORIES.len()]
}

/// Ids whose verified flag went true -> false between two projections.
///
/// The ledger never clears a verified flag, so any regression points at a
/// stale or inconsistent read.
#[must_use]
pub fn verified_regressions(prev: &[LoyaltyPoint], next: &[LoyaltyPoint]) -> Vec<RecordId> {
    let verified: HashSet<&RecordId> = prev
        .iter()
        .filter(|point| point.is_verified)
        .map(|point| &point.id)
        .collect();

    next.iter()
        .filter(|point| !point.is_verified && verified.contains(&point.id))
        .map(|point| point.id.clone())
        .collect()
}
