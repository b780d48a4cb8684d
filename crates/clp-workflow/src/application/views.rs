//! # Derived Views
//!
//! Pure functions over a record-store snapshot. Recomputed on demand;
//! record volumes are small enough that no incremental state is worth
//! keeping.

use crate::domain::{LoyaltyPoint, BRANDS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Aggregate dashboard statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointStats {
    /// Number of records.
    pub total_points: usize,
    /// Number of verified records.
    pub verified_points: usize,
    /// Distinct brands with at least one record.
    pub active_brands: usize,
    /// Sum of certified values, with a placeholder weight for records whose
    /// value is still confidential.
    pub total_value: u64,
}

/// Per-brand share of the current projection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandSlice {
    /// Brand name from the reference list.
    pub brand: &'static str,
    /// Records for this brand.
    pub count: usize,
    /// Accumulated value for this brand.
    pub value: u64,
}

// Placeholder weight for still-confidential records. Never reads the
// revealed value of an unverified record.
fn estimated_value(point: &LoyaltyPoint) -> u64 {
    point
        .display_value()
        .unwrap_or(u64::from(point.brand_index) * 10)
}

/// Filter records by search term (name, brand, or description) and brand.
#[must_use]
pub fn filter_points(
    points: &[LoyaltyPoint],
    search: &str,
    brand: Option<&str>,
) -> Vec<LoyaltyPoint> {
    let needle = search.to_lowercase();
    points
        .iter()
        .filter(|point| {
            let matches_search = needle.is_empty()
                || point.name.to_lowercase().contains(&needle)
                || point.brand.to_lowercase().contains(&needle)
                || point.description.to_lowercase().contains(&needle);
            let matches_brand = brand.is_none_or(|wanted| point.brand == wanted);
            matches_search && matches_brand
        })
        .cloned()
        .collect()
}

/// Compute dashboard statistics for a snapshot.
#[must_use]
pub fn point_stats(points: &[LoyaltyPoint]) -> PointStats {
    let active_brands: HashSet<&str> = points.iter().map(|point| point.brand.as_str()).collect();
    PointStats {
        total_points: points.len(),
        verified_points: points.iter().filter(|point| point.is_verified).count(),
        active_brands: active_brands.len(),
        total_value: points.iter().map(estimated_value).sum(),
    }
}

/// Per-brand distribution, skipping brands with no records.
#[must_use]
pub fn brand_distribution(points: &[LoyaltyPoint]) -> Vec<BrandSlice> {
    BRANDS
        .iter()
        .map(|brand| {
            let for_brand: Vec<&LoyaltyPoint> =
                points.iter().filter(|point| point.brand == *brand).collect();
            BrandSlice {
                brand,
                count: for_brand.len(),
                value: for_brand.iter().map(|point| estimated_value(point)).sum(),
            }
        })
        .filter(|slice| slice.count > 0)
        .collect()
}
