//! # Application Module
//!
//! The workflow service orchestrating the domain and outbound ports, plus
//! pure derived views over the record projection.

pub mod service;
pub mod views;

pub use service::LoyaltyPointService;
pub use views::{brand_distribution, filter_points, point_stats, BrandSlice, PointStats};
