//! # Confidential Loyalty Points Test Suite
//!
//! Scenario and property tests exercising the workflow crates together:
//! creation and revelation flows against the in-memory ledger and mock
//! provider, projection behavior under partial failure, and the status
//! channel's presentation contract.

pub mod support;

mod creation;
mod projection;
mod status;
