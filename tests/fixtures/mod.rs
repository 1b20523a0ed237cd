//! Test fixtures for field-planner.
//!
//! Provides realistic test data including:
//! - Pharmacy locations across a few Buenos Aires neighbourhoods
//! - Mock collaborators (geocoder, history source)
//! - Purchase history builders

// Shared by several test crates, each using a subset.
#![allow(dead_code, unused_imports)]

pub mod pharmacies;
pub mod history;

pub use pharmacies::*;
pub use history::*;
