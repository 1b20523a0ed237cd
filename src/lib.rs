//! field-planner core
//!
//! Two independent planning aids for field representatives: a fixed-start
//! nearest-neighbour route sequencer and a purchase-cycle reorder predictor.
//! Both are pure computations over data supplied by the caller.

pub mod traits;
pub mod model;
pub mod error;
pub mod distance;
pub mod sequencer;
pub mod predictor;
pub mod nominatim;
pub mod tracker;
