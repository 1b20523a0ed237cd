//! Purchase history builders and mock collaborators.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use field_planner::error::{GeocodeError, HistoryError};
use field_planner::model::{Coordinate, DocumentStatus, PurchaseEvent, PurchaseLine};
use field_planner::traits::{Geocoder, PurchaseHistorySource};

/// Fixed reference date for every predictor test.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

pub fn days_ago(days: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(days)).unwrap()
}

/// Builder for a location's purchase history, with dates given as days before [`today`].
#[derive(Debug, Default)]
pub struct History {
    events: Vec<PurchaseEvent>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bought(mut self, product: &str, offsets: &[u64]) -> Self {
        for &offset in offsets {
            self.events.push(PurchaseEvent::new(product, days_ago(offset)));
        }
        self
    }

    pub fn events(self) -> Vec<PurchaseEvent> {
        self.events
    }
}

pub fn completed_line(product: &str, offset: u64) -> PurchaseLine {
    PurchaseLine {
        product_name: product.to_string(),
        date: days_ago(offset),
        quantity: 20,
        total_price: 50_000.0,
        status: DocumentStatus::Completed,
    }
}

/// Geocoder backed by a fixed address table. Unknown addresses have no match.
#[derive(Debug, Default)]
pub struct TableGeocoder {
    addresses: HashMap<String, Coordinate>,
    pub calls: RefCell<Vec<String>>,
}

impl TableGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, lat: f64, lng: f64) -> Self {
        self.addresses.insert(address.to_string(), Coordinate::new(lat, lng));
        self
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        self.calls.borrow_mut().push(address.to_string());
        self.addresses
            .get(address)
            .copied()
            .ok_or_else(|| GeocodeError::NoMatch {
                address: address.to_string(),
            })
    }
}

/// Geocoder that always fails as if the service were unreachable.
pub struct BrokenGeocoder;

impl Geocoder for BrokenGeocoder {
    fn geocode(&self, _address: &str) -> Result<Coordinate, GeocodeError> {
        Err(GeocodeError::InvalidResponse("service unavailable".to_string()))
    }
}

/// History source holding lines per location id.
#[derive(Debug, Default)]
pub struct MemorySource {
    lines: HashMap<String, Vec<PurchaseLine>>,
    pub requested: RefCell<Option<(NaiveDate, NaiveDate)>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location_id: &str, lines: Vec<PurchaseLine>) -> Self {
        self.lines.insert(location_id.to_string(), lines);
        self
    }
}

impl PurchaseHistorySource for MemorySource {
    fn lines_for(
        &self,
        location_id: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<PurchaseLine>, HistoryError> {
        *self.requested.borrow_mut() = Some((since, until));
        self.lines
            .get(location_id)
            .map(|lines| {
                lines
                    .iter()
                    .filter(|line| line.date >= since && line.date <= until)
                    .cloned()
                    .collect()
            })
            .ok_or_else(|| HistoryError::Unavailable(format!("unknown location {}", location_id)))
    }
}
