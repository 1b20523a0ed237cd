//! Records exchanged with the caller.
//!
//! Field names follow the wire shape used by the surrounding platform so the
//! records can be serialized straight into responses.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A point in (latitude, longitude) degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A visitable place as handed in by the caller.
///
/// Coordinates are optional because upstream data is frequently incomplete;
/// such locations are dropped before sequencing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub address_label: String,
    pub locality_label: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        address_label: impl Into<String>,
        locality_label: impl Into<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            address_label: address_label.into(),
            locality_label: locality_label.into(),
            latitude,
            longitude,
        }
    }

    /// Usable coordinate, or `None` when either component is missing or not finite.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let coordinate = Coordinate::new(self.latitude?, self.longitude?);
        coordinate.is_finite().then_some(coordinate)
    }
}

/// Identifies a location in the visit-tracking store, per user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationKey {
    pub user: String,
    pub id: String,
    pub address_label: String,
    pub locality_label: String,
}

impl LocationKey {
    pub fn for_location(user: impl Into<String>, location: &Location) -> Self {
        Self {
            user: user.into(),
            id: location.id.clone(),
            address_label: location.address_label.clone(),
            locality_label: location.locality_label.clone(),
        }
    }
}

/// One entry of a sequenced route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    /// 1-based position in the route; the origin is never numbered.
    pub visit_order: u32,
    pub id: String,
    pub address_label: String,
    pub locality_label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub visited: bool,
}

impl RouteStop {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Status of the sales document a purchase line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Completed,
    Pending,
    Cancelled,
}

/// A raw purchase line for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub product_name: String,
    pub date: NaiveDate,
    pub quantity: i32,
    pub total_price: f64,
    pub status: DocumentStatus,
}

/// A product bought on a given day. Same-day purchases collapse into one event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PurchaseEvent {
    pub product_name: String,
    pub date: NaiveDate,
}

impl PurchaseEvent {
    pub fn new(product_name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            product_name: product_name.into(),
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderSuggestion {
    pub product_name: String,
    pub days_since_last: i64,
    /// Average purchase cycle, rounded to whole days.
    pub avg_cycle: i64,
    pub reason: String,
}

/// Explicit product → form question mapping supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductQuestionMap(HashMap<String, String>);

impl ProductQuestionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product_name: impl Into<String>, question_id: impl Into<String>) {
        self.0.insert(product_name.into(), question_id.into());
    }

    pub fn question_for(&self, product_name: &str) -> Option<&str> {
        self.0.get(product_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ProductQuestionMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A suggestion paired with the question it should pre-fill, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedSuggestion {
    #[serde(flatten)]
    pub suggestion: ReorderSuggestion,
    pub question_id: Option<String>,
}
