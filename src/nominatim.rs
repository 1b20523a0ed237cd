//! Nominatim HTTP adapter for geocoding start addresses.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GeocodeError;
use crate::model::Coordinate;
use crate::traits::Geocoder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Comma-separated ISO 3166-1 alpha-2 codes restricting the search.
    pub country_codes: Option<String>,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "field-planner".to_string(),
            timeout_secs: 10,
            country_codes: None,
        }
    }
}

impl NominatimConfig {
    /// Defaults overridden by `NOMINATIM_URL`, `NOMINATIM_USER_AGENT`,
    /// `NOMINATIM_TIMEOUT_SECS` and `NOMINATIM_COUNTRY_CODES` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("NOMINATIM_URL") {
            config.base_url = url;
        }
        if let Ok(user_agent) = env::var("NOMINATIM_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(timeout) = env::var("NOMINATIM_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.timeout_secs = timeout;
        }
        if let Ok(codes) = env::var("NOMINATIM_COUNTRY_CODES") {
            config.country_codes = Some(codes);
        }
        config
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &NominatimConfig {
        &self.config
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let mut query = vec![("q", address), ("format", "jsonv2"), ("limit", "1")];
        if let Some(codes) = self.config.country_codes.as_deref() {
            query.push(("countrycodes", codes));
        }

        let places = self
            .client
            .get(self.config.search_url())
            .query(&query)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimPlace>>())?;

        debug!(address, results = places.len(), "nominatim search");
        first_match(address, places)
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        let parse = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|_| GeocodeError::InvalidResponse(format!("bad coordinate {:?}", value)))
        };
        let coordinate = Coordinate::new(parse(&self.lat)?, parse(&self.lon)?);
        if coordinate.is_finite() {
            Ok(coordinate)
        } else {
            Err(GeocodeError::InvalidResponse(format!(
                "non-finite coordinate {},{}",
                self.lat, self.lon
            )))
        }
    }
}

fn first_match(address: &str, places: Vec<NominatimPlace>) -> Result<Coordinate, GeocodeError> {
    match places.first() {
        Some(place) => place.coordinate(),
        None => Err(GeocodeError::NoMatch {
            address: address.to_string(),
        }),
    }
}
