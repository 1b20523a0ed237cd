//! Pharmacy locations for routing fixtures.
//!
//! Coordinates are street-level approximations of real addresses.

use field_planner::model::Location;

/// A named pharmacy with coordinates.
#[derive(Debug, Clone)]
pub struct Pharmacy {
    pub name: &'static str,
    pub address: &'static str,
    pub locality: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Pharmacy {
    pub const fn new(
        name: &'static str,
        address: &'static str,
        locality: &'static str,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            name,
            address,
            locality,
            lat,
            lng,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.name, self.address, self.locality, Some(self.lat), Some(self.lng))
    }
}

// ============================================================================
// Belgrano
// ============================================================================

pub const BELGRANO: &[Pharmacy] = &[
    Pharmacy::new("Azul Belgrano", "Av. Cabildo 1900", "Belgrano", -34.5610, -58.4560),
    Pharmacy::new("Del Pueblo", "Juramento 2100", "Belgrano", -34.5617, -58.4577),
    Pharmacy::new("Barrancas", "Echeverria 1500", "Belgrano", -34.5622, -58.4489),
    Pharmacy::new("Monroe", "Monroe 2600", "Belgrano", -34.5585, -58.4640),
    Pharmacy::new("Las Heras Norte", "Av. Cabildo 2500", "Belgrano", -34.5567, -58.4612),
    Pharmacy::new("Cramer", "Cramer 2200", "Belgrano", -34.5588, -58.4667),
];

// ============================================================================
// Palermo
// ============================================================================

pub const PALERMO: &[Pharmacy] = &[
    Pharmacy::new("Plaza Italia", "Av. Santa Fe 4000", "Palermo", -34.5810, -58.4210),
    Pharmacy::new("Soho", "Honduras 4800", "Palermo", -34.5880, -58.4290),
    Pharmacy::new("Hollywood", "Fitz Roy 1900", "Palermo", -34.5790, -58.4350),
    Pharmacy::new("Botanico", "Av. Las Heras 4100", "Palermo", -34.5830, -58.4170),
];

// ============================================================================
// Nunez
// ============================================================================

pub const NUNEZ: &[Pharmacy] = &[
    Pharmacy::new("Nunez Centro", "Av. Cabildo 3900", "Nunez", -34.5460, -58.4630),
    Pharmacy::new("Udaondo", "Udaondo 2300", "Nunez", -34.5440, -58.4700),
];

pub fn all_pharmacies() -> Vec<Location> {
    BELGRANO
        .iter()
        .chain(PALERMO)
        .chain(NUNEZ)
        .map(Pharmacy::location)
        .collect()
}

pub fn belgrano() -> Vec<Location> {
    BELGRANO.iter().map(Pharmacy::location).collect()
}
