use geo::MultiPolygon;

use crate::refdata::TransmissionLayers;
use crate::types::{MILES_PER_METER, SENTINEL};

/// The six voltage bands, in reporting column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionCategory {
    UnknownKv,
    Under100Kv,
    Kv100To161,
    Kv345,
    Kv500,
    Kv735AndUp,
}

impl TransmissionCategory {
    pub const ALL: [TransmissionCategory; 6] = [
        TransmissionCategory::UnknownKv,
        TransmissionCategory::Under100Kv,
        TransmissionCategory::Kv100To161,
        TransmissionCategory::Kv345,
        TransmissionCategory::Kv500,
        TransmissionCategory::Kv735AndUp,
    ];

    /// Output column name.
    pub fn column(self) -> &'static str {
        match self {
            TransmissionCategory::UnknownKv => "UnknownkV",
            TransmissionCategory::Under100Kv => "Under100kV",
            TransmissionCategory::Kv100To161 => "100to161kV",
            TransmissionCategory::Kv345 => "345kV",
            TransmissionCategory::Kv500 => "500kV",
            TransmissionCategory::Kv735AndUp => "735kV",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransmissionCategory::UnknownKv => "Unknown kV",
            TransmissionCategory::Under100Kv => "Under 100 kV",
            TransmissionCategory::Kv100To161 => "100 to 161 kV",
            TransmissionCategory::Kv345 => "345 kV",
            TransmissionCategory::Kv500 => "500 kV",
            TransmissionCategory::Kv735AndUp => "735kV and Up",
        }
    }
}

/// Miles to the nearest line per category, for one parcel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmissionDistances {
    miles: [f64; 6],
}

impl TransmissionDistances {
    #[inline]
    pub fn get(&self, category: TransmissionCategory) -> f64 {
        self.miles[category as usize]
    }

    pub fn all_sentinel() -> Self {
        Self { miles: [SENTINEL; 6] }
    }

    #[cfg(test)]
    pub(crate) fn from_raw(miles: [f64; 6]) -> Self {
        Self { miles }
    }
}

/// Minimum distance from the parcel to each voltage category, in miles.
///
/// Failure is all-or-nothing by policy: one category failing is taken as a
/// systemic input problem rather than a category-specific one, so every
/// distance is reset to the sentinel and no further categories are tried.
pub fn estimate_distances(
    parcel: &MultiPolygon<f64>,
    layers: &TransmissionLayers,
) -> TransmissionDistances {
    let mut miles = [0.0; 6];
    for category in TransmissionCategory::ALL {
        match layers.get(category).min_distance(parcel) {
            Ok(meters) => miles[category as usize] = meters * MILES_PER_METER,
            Err(err) => {
                eprintln!("[transmission] {} distance failed: {err}", category.label());
                return TransmissionDistances::all_sentinel();
            }
        }
    }
    TransmissionDistances { miles }
}
