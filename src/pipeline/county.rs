use geo::MultiPolygon;

use crate::refdata::CountyLayer;

/// Outcome of the county containment lookup. Multiple intersecting
/// counties are surfaced rather than collapsed to an arbitrary winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountyMatch {
    None,
    Unique(String),
    Ambiguous(Vec<String>),
}

impl CountyMatch {
    /// Value for the County output column: only a unique match fills it.
    pub fn column_value(&self) -> &str {
        match self {
            CountyMatch::Unique(name) => name,
            CountyMatch::None | CountyMatch::Ambiguous(_) => "",
        }
    }

    #[inline]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, CountyMatch::Ambiguous(_))
    }
}

/// All counties intersecting the parcel, by name.
pub fn lookup_county(parcel: &MultiPolygon<f64>, counties: &CountyLayer) -> CountyMatch {
    let mut names: Vec<String> = counties
        .polygons
        .intersecting(parcel)
        .into_iter()
        .map(|idx| counties.names[idx].clone())
        .collect();
    match names.len() {
        0 => CountyMatch::None,
        1 => CountyMatch::Unique(names.remove(0)),
        _ => CountyMatch::Ambiguous(names),
    }
}
