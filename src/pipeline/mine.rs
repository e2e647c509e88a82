use geo::MultiPolygon;

use crate::refdata::PolygonLayer;

/// Whether the parcel overlaps any mining-reclamation permit boundary.
/// Any spatial overlap counts, including a bare boundary touch.
pub fn intersects_mine_permit(parcel: &MultiPolygon<f64>, permits: &PolygonLayer) -> bool {
    !permits.intersecting(parcel).is_empty()
}
