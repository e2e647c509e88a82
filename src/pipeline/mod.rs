mod area;
mod county;
mod mine;
mod orchestrator;
mod region;
mod slope;
mod transmission;

pub use area::{tabulate_all_land, tabulate_good_land, SlopeAreas};
pub use county::{lookup_county, CountyMatch};
pub use mine::intersects_mine_permit;
pub use orchestrator::{Pipeline, RunSummary};
pub use region::resolve_region;
pub use slope::{classify_slope, SlopeBucket, SLOPE_CLASS_UNIVERSE};
pub use transmission::{estimate_distances, TransmissionCategory, TransmissionDistances};
