use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Locations of every reference dataset for a run, deserialized from JSON.
/// Loaded once at startup and injected into the pipeline; never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Sub-regions in resolution order; each pairs a boundary shapefile
    /// with that region's slope grid.
    pub regions: Vec<RegionConfig>,
    /// Flood-zone grid: 1 = outside flood plain, nodata = inside.
    pub flood: PathBuf,
    /// Binary good-for-solar land-use grid (1 = good, 0 = not).
    pub lulc_good: PathBuf,
    pub transmission: TransmissionConfig,
    /// Mining-reclamation permit boundary shapefile.
    pub mine_permits: PathBuf,
    /// County boundary shapefile.
    pub counties: PathBuf,
    /// County name attribute.
    #[serde(default = "default_county_field")]
    pub county_field: String,
}

fn default_county_field() -> String {
    "NAME".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    pub boundary: PathBuf,
    pub slope: PathBuf,
}

/// One line shapefile per voltage category.
#[derive(Debug, Clone, Deserialize)]
pub struct TransmissionConfig {
    pub unknown_kv: PathBuf,
    pub under_100kv: PathBuf,
    pub kv_100_to_161: PathBuf,
    pub kv_345: PathBuf,
    pub kv_500: PathBuf,
    pub kv_735_and_up: PathBuf,
}

impl RunConfig {
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config: {}", path.display()))?;
        let config: RunConfig = serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        if config.regions.is_empty() {
            bail!("Config lists no regions");
        }
        Ok(config)
    }
}
