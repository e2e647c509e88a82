mod config;
mod layers;

pub use config::{RegionConfig, RunConfig, TransmissionConfig};
pub use layers::{LineLayer, PolygonLayer};

use anyhow::{Context, Result};
use geo::MultiPolygon;

use crate::common::{read_named_polygons, read_polygons, read_polylines};
use crate::pipeline::TransmissionCategory;
use crate::raster::{read_ascii_grid, Raster};

/// One of the fixed geographic zones, pairing a boundary with its slope grid.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    pub boundary: MultiPolygon<f64>,
    pub slope: Raster,
}

/// County boundaries with their `NAME` attribute, index-aligned.
#[derive(Debug, Clone)]
pub struct CountyLayer {
    pub names: Vec<String>,
    pub polygons: PolygonLayer,
}

/// The six voltage-category line layers, in reporting column order.
#[derive(Debug, Clone)]
pub struct TransmissionLayers {
    layers: [LineLayer; 6],
}

impl TransmissionLayers {
    pub fn new(layers: [LineLayer; 6]) -> Self {
        Self { layers }
    }

    #[inline]
    pub fn get(&self, category: TransmissionCategory) -> &LineLayer {
        &self.layers[category as usize]
    }
}

/// All reference datasets for a run: loaded once, read-only thereafter.
/// A missing or unreadable dataset fails the load (fatal before any parcel
/// is processed).
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub regions: Vec<Region>,
    pub flood: Raster,
    pub lulc_good: Raster,
    pub transmission: TransmissionLayers,
    pub mine_permits: PolygonLayer,
    pub counties: CountyLayer,
}

impl ReferenceData {
    pub fn load(config: &RunConfig, verbose: u8) -> Result<Self> {
        let mut regions = Vec::with_capacity(config.regions.len());
        for rc in &config.regions {
            let polys = read_polygons(&rc.boundary)
                .with_context(|| format!("region {:?} boundary", rc.name))?;
            layers::require_nonempty(&polys, &rc.name)?;
            let slope = read_ascii_grid(&rc.slope)
                .with_context(|| format!("region {:?} slope grid", rc.name))?;
            if verbose > 0 {
                eprintln!("[refdata] region {} loaded ({} boundary parts)", rc.name, polys.len());
            }
            regions.push(Region { name: rc.name.clone(), boundary: merge(polys), slope });
        }

        let flood = read_ascii_grid(&config.flood).context("flood grid")?;
        let lulc_good = read_ascii_grid(&config.lulc_good).context("good-LULC grid")?;

        let t = &config.transmission;
        let transmission = TransmissionLayers::new([
            LineLayer::new(read_polylines(&t.unknown_kv).context("unknown-kV lines")?),
            LineLayer::new(read_polylines(&t.under_100kv).context("under-100kV lines")?),
            LineLayer::new(read_polylines(&t.kv_100_to_161).context("100-161kV lines")?),
            LineLayer::new(read_polylines(&t.kv_345).context("345kV lines")?),
            LineLayer::new(read_polylines(&t.kv_500).context("500kV lines")?),
            LineLayer::new(read_polylines(&t.kv_735_and_up).context("735kV-and-up lines")?),
        ]);

        let permits = read_polygons(&config.mine_permits).context("mine-permit boundaries")?;
        let mine_permits = PolygonLayer::new(permits);

        let county_features = read_named_polygons(&config.counties, &config.county_field)
            .context("county boundaries")?;
        let (names, geoms): (Vec<_>, Vec<_>) = county_features.into_iter().unzip();
        layers::require_nonempty(&geoms, "county")?;
        let counties = CountyLayer { names, polygons: PolygonLayer::new(geoms) };

        if verbose > 0 {
            eprintln!(
                "[refdata] {} regions, {} counties, {} mine permits",
                regions.len(),
                counties.names.len(),
                mine_permits.len()
            );
        }

        Ok(Self { regions, flood, lulc_good, transmission, mine_permits, counties })
    }
}

/// Collapse a layer's features into one MultiPolygon boundary.
fn merge(polys: Vec<MultiPolygon<f64>>) -> MultiPolygon<f64> {
    MultiPolygon(polys.into_iter().flat_map(|mp| mp.0).collect())
}
