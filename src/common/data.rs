use std::path::Path;

use anyhow::{bail, Context, Result};
use geo::{LineString, MultiPolygon};
use shapefile::{dbase::FieldValue, Reader, Shape};

use super::polygon::{polygon_to_geo, polyline_to_geo};
use crate::types::Parcel;

/// Reads all polygon features from a `.shp` file as parcels, fid by position.
pub fn read_parcels(path: &Path) -> Result<Vec<Parcel>> {
    let polygons = read_polygons(path)?;
    Ok(polygons
        .into_iter()
        .enumerate()
        .map(|(fid, geom)| Parcel::new(fid as u64, geom))
        .collect())
}

/// Reads all polygon features from a `.shp` file path.
pub fn read_polygons(path: &Path) -> Result<Vec<MultiPolygon<f64>>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut geoms = Vec::with_capacity(reader.shape_count()?);
    for result in reader.iter_shapes_and_records() {
        let (shape, _) = result.context("Error reading shape+record")?;
        match shape {
            Shape::Polygon(p) => geoms.push(polygon_to_geo(&p)),
            Shape::NullShape => continue,
            other => bail!(
                "Expected polygons in {}, found {:?}",
                path.display(),
                other.shapetype()
            ),
        }
    }
    Ok(geoms)
}

/// Reads polygon features plus one character attribute (e.g. a county `NAME`).
pub fn read_named_polygons(path: &Path, field: &str) -> Result<Vec<(String, MultiPolygon<f64>)>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut features = Vec::with_capacity(reader.shape_count()?);
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.context("Error reading shape+record")?;
        let Shape::Polygon(p) = shape else {
            bail!("Expected polygons in {}", path.display());
        };
        let name = match record.get(field) {
            Some(FieldValue::Character(Some(s))) => s.trim().to_string(),
            Some(FieldValue::Character(None)) | None => {
                bail!("Missing field {field:?} in {}", path.display())
            }
            Some(other) => bail!("Field {field:?} is not character data: {other:?}"),
        };
        features.push((name, polygon_to_geo(&p)));
    }
    Ok(features)
}

/// Reads all polyline features from a `.shp` file path, one LineString per part.
pub fn read_polylines(path: &Path) -> Result<Vec<LineString<f64>>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut lines = Vec::new();
    for result in reader.iter_shapes_and_records() {
        let (shape, _) = result.context("Error reading shape+record")?;
        match shape {
            Shape::Polyline(pl) => lines.extend(polyline_to_geo(&pl)),
            Shape::NullShape => continue,
            other => bail!(
                "Expected polylines in {}, found {:?}",
                path.display(),
                other.shapetype()
            ),
        }
    }
    Ok(lines)
}
