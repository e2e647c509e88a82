use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use ndarray::Array2;

use super::{GeoTransform, Raster};

/// Reads an ESRI ASCII grid (`.asc`): a small header (ncols, nrows,
/// xllcorner, yllcorner, cellsize, optional NODATA_value) followed by
/// whitespace-separated cell values, north row first.
pub fn read_ascii_grid(path: &Path) -> Result<Raster> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ascii grid: {}", path.display()))?;
    parse_ascii_grid(&text).with_context(|| format!("Malformed ascii grid: {}", path.display()))
}

pub(crate) fn parse_ascii_grid(text: &str) -> Result<Raster> {
    let mut tokens = text.split_whitespace();

    let mut ncols: Option<usize> = None;
    let mut nrows: Option<usize> = None;
    let mut xllcorner: Option<f64> = None;
    let mut yllcorner: Option<f64> = None;
    let mut cellsize: Option<f64> = None;
    let mut nodata = -9999.0;

    // Header lines are keyword/value pairs; the first numeric token starts the data.
    let first_value = loop {
        let Some(key) = tokens.next() else { bail!("missing grid data") };
        if let Ok(v) = key.parse::<f64>() {
            break v;
        }
        let value = tokens.next().context("header keyword without a value")?;
        match key.to_ascii_lowercase().as_str() {
            "ncols" => ncols = Some(value.parse()?),
            "nrows" => nrows = Some(value.parse()?),
            "xllcorner" => xllcorner = Some(value.parse()?),
            "yllcorner" => yllcorner = Some(value.parse()?),
            "cellsize" => cellsize = Some(value.parse()?),
            "nodata_value" => nodata = value.parse()?,
            other => bail!("unknown header keyword {other:?}"),
        }
    };

    let ncols = ncols.context("missing ncols")?;
    let nrows = nrows.context("missing nrows")?;
    let xllcorner = xllcorner.context("missing xllcorner")?;
    let yllcorner = yllcorner.context("missing yllcorner")?;
    let cellsize = cellsize.context("missing cellsize")?;
    if ncols == 0 || nrows == 0 || cellsize <= 0.0 {
        bail!("degenerate grid dimensions");
    }

    let mut values = Vec::with_capacity(nrows * ncols);
    values.push(first_value);
    for token in tokens {
        values.push(token.parse::<f64>().with_context(|| format!("bad cell value {token:?}"))?);
    }
    if values.len() != nrows * ncols {
        bail!("expected {} cells, found {}", nrows * ncols, values.len());
    }

    let data = Array2::from_shape_vec((nrows, ncols), values)?;
    let transform = GeoTransform::new(
        xllcorner,
        yllcorner + nrows as f64 * cellsize, // top edge
        cellsize,
        -cellsize,
    );
    Ok(Raster::new(transform, nodata, data))
}
