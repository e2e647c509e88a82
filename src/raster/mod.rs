mod ascii;
mod tabulate;

pub use ascii::read_ascii_grid;
pub use tabulate::{tabulate_area, CrossTab};

use geo::{BoundingRect, Contains, MultiPolygon, Point};
use ndarray::Array2;

/// North-up affine transform mapping grid cells to map coordinates.
/// `origin` is the top-left corner of cell (0, 0); `cell_h` is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub cell_w: f64,
    pub cell_h: f64,
}

impl GeoTransform {
    pub fn new(origin_x: f64, origin_y: f64, cell_w: f64, cell_h: f64) -> Self {
        debug_assert!(cell_w > 0.0 && cell_h < 0.0, "expected a north-up transform");
        Self { origin_x, origin_y, cell_w, cell_h }
    }

    /// Map coordinate of the center of cell (row, col).
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.origin_x + (col as f64 + 0.5) * self.cell_w,
            self.origin_y + (row as f64 + 0.5) * self.cell_h,
        )
    }

    /// Cell containing map coordinate (x, y), unchecked against grid bounds.
    #[inline]
    fn cell_of(&self, x: f64, y: f64) -> (i64, i64) {
        (
            ((y - self.origin_y) / self.cell_h).floor() as i64,
            ((x - self.origin_x) / self.cell_w).floor() as i64,
        )
    }

    /// Absolute area of one cell in square map units.
    #[inline]
    pub fn cell_area(&self) -> f64 {
        (self.cell_w * self.cell_h).abs()
    }
}

/// In-memory single-band raster with an explicit nodata sentinel.
#[derive(Debug, Clone)]
pub struct Raster {
    pub transform: GeoTransform,
    pub nodata: f64,
    pub data: Array2<f64>,
}

/// Reclassification range: `[min, max)` maps to `class`.
#[derive(Debug, Clone, Copy)]
pub struct ReclassRule {
    pub min: f64,
    pub max: f64,
    pub class: u8,
}

/// Categorical raster produced by reclassification. Class 0 is nodata.
#[derive(Debug, Clone)]
pub struct ClassRaster {
    pub transform: GeoTransform,
    pub data: Array2<u8>,
}

impl Raster {
    pub fn new(transform: GeoTransform, nodata: f64, data: Array2<f64>) -> Self {
        Self { transform, nodata, data }
    }

    /// Raster of constant `value` over `rows` x `cols` cells.
    pub fn filled(transform: GeoTransform, nodata: f64, rows: usize, cols: usize, value: f64) -> Self {
        Self::new(transform, nodata, Array2::from_elem((rows, cols), value))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Cell value, `None` for nodata.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let v = self.data[[row, col]];
        (v != self.nodata).then_some(v)
    }

    /// Point sample by map coordinate; `None` outside the grid or on nodata.
    pub fn sample(&self, x: f64, y: f64) -> Option<f64> {
        let (row, col) = self.transform.cell_of(x, y);
        if row < 0 || col < 0 || row as usize >= self.rows() || col as usize >= self.cols() {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    /// Clip to a polygon: window to its bounding box, nodata outside the
    /// geometry. Cell membership is by cell center. Resolution and grid
    /// alignment are preserved.
    pub fn clip(&self, geom: &MultiPolygon<f64>) -> Raster {
        let Some(rect) = geom.bounding_rect() else {
            return Raster::new(self.transform, self.nodata, Array2::from_elem((0, 0), self.nodata));
        };

        // Window of whole cells covering the bbox, clamped to the grid.
        let cell_w = self.transform.cell_w;
        let cell_h = -self.transform.cell_h;
        let r0 = ((self.transform.origin_y - rect.max().y) / cell_h).floor() as i64;
        let r1 = ((self.transform.origin_y - rect.min().y) / cell_h).ceil() as i64;
        let c0 = ((rect.min().x - self.transform.origin_x) / cell_w).floor() as i64;
        let c1 = ((rect.max().x - self.transform.origin_x) / cell_w).ceil() as i64;
        let r0 = r0.clamp(0, self.rows() as i64) as usize;
        let c0 = c0.clamp(0, self.cols() as i64) as usize;
        let r1 = r1.clamp(0, self.rows() as i64) as usize;
        let c1 = c1.clamp(0, self.cols() as i64) as usize;

        let transform = GeoTransform::new(
            self.transform.origin_x + c0 as f64 * self.transform.cell_w,
            self.transform.origin_y + r0 as f64 * self.transform.cell_h,
            self.transform.cell_w,
            self.transform.cell_h,
        );

        let rows = r1.saturating_sub(r0);
        let cols = c1.saturating_sub(c0);
        let mut data = Array2::from_elem((rows, cols), self.nodata);
        for row in 0..rows {
            for col in 0..cols {
                let (x, y) = transform.cell_center(row, col);
                if geom.contains(&Point::new(x, y)) {
                    data[[row, col]] = self.data[[r0 + row, c0 + col]];
                }
            }
        }
        Raster::new(transform, self.nodata, data)
    }

    /// Cellwise multiply against `mask` sampled at each cell center.
    /// Nodata in either operand yields nodata; this is how the flood layer
    /// (1 = outside flood plain, nodata = inside) knocks cells out.
    pub fn mask(&self, mask: &Raster) -> Raster {
        let mut out = Array2::from_elem((self.rows(), self.cols()), self.nodata);
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let (x, y) = self.transform.cell_center(row, col);
                if let (Some(v), Some(m)) = (self.get(row, col), mask.sample(x, y)) {
                    out[[row, col]] = v * m;
                }
            }
        }
        Raster::new(self.transform, self.nodata, out)
    }

    /// Reclassify into ordinal classes by half-open ranges. Cells matching
    /// no rule (including nodata) become class 0.
    pub fn reclassify(&self, rules: &[ReclassRule]) -> ClassRaster {
        let mut out = Array2::zeros((self.rows(), self.cols()));
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if let Some(v) = self.get(row, col) {
                    if let Some(rule) = rules.iter().find(|r| v >= r.min && v < r.max) {
                        out[[row, col]] = rule.class;
                    }
                }
            }
        }
        ClassRaster { transform: self.transform, data: out }
    }
}

impl ClassRaster {
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Cell class, `None` for classed nodata.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        let v = self.data[[row, col]];
        (v != 0).then_some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};

    fn unit_transform(rows: usize) -> GeoTransform {
        // 1 m cells, top-left at (0, rows) so cell (0,0) is the northwest corner
        GeoTransform::new(0.0, rows as f64, 1.0, -1.0)
    }

    fn square(x0: f64, y0: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
        ]])
    }

    #[test]
    fn sample_reads_cell_under_coordinate() {
        let mut r = Raster::filled(unit_transform(4), -9999.0, 4, 4, 0.0);
        r.data[[0, 3]] = 7.0; // northeast corner cell: x in [3,4), y in [3,4)
        assert_eq!(r.sample(3.5, 3.5), Some(7.0));
        assert_eq!(r.sample(0.5, 0.5), Some(0.0));
        assert_eq!(r.sample(-1.0, 0.5), None);
    }

    #[test]
    fn clip_windows_to_geometry_and_masks_outside() {
        let r = Raster::filled(unit_transform(10), -9999.0, 10, 10, 3.0);
        let clipped = r.clip(&square(2.0, 2.0, 4.0));
        assert_eq!((clipped.rows(), clipped.cols()), (4, 4));
        assert_eq!(clipped.get(0, 0), Some(3.0));
        // alignment preserved: clipped origin sits on the parent grid
        assert_eq!(clipped.transform.origin_x, 2.0);
        assert_eq!(clipped.transform.origin_y, 6.0);
    }

    #[test]
    fn clip_excludes_cells_outside_a_small_polygon() {
        let r = Raster::filled(unit_transform(10), -9999.0, 10, 10, 3.0);
        // Diagonal half of the bbox leaves some centers outside.
        let tri = MultiPolygon(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 0.0, y: 10.0),
        ]]);
        let clipped = r.clip(&tri);
        let valid = clipped
            .data
            .iter()
            .filter(|&&v| v != clipped.nodata)
            .count();
        assert!(valid < 100 && valid > 30);
    }

    #[test]
    fn mask_knocks_out_nodata_cells() {
        let r = Raster::filled(unit_transform(2), -9999.0, 2, 2, 12.0);
        let mut flood = Raster::filled(unit_transform(2), -9999.0, 2, 2, 1.0);
        flood.data[[1, 0]] = -9999.0; // inside the flood plain
        let kept = r.mask(&flood);
        assert_eq!(kept.get(0, 0), Some(12.0));
        assert_eq!(kept.get(1, 0), None);
    }

    #[test]
    fn reclassify_uses_half_open_ranges() {
        let rules = [
            ReclassRule { min: 0.0, max: 5.0, class: 1 },
            ReclassRule { min: 5.0, max: 10.0, class: 2 },
        ];
        let mut r = Raster::filled(unit_transform(1), -9999.0, 1, 4, 0.0);
        r.data[[0, 1]] = 4.999;
        r.data[[0, 2]] = 5.0;
        r.data[[0, 3]] = 10.0; // no matching rule
        let classed = r.reclassify(&rules);
        assert_eq!(classed.get(0, 0), Some(1));
        assert_eq!(classed.get(0, 1), Some(1));
        assert_eq!(classed.get(0, 2), Some(2));
        assert_eq!(classed.get(0, 3), None);
    }
}
