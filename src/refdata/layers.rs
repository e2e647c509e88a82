use anyhow::{bail, Result};
use geo::{BoundingRect, LineString, MultiPolygon, Rect, Relate};
use rstar::{RTree, RTreeObject, AABB};

/// R-tree entry for one feature's bounding box.
#[derive(Debug, Clone)]
struct BoundingBox {
    idx: usize, // Index of the corresponding feature in geoms
    bbox: Rect<f64>,
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Polygon feature layer with a bounding-box index for intersection queries.
#[derive(Debug, Clone)]
pub struct PolygonLayer {
    geoms: Vec<MultiPolygon<f64>>,
    rtree: RTree<BoundingBox>,
}

impl PolygonLayer {
    pub fn new(geoms: Vec<MultiPolygon<f64>>) -> Self {
        let boxes = geoms
            .iter()
            .enumerate()
            .filter_map(|(idx, geom)| geom.bounding_rect().map(|bbox| BoundingBox { idx, bbox }))
            .collect();
        Self { geoms, rtree: RTree::bulk_load(boxes) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.geoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geoms.is_empty()
    }

    /// Indices of features whose geometry intersects `geom` (boundary
    /// touches count). Bbox candidates first, then a DE-9IM check.
    pub fn intersecting(&self, geom: &MultiPolygon<f64>) -> Vec<usize> {
        let Some(rect) = geom.bounding_rect() else { return Vec::new() };
        let search = AABB::from_corners(rect.min().into(), rect.max().into());

        let mut hits: Vec<usize> = self
            .rtree
            .locate_in_envelope_intersecting(&search)
            .filter(|cand| self.geoms[cand.idx].relate(geom).is_intersects())
            .map(|cand| cand.idx)
            .collect();
        hits.sort_unstable();
        hits
    }
}

/// Transmission line layer for one voltage category.
#[derive(Debug, Clone)]
pub struct LineLayer {
    lines: Vec<LineString<f64>>,
}

impl LineLayer {
    pub fn new(lines: Vec<LineString<f64>>) -> Self {
        Self { lines }
    }

    /// Minimum Euclidean distance (map units) from `geom` to any line in
    /// the layer. A layer with no features cannot answer and errors.
    pub fn min_distance(&self, geom: &MultiPolygon<f64>) -> Result<f64> {
        use geo::{Distance, Euclidean};

        if self.lines.is_empty() {
            bail!("line layer has no features");
        }
        let mut best = f64::INFINITY;
        for line in &self.lines {
            for poly in &geom.0 {
                let d = Euclidean.distance(poly, line);
                if d < best {
                    best = d;
                }
            }
        }
        if !best.is_finite() {
            bail!("distance query produced no finite result");
        }
        Ok(best)
    }
}

/// Degenerate-polygon guard shared by the loaders: every feature must have
/// at least one ring with interior area.
pub fn require_nonempty(geoms: &[MultiPolygon<f64>], what: &str) -> Result<()> {
    use geo::Area;
    if geoms.is_empty() {
        bail!("{what} layer has no features");
    }
    if geoms.iter().any(|g| g.unsigned_area() == 0.0) {
        bail!("{what} layer contains a degenerate polygon");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(x0: f64, y0: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
        ]])
    }

    #[test]
    fn intersecting_includes_overlap_and_touch() {
        let layer = PolygonLayer::new(vec![
            square(0.0, 0.0, 10.0),   // overlaps
            square(10.0, 0.0, 10.0),  // touches along x = 10
            square(50.0, 50.0, 10.0), // far away
        ]);
        let probe = square(5.0, 2.0, 5.0);
        assert_eq!(layer.intersecting(&probe), vec![0, 1]);
    }

    #[test]
    fn disjoint_probe_matches_nothing() {
        let layer = PolygonLayer::new(vec![square(0.0, 0.0, 10.0)]);
        assert!(layer.intersecting(&square(100.0, 100.0, 5.0)).is_empty());
    }

    #[test]
    fn min_distance_to_nearest_line() {
        let layer = LineLayer::new(vec![
            LineString::from(vec![(0.0, 20.0), (10.0, 20.0)]),
            LineString::from(vec![(0.0, 100.0), (10.0, 100.0)]),
        ]);
        let d = layer.min_distance(&square(0.0, 0.0, 10.0)).unwrap();
        assert!((d - 10.0).abs() < 1e-9);
    }

    #[test]
    fn crossing_line_is_distance_zero() {
        let layer = LineLayer::new(vec![LineString::from(vec![(-5.0, 5.0), (15.0, 5.0)])]);
        let d = layer.min_distance(&square(0.0, 0.0, 10.0)).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn empty_line_layer_is_an_error() {
        let layer = LineLayer::new(Vec::new());
        assert!(layer.min_distance(&square(0.0, 0.0, 10.0)).is_err());
    }
}
