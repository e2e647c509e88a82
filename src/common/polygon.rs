use shapefile as shp;

/// Convert a shapefile polygon (flat ring list, CW exteriors) to geo::MultiPolygon.
pub fn polygon_to_geo(p: &shp::Polygon) -> geo::MultiPolygon<f64> {
    /// Ensure first and last are the same for geo::LineString coords
    fn ensure_closed(coords: &mut Vec<geo::Coord<f64>>) {
        if !coords.is_empty() && coords[0] != coords[coords.len() - 1] {
            coords.push(coords[0]);
        }
    }

    /// Signed area of a coordinate ring (negative for a shapefile exterior)
    fn signed_area(pts: &[geo::Coord<f64>]) -> f64 {
        let mut a = 0.0;
        for w in pts.windows(2) {
            a += w[0].x * w[1].y - w[1].x * w[0].y;
        }
        a / 2.0
    }

    // Each ring becomes a closed LineString, tagged exterior by orientation
    // (shapefiles store exteriors clockwise).
    let mut rings: Vec<(geo::LineString<f64>, bool)> = Vec::with_capacity(p.rings().len());
    for ring in p.rings() {
        let mut coords: Vec<geo::Coord<f64>> =
            ring.points().iter().map(|pt| geo::Coord { x: pt.x, y: pt.y }).collect();
        ensure_closed(&mut coords);
        let is_exterior = signed_area(&coords) < 0.0;
        rings.push((geo::LineString(coords), is_exterior));
    }

    // Group each exterior with the holes that follow it (shapefile ring order).
    let mut polys: Vec<geo::Polygon<f64>> = Vec::new();
    let mut exterior: Option<geo::LineString<f64>> = None;
    let mut holes: Vec<geo::LineString<f64>> = Vec::new();
    for (ls, is_exterior) in rings {
        if is_exterior {
            if let Some(ext) = exterior.take() {
                polys.push(geo::Polygon::new(ext, std::mem::take(&mut holes)));
            }
            exterior = Some(ls);
        } else {
            holes.push(ls);
        }
    }
    if let Some(ext) = exterior {
        polys.push(geo::Polygon::new(ext, holes));
    }

    geo::MultiPolygon(polys)
}

/// Convert a shapefile polyline to one geo::LineString per part.
pub fn polyline_to_geo(pl: &shp::Polyline) -> Vec<geo::LineString<f64>> {
    pl.parts()
        .iter()
        .map(|part| {
            geo::LineString(part.iter().map(|pt| geo::Coord { x: pt.x, y: pt.y }).collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;
    use shapefile::{Point, PolygonRing};

    fn square_cw(x0: f64, y0: f64, size: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x0, y0 + size),
            Point::new(x0 + size, y0 + size),
            Point::new(x0 + size, y0),
            Point::new(x0, y0),
        ]
    }

    #[test]
    fn single_ring_polygon_converts_with_area() {
        let shp_poly = shapefile::Polygon::with_rings(vec![PolygonRing::Outer(square_cw(0.0, 0.0, 10.0))]);
        let mp = polygon_to_geo(&shp_poly);
        assert_eq!(mp.0.len(), 1);
        assert!((mp.unsigned_area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn hole_reduces_polygon_area() {
        let mut hole = square_cw(2.0, 2.0, 4.0);
        hole.reverse(); // holes are counter-clockwise
        let shp_poly = shapefile::Polygon::with_rings(vec![
            PolygonRing::Outer(square_cw(0.0, 0.0, 10.0)),
            PolygonRing::Inner(hole),
        ]);
        let mp = polygon_to_geo(&shp_poly);
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].interiors().len(), 1);
        assert!((mp.unsigned_area() - 84.0).abs() < 1e-9);
    }

    #[test]
    fn polyline_parts_become_linestrings() {
        let pl = shapefile::Polyline::with_parts(vec![
            vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)],
            vec![Point::new(0.0, 3.0), Point::new(5.0, 3.0), Point::new(5.0, 8.0)],
        ]);
        let lines = polyline_to_geo(&pl);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].0.len(), 3);
    }
}
