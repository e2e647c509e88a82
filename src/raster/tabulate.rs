use ahash::AHashMap;

use super::ClassRaster;

/// Cross-tabulation of cell area (square map units) by zone and class.
///
/// The class universe is fixed at construction: `area` distinguishes a class
/// column that exists with zero accumulated area (`Some(0.0)`) from a class
/// the tabulation has no column for (`None`).
#[derive(Debug, Clone)]
pub struct CrossTab {
    classes: Vec<u8>,
    cells: AHashMap<(i64, u8), f64>,
}

impl CrossTab {
    pub fn new(classes: &[u8]) -> Self {
        Self { classes: classes.to_vec(), cells: AHashMap::new() }
    }

    pub fn add(&mut self, zone: i64, class: u8, area: f64) {
        debug_assert!(self.classes.contains(&class), "class outside tabulation universe");
        *self.cells.entry((zone, class)).or_insert(0.0) += area;
    }

    /// Area for (zone, class); `None` if the class column is absent,
    /// 0 if the column exists but the zone has no such cells.
    pub fn area(&self, zone: i64, class: u8) -> Option<f64> {
        if !self.classes.contains(&class) {
            return None;
        }
        Some(self.cells.get(&(zone, class)).copied().unwrap_or(0.0))
    }

    /// Total tabulated area across all zones and classes.
    pub fn total_area(&self) -> f64 {
        self.cells.values().sum()
    }
}

/// Tabulate class-cell area by zone. `zone_of` assigns each classed cell a
/// zone from its center coordinate; cells it declines (zone `None`) and
/// classed-nodata cells contribute nothing.
pub fn tabulate_area<F>(classes: &ClassRaster, universe: &[u8], zone_of: F) -> CrossTab
where
    F: Fn(f64, f64) -> Option<i64>,
{
    let mut tab = CrossTab::new(universe);
    let cell_area = classes.transform.cell_area();
    for row in 0..classes.rows() {
        for col in 0..classes.cols() {
            let Some(class) = classes.get(row, col) else { continue };
            let (x, y) = classes.transform.cell_center(row, col);
            if let Some(zone) = zone_of(x, y) {
                tab.add(zone, class, cell_area);
            }
        }
    }
    tab
}
