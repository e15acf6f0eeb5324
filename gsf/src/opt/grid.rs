use log::debug;
use polyplan::geometry::primitives::{Point, SPolygon};
use polyplan::geometry::{GeometryAdapter, LocalProjection};
use serde::{Deserialize, Serialize};

/// Factor by which the spacing is widened while the grid holds too many points
const SPACING_GROWTH: f64 = 1.1;

/// Configuration of the scan grid of candidate center positions
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// The spacing is chosen so that the land holds roughly this many points
    pub target_grid_points: usize,
    /// Lower bound on the spacing (meters)
    pub min_spacing: f64,
    /// Upper bound on the spacing (meters)
    pub max_spacing: f64,
    /// Hard cap on the number of points of the bounding box grid, overrides `max_spacing`
    pub max_grid_points: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            target_grid_points: 400,
            min_spacing: 6.0,
            max_spacing: 25.0,
            max_grid_points: 20_000,
        }
    }
}

/// Candidate center positions within the land, row-major from south-west to north-east
#[derive(Debug, Clone)]
pub struct ScanGrid {
    /// Distance between two neighboring points (meters)
    pub spacing: f64,
    pub points: Vec<Point>,
}

impl ScanGrid {
    pub fn new(
        land: &SPolygon,
        projection: &LocalProjection,
        config: &GridConfig,
        geometry: &impl GeometryAdapter,
    ) -> Self {
        let bbox = land.bbox;
        let n_along = |length: f64, spacing: f64| (length / spacing).floor() as usize + 1;

        let mut spacing = grid_spacing(geometry.area(land), config);
        while n_along(bbox.width(), spacing) * n_along(bbox.height(), spacing)
            > config.max_grid_points.max(1)
        {
            spacing *= SPACING_GROWTH;
        }

        let (n_cols, n_rows) = (
            n_along(bbox.width(), spacing),
            n_along(bbox.height(), spacing),
        );
        //center the grid within the bounding box
        let x_0 = bbox.x_min + (bbox.width() - (n_cols - 1) as f64 * spacing) / 2.0;
        let y_0 = bbox.y_min + (bbox.height() - (n_rows - 1) as f64 * spacing) / 2.0;

        let points: Vec<Point> = (0..n_rows)
            .flat_map(|row| {
                (0..n_cols).map(move |col| {
                    Point(x_0 + col as f64 * spacing, y_0 + row as f64 * spacing)
                })
            })
            .filter(|p| geometry.contains_point(land, p))
            .collect();

        let (d_lat, d_lng) = projection.meters_to_degrees(spacing);
        debug!(
            "[SEARCH] scan grid: {n_cols} x {n_rows}, spacing {spacing:.2} m ({d_lat:.7}° lat, {d_lng:.7}° lng), {} points within land",
            points.len()
        );

        ScanGrid { spacing, points }
    }
}

/// Spacing which gives roughly `target_grid_points` points over `area`, within the configured bounds
pub fn grid_spacing(area: f64, config: &GridConfig) -> f64 {
    let target = config.target_grid_points.max(1) as f64;
    (area / target)
        .sqrt()
        .clamp(config.min_spacing, config.max_spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_is_bounded() {
        let config = GridConfig::default();
        assert_eq!(grid_spacing(100.0, &config), 6.0);
        assert_eq!(grid_spacing(1.0e8, &config), 25.0);
        let mid = grid_spacing(400.0 * 10.0_f64.powi(2), &config);
        assert!((mid - 10.0).abs() < 1e-9);
    }
}
