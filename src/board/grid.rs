//! Hex cell geometry: pixel origins, polygon corners, and fill colors.
//!
//! The layout uses offset coordinates on a pointy-top grid: column spacing
//! is √3·r, row spacing is 1.5·r, and odd rows are shifted right by half
//! the column spacing.

use std::f64::consts::PI;

pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Deterministic fill hues, keyed to what is being painted.
pub const TILE_HUE: u32 = 200;
pub const HQ_HUE: u32 = 110;
pub const MUD_OUTER_HUE: u32 = 40;
pub const MUD_INNER_HUE: u32 = 20;

/// Grid configuration, fixed at layout time and cloned per shape draw so a
/// single placement can override fill or collision behaviour.
#[derive(Clone, Debug, PartialEq)]
pub struct GridOptions {
    pub radius: f64,
    pub sides: u32,
    pub inset: f64,
    pub line_width: f64,
    /// Empty string means the default white fill.
    pub fill_style: String,
    pub stroke_style: String,
    /// Annotate cells with their "row:col" coordinate.
    pub indexes: bool,
    /// Cells painted with these options block future placements.
    pub collide: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            radius: 10.0,
            sides: 6,
            inset: 0.0,
            line_width: 1.0,
            fill_style: String::new(),
            stroke_style: "black".to_string(),
            indexes: false,
            collide: false,
        }
    }
}

/// One hexagonal grid position, addressed by (row, col).
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
    /// Pixel origin of the cell's center.
    pub x: f64,
    pub y: f64,
    /// Current fill color.
    pub fill: String,
    /// True iff a placed non-decoration shape occupies this cell.
    pub collide: bool,
    /// Shape that most recently painted this cell.
    pub owner: Option<usize>,
    /// "row:col" annotation, present when index labels are enabled.
    pub label: Option<String>,
}

/// Pixel origin of cell (row, col).
pub fn cell_origin(row: i32, col: i32, radius: f64) -> (f64, f64) {
    let offset = SQRT_3 * radius / 2.0;
    let mut x = radius * 2.0 + offset * col as f64 * 2.0;
    let y = radius * 2.0 + offset * row as f64 * SQRT_3;
    if row.rem_euclid(2) != 0 {
        x += offset;
    }
    (x, y)
}

/// Corner points of a regular polygon of the given radius centred on (x, y).
/// The first corner sits straight below the center at (x, y + r).
pub fn polygon_points(x: f64, y: f64, radius: f64, sides: u32) -> Vec<(f64, f64)> {
    let step = 2.0 * PI / sides as f64;
    (0..sides)
        .map(|i| {
            let theta = step * i as f64;
            (x + radius * theta.sin(), y + radius * theta.cos())
        })
        .collect()
}

/// An `hsla()` color string. `saturation`, `lightness` and `alpha` are 0.0-1.0.
pub fn hsla(hue: u32, saturation: f64, lightness: f64, alpha: f64) -> String {
    format!(
        "hsla({}, {}%, {}%, {})",
        hue,
        (saturation * 100.0).floor(),
        (lightness * 100.0).floor(),
        alpha
    )
}

/// Effective fill for options whose `fill_style` may be unset.
pub fn base_fill(opts: &GridOptions) -> String {
    if opts.fill_style.is_empty() {
        "white".to_string()
    } else {
        opts.fill_style.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── cell_origin ────────────────────────────────────────────────

    #[test]
    fn column_spacing_is_sqrt3_radius() {
        let r = 15.0;
        let (x0, _) = cell_origin(0, 0, r);
        let (x1, _) = cell_origin(0, 1, r);
        assert!((x1 - x0 - SQRT_3 * r).abs() < 1e-9);
    }

    #[test]
    fn row_spacing_is_one_and_a_half_radii() {
        let r = 15.0;
        let (_, y0) = cell_origin(0, 0, r);
        let (_, y2) = cell_origin(2, 0, r);
        // Compare even rows so the odd-row shift does not interfere.
        assert!((y2 - y0 - 3.0 * r).abs() < 1e-9);
    }

    #[test]
    fn odd_rows_shift_right_by_half_column() {
        let r = 10.0;
        let (x_even, _) = cell_origin(0, 3, r);
        let (x_odd, _) = cell_origin(1, 3, r);
        assert!((x_odd - x_even - SQRT_3 * r / 2.0).abs() < 1e-9);
    }

    // ── polygon_points ─────────────────────────────────────────────

    #[test]
    fn hexagon_has_six_corners() {
        let pts = polygon_points(50.0, 50.0, 15.0, 6);
        assert_eq!(pts.len(), 6);
    }

    #[test]
    fn first_corner_is_below_center() {
        let pts = polygon_points(50.0, 40.0, 15.0, 6);
        let (px, py) = pts[0];
        assert!((px - 50.0).abs() < 1e-9);
        assert!((py - 55.0).abs() < 1e-9);
    }

    #[test]
    fn corners_lie_on_the_radius() {
        for (px, py) in polygon_points(20.0, 30.0, 12.0, 6) {
            let d = ((px - 20.0).powi(2) + (py - 30.0).powi(2)).sqrt();
            assert!((d - 12.0).abs() < 1e-9);
        }
    }

    // ── colors ─────────────────────────────────────────────────────

    #[test]
    fn hsla_formatting() {
        assert_eq!(hsla(110, 1.0, 0.5, 1.0), "hsla(110, 100%, 50%, 1)");
        assert_eq!(hsla(200, 0.2, 0.8, 1.0), "hsla(200, 20%, 80%, 1)");
    }

    #[test]
    fn base_fill_defaults_to_white() {
        let opts = GridOptions::default();
        assert_eq!(base_fill(&opts), "white");

        let opts = GridOptions {
            fill_style: "#abc".to_string(),
            ..GridOptions::default()
        };
        assert_eq!(base_fill(&opts), "#abc");
    }
}
