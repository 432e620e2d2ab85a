//! Pixel → cell hit testing.
//!
//! The SVG surface gets per-polygon listeners from the browser, but a
//! canvas has no per-cell regions, so clicks there resolve against the
//! cell geometry. Kept separate from DOM access so it can be unit tested.

use crate::board::grid::{polygon_points, Cell};

/// True if (px, py) lies inside the hexagon of the given radius centred
/// at (cx, cy). Even-odd ray cast over the corner polygon.
pub fn point_in_hex(px: f64, py: f64, cx: f64, cy: f64, radius: f64) -> bool {
    let corners = polygon_points(cx, cy, radius, 6);
    let mut inside = false;
    let mut j = corners.len() - 1;
    for i in 0..corners.len() {
        let (xi, yi) = corners[i];
        let (xj, yj) = corners[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Resolve a pixel position to the cell whose hexagon contains it.
pub fn pixel_to_cell(px: f64, py: f64, cells: &[Cell], radius: f64) -> Option<(i32, i32)> {
    cells
        .iter()
        .find(|c| point_in_hex(px, py, c.x, c.y, radius))
        .map(|c| (c.row, c.col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::grid::GridOptions;
    use crate::board::state::BoardState;

    fn cells() -> Vec<Cell> {
        let mut b = BoardState::new();
        b.layout(
            10,
            10,
            GridOptions {
                radius: 15.0,
                ..GridOptions::default()
            },
        );
        b.cells().to_vec()
    }

    // ── point_in_hex ───────────────────────────────────────────────

    #[test]
    fn center_is_inside() {
        assert!(point_in_hex(50.0, 50.0, 50.0, 50.0, 15.0));
    }

    #[test]
    fn far_point_is_outside() {
        assert!(!point_in_hex(100.0, 100.0, 50.0, 50.0, 15.0));
    }

    #[test]
    fn point_beyond_flat_side_is_outside() {
        // The hexagon's flat sides sit √3/2·r from the center horizontally.
        let half_width = 15.0 * 0.866_025_4;
        assert!(point_in_hex(50.0 + half_width - 0.5, 50.0, 50.0, 50.0, 15.0));
        assert!(!point_in_hex(50.0 + half_width + 0.5, 50.0, 50.0, 50.0, 15.0));
    }

    // ── pixel_to_cell ──────────────────────────────────────────────

    #[test]
    fn cell_centers_resolve_to_their_cell() {
        let cells = cells();
        for cell in &cells {
            assert_eq!(
                pixel_to_cell(cell.x, cell.y, &cells, 15.0),
                Some((cell.row, cell.col)),
                "center of {}:{}",
                cell.row,
                cell.col
            );
        }
    }

    #[test]
    fn points_outside_the_grid_resolve_to_none() {
        let cells = cells();
        assert_eq!(pixel_to_cell(-20.0, -20.0, &cells, 15.0), None);
        assert_eq!(pixel_to_cell(10_000.0, 10.0, &cells, 15.0), None);
    }

    #[test]
    fn picking_is_unambiguous_near_centers() {
        let cells = cells();
        // Slightly off-center still hits the same cell.
        let c = &cells[0];
        assert_eq!(
            pixel_to_cell(c.x + 3.0, c.y - 3.0, &cells, 15.0),
            Some((c.row, c.col))
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_centers_always_resolve(row in 0i32..10, col in 0i32..10) {
                let cells = cells();
                let cell = cells
                    .iter()
                    .find(|c| c.row == row && c.col == col)
                    .unwrap()
                    .clone();
                prop_assert_eq!(
                    pixel_to_cell(cell.x, cell.y, &cells, 15.0),
                    Some((row, col))
                );
            }

            #[test]
            fn prop_hits_are_within_the_radius(dx in -40.0f64..40.0, dy in -40.0f64..40.0) {
                let cells = cells();
                let c = &cells[34];
                if let Some(hit) = pixel_to_cell(c.x + dx, c.y + dy, &cells, 15.0) {
                    let cell = cells.iter().find(|k| (k.row, k.col) == hit).unwrap();
                    let d = ((c.x + dx - cell.x).powi(2) + (c.y + dy - cell.y).powi(2)).sqrt();
                    prop_assert!(d <= 15.0 + 1e-9);
                }
            }
        }
    }
}
