//! Grid renderer: board state plus a rendering surface.
//!
//! [`HexBoard`] owns the cell/shape/history state and pushes every visual
//! change through the [`Surface`] it was constructed with. It returns the
//! data its callers need to raise notifications; it never emits events
//! itself, so DOM glue can keep its borrows short.

pub mod footprint;
pub mod grid;
pub mod save;
pub mod state;

use crate::events::LayoutCell;
use crate::surface::Surface;
use grid::GridOptions;
use state::{BoardState, CellPatch, PlaceError, ShapeId};

/// Cell radius used by the attribute-driven draw path.
pub const DEFAULT_RADIUS: f64 = 15.0;

pub struct HexBoard<S: Surface> {
    state: BoardState,
    surface: S,
}

impl<S: Surface> HexBoard<S> {
    pub fn new(surface: S) -> Self {
        Self {
            state: BoardState::new(),
            surface,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Lay out as many cells as fit the pixel area and render the empty
    /// grid. Returns the cell set for the after-layout notification.
    pub fn draw(&mut self, width: u32, height: u32, opts: GridOptions) -> Vec<LayoutCell> {
        let cols = (width as f64 / (opts.radius * 2.0)).floor() as u32;
        let rows = (height as f64 / (opts.radius * 2.0)).floor() as u32;
        self.layout(cols, rows, width, height, opts)
    }

    /// Lay out an explicit cols×rows grid. Replaces all cells, clears the
    /// undo history, and redraws the whole surface.
    pub fn layout(
        &mut self,
        cols: u32,
        rows: u32,
        width: u32,
        height: u32,
        opts: GridOptions,
    ) -> Vec<LayoutCell> {
        self.state.layout(cols, rows, opts);
        self.surface.reset(width, height);

        for cell in self.state.cells() {
            self.surface.draw_cell(cell, self.state.options());
            if cell.label.is_some() {
                self.surface.set_label(cell, cell.label.as_deref());
            }
        }

        self.state
            .cells()
            .iter()
            .map(|c| LayoutCell {
                row: c.row,
                col: c.col,
                x: c.x,
                y: c.y,
            })
            .collect()
    }

    pub fn place_tile(&mut self, row: i32, col: i32) -> Result<ShapeId, PlaceError> {
        let (id, patches) = self.state.place_tile(row, col)?;
        self.apply(&patches);
        Ok(id)
    }

    pub fn place_hq(&mut self, row: i32, col: i32) -> Result<ShapeId, PlaceError> {
        let (id, patches) = self.state.place_hq(row, col)?;
        self.apply(&patches);
        Ok(id)
    }

    pub fn decorate_mud(&mut self, row: i32, col: i32) {
        let patches = self.state.decorate_mud(row, col);
        self.apply(&patches);
    }

    pub fn decorate_inner_mud(&mut self, row: i32, col: i32) {
        let patches = self.state.decorate_inner_mud(row, col);
        self.apply(&patches);
    }

    /// Reverse the most recent placement; no-op with an empty history.
    pub fn undo(&mut self) {
        if let Some(patches) = self.state.undo() {
            self.apply(&patches);
        }
    }

    pub fn scatter_random(&mut self, count: u32) {
        let patches = self.state.scatter_random(count);
        self.apply(&patches);
    }

    /// Shape owning the cell, with its label — hover/tooltip lookup.
    pub fn hovered_shape(&self, row: i32, col: i32) -> Option<(ShapeId, Option<String>)> {
        let id = self.state.shape_at(row, col)?;
        let label = self.state.shape(id).and_then(|s| s.label.clone());
        Some((id, label))
    }

    pub fn set_shape_label(&mut self, id: ShapeId, label: Option<String>) {
        self.state.set_shape_label(id, label);
    }

    /// Records for the persistence layer.
    pub fn save_payload(&self) -> Vec<save::SavedShape> {
        save::extract_save(self.state.shapes())
    }

    /// Load path: relayout, then replay a saved shape list through the
    /// painting primitive without collision checks.
    pub fn restore(
        &mut self,
        saved: Vec<save::SavedShape>,
        width: u32,
        height: u32,
        opts: GridOptions,
    ) -> Vec<LayoutCell> {
        let cells = self.draw(width, height, opts);
        let shapes = save::apply_saved(saved, self.state.options());
        let patches = self.state.replay(shapes);
        self.apply(&patches);
        cells
    }

    fn apply(&mut self, patches: &[CellPatch]) {
        for p in patches {
            if let Some(cell) = self.state.resolve_cell(p.row, p.col) {
                self.surface.repaint_cell(cell);
                self.surface.set_label(cell, cell.label.as_deref());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{RecordingSurface, SurfaceOp};

    fn board() -> HexBoard<RecordingSurface> {
        let mut b = HexBoard::new(RecordingSurface::new());
        b.draw(
            300,
            300,
            GridOptions {
                radius: 15.0,
                ..GridOptions::default()
            },
        );
        b
    }

    #[test]
    fn draw_sizes_the_grid_from_pixels() {
        // 300px / (2 × 15px) = 10 cells per axis.
        let b = board();
        assert_eq!(b.state().cells().len(), 100);
        assert_eq!(
            b.surface().ops[0],
            SurfaceOp::Reset {
                width: 300,
                height: 300
            }
        );
        let drawn = b
            .surface()
            .ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::DrawCell { .. }))
            .count();
        assert_eq!(drawn, 100);
    }

    #[test]
    fn placement_repaints_exactly_the_footprint() {
        let mut b = board();
        b.place_hq(2, 2).unwrap();
        let repaints = b.surface().repaints().len();
        assert_eq!(
            repaints,
            footprint::Footprint::hq(2).resolve(2, 2).len()
        );
    }

    #[test]
    fn failed_placement_repaints_nothing() {
        let mut b = board();
        b.place_tile(2, 2).unwrap();
        let ops_before = b.surface().ops.len();
        assert!(b.place_tile(2, 2).is_err());
        assert_eq!(b.surface().ops.len(), ops_before);
    }

    #[test]
    fn undo_repaints_the_restored_cells() {
        let mut b = board();
        b.place_tile(4, 4).unwrap();
        let ops_before = b.surface().ops.len();
        b.undo();
        assert!(b.surface().ops.len() > ops_before);
        match b.surface().ops.last().unwrap() {
            SurfaceOp::SetLabel { row: 4, col: 4, .. } => {}
            other => panic!("unexpected trailing op {other:?}"),
        }
    }

    #[test]
    fn undo_with_no_history_touches_nothing() {
        let mut b = board();
        let ops_before = b.surface().ops.len();
        b.undo();
        assert_eq!(b.surface().ops.len(), ops_before);
    }

    #[test]
    fn restore_round_trips_the_painted_cells() {
        let mut b = board();
        b.place_hq(2, 2).unwrap();
        b.place_tile(6, 6).unwrap();
        let painted = b.state().cells().to_vec();
        let saved = b.save_payload();

        let mut fresh = HexBoard::new(RecordingSurface::new());
        fresh.restore(
            saved,
            300,
            300,
            GridOptions {
                radius: 15.0,
                ..GridOptions::default()
            },
        );
        assert_eq!(fresh.state().cells(), &painted[..]);
    }

    #[test]
    fn hovered_shape_reports_label() {
        let mut b = board();
        let id = b.place_hq(2, 2).unwrap();
        assert_eq!(b.hovered_shape(2, 2), Some((id, None)));

        b.set_shape_label(id, Some("Base".to_string()));
        assert_eq!(
            b.hovered_shape(2, 2),
            Some((id, Some("Base".to_string())))
        );
        assert_eq!(b.hovered_shape(9, 9), None);
    }

    #[test]
    fn relayout_clears_prior_shapes() {
        let mut b = board();
        b.place_tile(1, 1).unwrap();
        b.draw(150, 150, GridOptions { radius: 15.0, ..GridOptions::default() });
        assert!(b.state().shapes().is_empty());
        assert_eq!(b.state().cells().len(), 25);
    }
}
