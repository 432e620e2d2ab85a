//! A surface fake that records drawing operations, for exercising the
//! grid renderer without a browser.

use super::Surface;
use crate::board::grid::{Cell, GridOptions};

#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Reset { width: u32, height: u32 },
    DrawCell { row: i32, col: i32, fill: String },
    RepaintCell { row: i32, col: i32, fill: String, collide: bool },
    SetLabel { row: i32, col: i32, text: Option<String> },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations of one kind, for targeted assertions.
    pub fn repaints(&self) -> Vec<&SurfaceOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::RepaintCell { .. }))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn reset(&mut self, width: u32, height: u32) {
        self.ops.push(SurfaceOp::Reset { width, height });
    }

    fn draw_cell(&mut self, cell: &Cell, _opts: &GridOptions) {
        self.ops.push(SurfaceOp::DrawCell {
            row: cell.row,
            col: cell.col,
            fill: cell.fill.clone(),
        });
    }

    fn repaint_cell(&mut self, cell: &Cell) {
        self.ops.push(SurfaceOp::RepaintCell {
            row: cell.row,
            col: cell.col,
            fill: cell.fill.clone(),
            collide: cell.collide,
        });
    }

    fn set_label(&mut self, cell: &Cell, text: Option<&str>) {
        self.ops.push(SurfaceOp::SetLabel {
            row: cell.row,
            col: cell.col,
            text: text.map(str::to_string),
        });
    }
}
