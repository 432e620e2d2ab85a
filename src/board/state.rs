//! Board state: the cell set, placed shapes, and the undo history.
//!
//! Pure logic with no DOM types, so placement rules, collision handling
//! and undo are unit testable. Rendering happens one layer up: every
//! mutation returns the coordinates of the cells it repainted.

use super::footprint::Footprint;
use super::grid::{self, Cell, GridOptions};

/// Index of a shape in placement order.
pub type ShapeId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    Hq,
    Tile,
    Decoration,
}

/// A placed multi-cell figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub row: i32,
    pub col: i32,
    pub footprint: Footprint,
    /// Options snapshot the shape was painted with.
    pub style: GridOptions,
    /// User-supplied text, set through the label dialog (HQ only).
    pub label: Option<String>,
}

/// Why a placement was rejected. Rejected placements mutate nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaceError {
    /// Some covered cell is already occupied by a blocking shape.
    Collision,
    /// Some footprint offset resolves outside the laid-out grid.
    OutOfBounds,
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceError::Collision => write!(f, "collision"),
            PlaceError::OutOfBounds => write!(f, "out of bounds"),
        }
    }
}

/// Prior visual state of one cell, recorded per placement for undo.
#[derive(Clone, Debug)]
struct CellRestore {
    row: i32,
    col: i32,
    fill: String,
    collide: bool,
    owner: Option<ShapeId>,
    label: Option<String>,
}

/// A cell whose visuals changed; the caller repaints these on its surface.
#[derive(Clone, Debug, PartialEq)]
pub struct CellPatch {
    pub row: i32,
    pub col: i32,
}

pub struct BoardState {
    cells: Vec<Cell>,
    shapes: Vec<Shape>,
    history: Vec<Vec<CellRestore>>,
    opts: GridOptions,
    rng_state: u32,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            shapes: Vec::new(),
            history: Vec::new(),
            opts: GridOptions::default(),
            rng_state: 42,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn options(&self) -> &GridOptions {
        &self.opts
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Lay out a cols×rows grid, replacing all cells and clearing shapes
    /// and history.
    pub fn layout(&mut self, cols: u32, rows: u32, opts: GridOptions) {
        self.opts = opts;
        self.cells.clear();
        self.shapes.clear();
        self.history.clear();

        for col in 0..cols as i32 {
            for row in 0..rows as i32 {
                let (x, y) = grid::cell_origin(row, col, self.opts.radius);
                let label = self.opts.indexes.then(|| format!("{row}:{col}"));
                self.cells.push(Cell {
                    row,
                    col,
                    x,
                    y,
                    fill: grid::base_fill(&self.opts),
                    collide: false,
                    owner: None,
                    label,
                });
            }
        }
    }

    /// Unique cell with the given coordinate, or `None` out of bounds.
    pub fn resolve_cell(&self, row: i32, col: i32) -> Option<&Cell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    fn cell_index(&self, row: i32, col: i32) -> Option<usize> {
        self.cells.iter().position(|c| c.row == row && c.col == col)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Shape that currently owns the cell's visual, if any.
    pub fn shape_at(&self, row: i32, col: i32) -> Option<ShapeId> {
        self.resolve_cell(row, col)?.owner
    }

    pub fn set_shape_label(&mut self, id: ShapeId, label: Option<String>) {
        if let Some(shape) = self.shapes.get_mut(id) {
            shape.label = label;
        }
    }

    /// Place a single-cell Tile at the anchor.
    pub fn place_tile(
        &mut self,
        row: i32,
        col: i32,
    ) -> Result<(ShapeId, Vec<CellPatch>), PlaceError> {
        let mut style = self.opts.clone();
        style.fill_style = grid::hsla(grid::TILE_HUE, 1.0, 0.5, 1.0);
        style.collide = true;
        self.place_checked(ShapeKind::Tile, row, col, Footprint::tile(), style)
    }

    /// Place an HQ at the anchor; the footprint table depends on row parity.
    pub fn place_hq(
        &mut self,
        row: i32,
        col: i32,
    ) -> Result<(ShapeId, Vec<CellPatch>), PlaceError> {
        let mut style = self.opts.clone();
        style.fill_style = grid::hsla(grid::HQ_HUE, 1.0, 0.5, 1.0);
        style.collide = true;
        self.place_checked(ShapeKind::Hq, row, col, Footprint::hq(row), style)
    }

    /// Collision-checked placement: every covered cell must exist and be
    /// free, or the whole placement is rejected with no mutation.
    fn place_checked(
        &mut self,
        kind: ShapeKind,
        row: i32,
        col: i32,
        footprint: Footprint,
        style: GridOptions,
    ) -> Result<(ShapeId, Vec<CellPatch>), PlaceError> {
        let mut indices = Vec::new();
        for (r, c) in footprint.resolve(row, col) {
            let i = self.cell_index(r, c).ok_or(PlaceError::OutOfBounds)?;
            if self.cells[i].collide {
                return Err(PlaceError::Collision);
            }
            indices.push(i);
        }
        Ok(self.paint(kind, row, col, footprint, style, None, indices))
    }

    /// Place a decorative shape: never collision-checked, never blocking,
    /// and offsets that miss the grid are skipped (the decoration tables
    /// are larger than small grids).
    pub fn place_decoration(
        &mut self,
        row: i32,
        col: i32,
        footprint: Footprint,
        mut style: GridOptions,
    ) -> (Option<ShapeId>, Vec<CellPatch>) {
        style.collide = false;
        let indices: Vec<usize> = footprint
            .resolve(row, col)
            .into_iter()
            .filter_map(|(r, c)| self.cell_index(r, c))
            .collect();
        if indices.is_empty() {
            return (None, Vec::new());
        }
        let (id, patches) =
            self.paint(ShapeKind::Decoration, row, col, footprint, style, None, indices);
        (Some(id), patches)
    }

    /// Paint the outer mud patch anchored at (row, col).
    pub fn decorate_mud(&mut self, row: i32, col: i32) -> Vec<CellPatch> {
        let mut style = self.opts.clone();
        style.fill_style = grid::hsla(grid::MUD_OUTER_HUE, 1.0, 0.5, 1.0);
        self.place_decoration(row, col, Footprint::mud_outer(), style).1
    }

    /// Paint the inner mud patch plus its satellite specks and highlight
    /// dots. Anchor offsets for the satellites are fixed data.
    pub fn decorate_inner_mud(&mut self, row: i32, col: i32) -> Vec<CellPatch> {
        let mut patches = Vec::new();

        let mut style = self.opts.clone();
        style.fill_style = grid::hsla(grid::MUD_INNER_HUE, 1.0, 0.5, 1.0);
        patches.extend(
            self.place_decoration(row, col, Footprint::mud_inner(), style).1,
        );

        for (dr, dc) in [(-3, -1), (13, 24), (31, -1)] {
            let mut style = self.opts.clone();
            style.fill_style = grid::hsla(grid::MUD_INNER_HUE, 1.0, 0.5, 1.0);
            patches.extend(
                self.place_decoration(row + dr, col + dc, Footprint::mud_speck(), style)
                    .1,
            );
        }

        for (dr, dc) in [(-1, 0), (15, 25), (33, 0)] {
            let mut style = self.opts.clone();
            style.fill_style = grid::hsla(grid::TILE_HUE, 0.2, 0.8, 1.0);
            patches.extend(
                self.place_decoration(row + dr, col + dc, Footprint::mud_dot(), style)
                    .1,
            );
        }

        patches
    }

    /// Pop the most recent shape and restore every touched cell's prior
    /// visuals. Restores apply in reverse order so that coordinates a
    /// footprint visits twice end up at their true pre-placement state.
    pub fn undo(&mut self) -> Option<Vec<CellPatch>> {
        let restores = self.history.pop()?;
        self.shapes.pop();

        let mut patches = Vec::with_capacity(restores.len());
        for r in restores.iter().rev() {
            if let Some(i) = self.cell_index(r.row, r.col) {
                let cell = &mut self.cells[i];
                cell.fill = r.fill.clone();
                cell.collide = r.collide;
                cell.owner = r.owner;
                cell.label = r.label.clone();
                patches.push(CellPatch { row: r.row, col: r.col });
            }
        }
        Some(patches)
    }

    /// Replay saved shapes onto the current layout without collision
    /// checks — the load path repaints whatever was stored.
    pub fn replay(&mut self, shapes: Vec<Shape>) -> Vec<CellPatch> {
        let mut patches = Vec::new();
        for shape in shapes {
            let indices: Vec<usize> = shape
                .footprint
                .resolve(shape.row, shape.col)
                .into_iter()
                .filter_map(|(r, c)| self.cell_index(r, c))
                .collect();
            let (_, p) = self.paint(
                shape.kind,
                shape.row,
                shape.col,
                shape.footprint,
                shape.style,
                shape.label,
                indices,
            );
            patches.extend(p);
        }
        patches
    }

    /// Paint a shape over the given cell indices, recording history.
    fn paint(
        &mut self,
        kind: ShapeKind,
        row: i32,
        col: i32,
        footprint: Footprint,
        style: GridOptions,
        label: Option<String>,
        indices: Vec<usize>,
    ) -> (ShapeId, Vec<CellPatch>) {
        let id = self.shapes.len();
        let fill = grid::base_fill(&style);

        let mut restores = Vec::with_capacity(indices.len());
        let mut patches = Vec::with_capacity(indices.len());
        for i in indices {
            let cell = &mut self.cells[i];
            restores.push(CellRestore {
                row: cell.row,
                col: cell.col,
                fill: cell.fill.clone(),
                collide: cell.collide,
                owner: cell.owner,
                label: cell.label.clone(),
            });

            cell.fill = fill.clone();
            if style.collide {
                cell.collide = true;
            }
            cell.owner = Some(id);
            if style.indexes {
                cell.label = Some(format!("{}:{}", cell.row, cell.col));
            }
            patches.push(CellPatch { row: cell.row, col: cell.col });
        }

        self.history.push(restores);
        self.shapes.push(Shape {
            kind,
            row,
            col,
            footprint,
            style,
            label,
        });
        (id, patches)
    }

    fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    /// Paint `count` randomly chosen cells with random hues, as
    /// non-blocking decorations.
    pub fn scatter_random(&mut self, count: u32) -> Vec<CellPatch> {
        let mut patches = Vec::new();
        for _ in 0..count {
            if self.cells.is_empty() {
                break;
            }
            let idx = self.next_random() as usize % self.cells.len();
            let (row, col) = (self.cells[idx].row, self.cells[idx].col);
            let hue = self.next_random() % 360;
            let mut style = self.opts.clone();
            style.fill_style = grid::hsla(hue, 1.0, 0.5, 1.0);
            patches.extend(self.place_decoration(row, col, Footprint::tile(), style).1);
        }
        patches
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cols: u32, rows: u32) -> BoardState {
        let mut b = BoardState::new();
        b.layout(
            cols,
            rows,
            GridOptions {
                radius: 15.0,
                ..GridOptions::default()
            },
        );
        b
    }

    // ── layout & lookup ────────────────────────────────────────────

    #[test]
    fn layout_creates_unique_coordinates() {
        let b = board(10, 10);
        assert_eq!(b.cells().len(), 100);
        let mut seen = std::collections::HashSet::new();
        for c in b.cells() {
            assert!(seen.insert((c.row, c.col)), "duplicate {}:{}", c.row, c.col);
        }
    }

    #[test]
    fn resolve_cell_inside_and_outside_bounds() {
        let b = board(10, 8);
        let cell = b.resolve_cell(3, 4).expect("in bounds");
        assert_eq!((cell.row, cell.col), (3, 4));
        assert!(b.resolve_cell(8, 4).is_none());
        assert!(b.resolve_cell(3, 10).is_none());
        assert!(b.resolve_cell(-1, 0).is_none());
    }

    #[test]
    fn relayout_replaces_cells_and_clears_history() {
        let mut b = board(10, 10);
        b.place_tile(2, 2).unwrap();
        assert_eq!(b.history_len(), 1);

        b.layout(5, 5, GridOptions::default());
        assert_eq!(b.cells().len(), 25);
        assert_eq!(b.history_len(), 0);
        assert!(b.shapes().is_empty());
        assert!(!b.resolve_cell(2, 2).unwrap().collide);
    }

    #[test]
    fn layout_with_indexes_labels_every_cell() {
        let mut b = BoardState::new();
        b.layout(
            3,
            3,
            GridOptions {
                indexes: true,
                ..GridOptions::default()
            },
        );
        assert_eq!(b.resolve_cell(1, 2).unwrap().label.as_deref(), Some("1:2"));
    }

    // ── placement ──────────────────────────────────────────────────

    #[test]
    fn tile_placement_flags_its_cell() {
        let mut b = board(10, 10);
        b.place_tile(4, 4).unwrap();
        let cell = b.resolve_cell(4, 4).unwrap();
        assert!(cell.collide);
        assert_eq!(cell.fill, grid::hsla(grid::TILE_HUE, 1.0, 0.5, 1.0));
        assert_eq!(cell.owner, Some(0));
    }

    #[test]
    fn hq_placement_flags_every_covered_cell() {
        let mut b = board(10, 10);
        b.place_hq(2, 2).unwrap();
        for (r, c) in Footprint::hq(2).resolve(2, 2) {
            assert!(b.resolve_cell(r, c).unwrap().collide, "({r},{c}) not flagged");
        }
    }

    #[test]
    fn colliding_placement_fails_without_mutation() {
        let mut b = board(10, 10);
        b.place_tile(2, 2).unwrap();

        let before: Vec<Cell> = b.cells().to_vec();
        assert_eq!(b.place_hq(2, 2), Err(PlaceError::Collision));
        assert_eq!(b.cells(), &before[..]);
        assert_eq!(b.shapes().len(), 1);
        assert_eq!(b.history_len(), 1);
    }

    #[test]
    fn out_of_bounds_placement_fails_without_mutation() {
        let mut b = board(10, 10);
        // The even-row HQ footprint reaches row -1 from row 0.
        let before: Vec<Cell> = b.cells().to_vec();
        assert_eq!(b.place_hq(0, 5), Err(PlaceError::OutOfBounds));
        assert_eq!(b.cells(), &before[..]);
    }

    #[test]
    fn hq_diamond_blocks_a_tile_at_its_anchor() {
        // 10×10 grid at radius 15; HQ at (2,2) flags the diamond cells and
        // a Tile at (2,2) afterwards collides.
        let mut b = board(10, 10);
        b.place_hq(2, 2).unwrap();
        for (r, c) in [(1, 2), (2, 1), (2, 2), (2, 3), (3, 2)] {
            assert!(b.resolve_cell(r, c).unwrap().collide, "({r},{c}) not flagged");
        }
        assert_eq!(b.place_tile(2, 2), Err(PlaceError::Collision));
    }

    #[test]
    fn decorations_never_block_and_never_flag() {
        let mut b = board(10, 10);
        let (id, patches) = b.place_decoration(
            5,
            5,
            Footprint::tile(),
            GridOptions {
                fill_style: "hsla(40, 100%, 50%, 1)".to_string(),
                collide: true, // ignored: decorations never block
                ..GridOptions::default()
            },
        );
        assert!(id.is_some());
        assert_eq!(patches.len(), 1);
        assert!(!b.resolve_cell(5, 5).unwrap().collide);

        // A tile can still be placed on top of the decoration.
        b.place_tile(5, 5).unwrap();
        assert!(b.resolve_cell(5, 5).unwrap().collide);
    }

    #[test]
    fn decoration_paints_over_blocked_cells_without_clearing_flags() {
        let mut b = board(10, 10);
        b.place_tile(5, 5).unwrap();
        b.place_decoration(
            5,
            5,
            Footprint::tile(),
            GridOptions::default(),
        );
        assert!(b.resolve_cell(5, 5).unwrap().collide);
    }

    #[test]
    fn decoration_skips_offsets_outside_the_grid() {
        let mut b = board(10, 10);
        // The outer mud table reaches far outside a 10×10 grid; only the
        // intersecting cells are painted.
        let patches = b.decorate_mud(0, 0);
        assert!(!patches.is_empty());
        assert!(patches.len() < Footprint::mud_outer().resolve(0, 0).len());
        assert_eq!(b.shapes().len(), 1);
    }

    #[test]
    fn inner_mud_is_a_composite_of_seven_pieces() {
        let mut b = board(60, 60);
        b.decorate_inner_mud(20, 10);
        assert_eq!(b.shapes().len(), 7);
        assert!(b.shapes().iter().all(|s| s.kind == ShapeKind::Decoration));
    }

    // ── undo ───────────────────────────────────────────────────────

    #[test]
    fn undo_restores_fill_and_collision() {
        let mut b = board(10, 10);
        let before: Vec<Cell> = b.cells().to_vec();

        b.place_hq(2, 2).unwrap();
        let patches = b.undo().expect("history entry");
        assert!(!patches.is_empty());
        assert_eq!(b.cells(), &before[..]);
        assert!(b.shapes().is_empty());
    }

    #[test]
    fn undo_pops_exactly_one_shape() {
        let mut b = board(10, 10);
        b.place_tile(1, 1).unwrap();
        b.place_tile(3, 3).unwrap();

        b.undo().unwrap();
        assert_eq!(b.shapes().len(), 1);
        assert!(b.resolve_cell(1, 1).unwrap().collide);
        assert!(!b.resolve_cell(3, 3).unwrap().collide);
    }

    #[test]
    fn undo_on_empty_history_is_a_noop() {
        let mut b = board(5, 5);
        assert!(b.undo().is_none());
        assert_eq!(b.cells().len(), 25);
    }

    #[test]
    fn undo_restores_span_decoration_cells() {
        let mut b = board(10, 10);
        let before: Vec<Cell> = b.cells().to_vec();
        let mut style = GridOptions::default();
        style.fill_style = "hsla(200, 20%, 80%, 1)".to_string();
        b.place_decoration(5, 2, Footprint::mud_dot(), style);
        b.undo().unwrap();
        assert_eq!(b.cells(), &before[..]);
    }

    #[test]
    fn undo_restores_decoration_overlap_state() {
        let mut b = board(10, 10);
        b.place_tile(5, 5).unwrap();
        let tile_fill = b.resolve_cell(5, 5).unwrap().fill.clone();

        b.place_decoration(5, 5, Footprint::tile(), GridOptions::default());
        b.undo().unwrap();

        let cell = b.resolve_cell(5, 5).unwrap();
        assert!(cell.collide, "tile's flag must survive the decoration undo");
        assert_eq!(cell.fill, tile_fill);
        assert_eq!(cell.owner, Some(0));
    }

    // ── labels ─────────────────────────────────────────────────────

    #[test]
    fn shape_labels_are_editable() {
        let mut b = board(10, 10);
        let (id, _) = b.place_hq(2, 2).unwrap();
        assert_eq!(b.shape(id).unwrap().label, None);

        b.set_shape_label(id, Some("North base".to_string()));
        assert_eq!(b.shape(id).unwrap().label.as_deref(), Some("North base"));
    }

    #[test]
    fn shape_at_reports_the_owner() {
        let mut b = board(10, 10);
        let (id, _) = b.place_hq(4, 4).unwrap();
        assert_eq!(b.shape_at(4, 4), Some(id));
        assert_eq!(b.shape_at(0, 0), None);
    }

    // ── replay & scatter ───────────────────────────────────────────

    #[test]
    fn replay_repaints_saved_shapes_without_collision_checks() {
        let mut b = board(10, 10);
        b.place_hq(2, 2).unwrap();
        b.place_tile(6, 6).unwrap();
        let shapes: Vec<Shape> = b.shapes().to_vec();
        let painted: Vec<Cell> = b.cells().to_vec();

        let mut fresh = board(10, 10);
        fresh.replay(shapes);
        assert_eq!(fresh.cells(), &painted[..]);
        assert_eq!(fresh.shapes().len(), 2);
    }

    #[test]
    fn replay_keeps_labels() {
        let mut b = board(10, 10);
        let (id, _) = b.place_hq(2, 2).unwrap();
        b.set_shape_label(id, Some("Alpha".to_string()));

        let mut fresh = board(10, 10);
        fresh.replay(b.shapes().to_vec());
        assert_eq!(fresh.shape(0).unwrap().label.as_deref(), Some("Alpha"));
    }

    #[test]
    fn scatter_random_paints_non_blocking_cells() {
        let mut b = board(10, 10);
        b.scatter_random(5);
        assert_eq!(b.shapes().len(), 5);
        assert!(b.cells().iter().all(|c| !c.collide));
    }

    #[test]
    fn scatter_random_on_empty_board_is_a_noop() {
        let mut b = BoardState::new();
        assert!(b.scatter_random(3).is_empty());
    }

    // ── properties ─────────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_resolve_cell_total(row in -5i32..15, col in -5i32..15) {
                let b = board(10, 10);
                let in_bounds = (0..10).contains(&row) && (0..10).contains(&col);
                prop_assert_eq!(b.resolve_cell(row, col).is_some(), in_bounds);
            }

            #[test]
            fn prop_tile_place_then_undo_is_identity(row in 0i32..10, col in 0i32..10) {
                let mut b = board(10, 10);
                let before: Vec<Cell> = b.cells().to_vec();
                b.place_tile(row, col).unwrap();
                b.undo().unwrap();
                prop_assert_eq!(b.cells(), &before[..]);
            }

            #[test]
            fn prop_failed_placement_never_mutates(
                first in (1i32..9, 1i32..9),
                second in (1i32..9, 1i32..9),
            ) {
                let mut b = board(10, 10);
                b.place_tile(first.0, first.1).unwrap();
                let before: Vec<Cell> = b.cells().to_vec();
                if b.place_tile(second.0, second.1).is_err() {
                    prop_assert_eq!(b.cells(), &before[..]);
                }
            }

            #[test]
            fn prop_collide_iff_blocking_shape(anchors in proptest::collection::vec((1i32..9, 1i32..9), 1..6)) {
                let mut b = board(10, 10);
                let mut covered = std::collections::HashSet::new();
                for (r, c) in anchors {
                    if b.place_hq(r, c).is_ok() {
                        covered.extend(Footprint::hq(r).resolve(r, c));
                    }
                }
                for cell in b.cells() {
                    prop_assert_eq!(cell.collide, covered.contains(&(cell.row, cell.col)));
                }
            }
        }
    }
}
