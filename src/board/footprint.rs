//! Shape footprints: the relative cell offsets a placement occupies,
//! grouped by row.
//!
//! Two row encodings exist. Explicit rows list `(dr, dc)` offsets. Span
//! rows give an inclusive column range; their row delta is the row's index
//! in the table, and the range shifts left by one on even-index rows when
//! the anchor row is odd. The decoration tables below are carried over
//! verbatim from the original layout data — no generative rule is inferred
//! for them.

use serde::{Deserialize, Serialize};

/// One row of a footprint table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FootprintRow {
    /// Explicit `(dr, dc)` offsets.
    Cells(Vec<(i32, i32)>),
    /// Inclusive column span; the row delta is the table index.
    Span(i32, i32),
}

/// The set of relative cell offsets a shape occupies around its anchor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint(pub Vec<FootprintRow>);

fn spans(table: &[(i32, i32)]) -> Footprint {
    Footprint(table.iter().map(|&(a, b)| FootprintRow::Span(a, b)).collect())
}

impl Footprint {
    /// A single-cell footprint.
    pub fn tile() -> Self {
        Footprint(vec![FootprintRow::Cells(vec![(0, 0)])])
    }

    /// HQ footprint, chosen by anchor-row parity. The two tables come from
    /// different iterations of the layout and are kept as-is.
    pub fn hq(anchor_row: i32) -> Self {
        if anchor_row.rem_euclid(2) != 0 {
            Footprint(vec![
                FootprintRow::Cells(vec![(0, -1), (-1, 0), (-1, 1)]),
                FootprintRow::Cells(vec![(0, 0)]),
                FootprintRow::Cells(vec![(0, 1), (1, 1), (1, 0)]),
            ])
        } else {
            Footprint(vec![
                FootprintRow::Cells(vec![(0, -1)]),
                FootprintRow::Cells(vec![(-1, -1), (0, 0), (1, -1)]),
                FootprintRow::Cells(vec![(-1, 0), (1, 0)]),
                FootprintRow::Cells(vec![(0, 1)]),
            ])
        }
    }

    /// Outer mud patch.
    pub fn mud_outer() -> Self {
        spans(&[
            (0, 36), (-1, 36), (-1, 37), (-2, 37), (-2, 38), (-3, 38), (-3, 39),
            (-4, 39), (-4, 40), (-5, 40), (-5, 41), (-6, 41), (-6, 42), (-7, 42),
            (-7, 43), (-8, 43), (-8, 44), (-9, 44), (-9, 45), (-10, 45), (-10, 46),
            (-11, 46), (-11, 47), (-12, 47), (-12, 48), (-13, 48), (-13, 49),
            (-14, 49), (-14, 50), (-15, 50), (-15, 51), (-16, 51), (-16, 52),
            (-17, 52), (-17, 53), (-18, 53), (-18, 54), (-18, 53), (-17, 53),
            (-17, 52), (-16, 52), (-16, 51), (-15, 51), (-15, 50), (-14, 50),
            (-14, 49), (-13, 49), (-13, 48), (-12, 48), (-12, 47), (-11, 47),
            (-11, 46), (-10, 46), (-10, 45), (-9, 45), (-9, 44), (-8, 44),
            (-8, 43), (-7, 43), (-7, 42), (-6, 42), (-6, 41), (-5, 41), (-5, 40),
            (-4, 40), (-4, 39), (-3, 39), (-3, 38), (-2, 38), (-2, 37), (-1, 37),
            (-1, 36), (0, 36),
        ])
    }

    /// Inner mud patch.
    pub fn mud_inner() -> Self {
        spans(&[
            (0, 18), (-1, 18), (-1, 19), (-2, 19), (-2, 20), (-3, 20), (-3, 21),
            (-4, 21), (-4, 22), (-5, 22), (-5, 23), (-6, 23), (-6, 24), (-7, 24),
            (-7, 25), (-8, 25), (-8, 26), (-9, 26), (-9, 27), (-9, 26), (-8, 26),
            (-8, 25), (-7, 25), (-7, 24), (-6, 24), (-6, 23), (-5, 23), (-5, 22),
            (-4, 22), (-4, 21), (-3, 21), (-3, 20), (-2, 20), (-2, 19), (-1, 19),
            (-1, 18), (0, 18),
        ])
    }

    /// Small satellite speck placed around the inner patch.
    pub fn mud_speck() -> Self {
        spans(&[
            (0, 4), (-1, 4), (-1, 5), (-2, 5), (-2, 6), (-2, 5), (-1, 5),
            (-1, 4), (0, 4),
        ])
    }

    /// Highlight dot placed around the inner patch.
    pub fn mud_dot() -> Self {
        spans(&[(0, 2), (-1, 2), (-1, 3), (-1, 2), (0, 2)])
    }

    /// Resolve to absolute (row, col) coordinates for the given anchor.
    pub fn resolve(&self, anchor_row: i32, anchor_col: i32) -> Vec<(i32, i32)> {
        let odd_anchor = anchor_row.rem_euclid(2) != 0;
        let mut out = Vec::new();
        for (idx, row) in self.0.iter().enumerate() {
            match row {
                FootprintRow::Cells(offsets) => {
                    for &(dr, dc) in offsets {
                        out.push((anchor_row + dr, anchor_col + dc));
                    }
                }
                FootprintRow::Span(start, end) => {
                    for c in *start..=*end {
                        let dc = if odd_anchor && idx % 2 == 0 { c - 1 } else { c };
                        out.push((anchor_row + idx as i32, anchor_col + dc));
                    }
                }
            }
        }
        out
    }
}
