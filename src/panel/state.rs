//! Placement-mode state and activation routing — the panel's pure half.
//!
//! The mode is an explicit field, not ambient page state; DOM glue in the
//! parent module reads and writes it through a shared cell.

use crate::board::state::{ShapeId, ShapeKind};

/// Current placement mode. At most one mode button is marked selected.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PlacementMode {
    #[default]
    None,
    Hq,
    Tile,
}

impl PlacementMode {
    /// Apply a mode-button press: picking the active mode clears it,
    /// picking the other mode switches directly.
    pub fn toggle(self, picked: PlacementMode) -> PlacementMode {
        if self == picked {
            PlacementMode::None
        } else {
            picked
        }
    }
}

/// What a cell activation should do, given the mode and the activated
/// cell's owning shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Routed {
    PlaceHq,
    PlaceTile,
    /// Mode is off and the cell belongs to an HQ: edit its label.
    EditLabel(ShapeId),
    Nothing,
}

pub fn route_activation(
    mode: PlacementMode,
    owner: Option<(ShapeId, ShapeKind)>,
) -> Routed {
    match mode {
        PlacementMode::Hq => Routed::PlaceHq,
        PlacementMode::Tile => Routed::PlaceTile,
        PlacementMode::None => match owner {
            Some((id, ShapeKind::Hq)) => Routed::EditLabel(id),
            _ => Routed::Nothing,
        },
    }
}
