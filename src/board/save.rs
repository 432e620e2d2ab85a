//! Shape-list persistence to localStorage.
//!
//! The stored entry is a `{ version, shapes }` envelope around the shape
//! records. There is no migration story: an entry whose version does not
//! match, or that fails to parse, is discarded and the widget starts from
//! the grid as drawn. Storage failures are logged to the console and
//! otherwise ignored.

use serde::{Deserialize, Serialize};

use super::footprint::Footprint;
use super::grid::GridOptions;
use super::state::{Shape, ShapeKind};

#[cfg(any(target_arch = "wasm32", test))]
const SAVE_VERSION: u32 = 1;

/// localStorage key, in the widget's `HexGrid:` namespace.
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "HexGrid:hqs";

/// One persisted shape record: anchor, footprint, style snapshot, label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedShape {
    /// ShapeKind as u8 index (0=Hq, 1=Tile, 2=Decoration).
    pub kind: u8,
    pub row: i32,
    pub col: i32,
    pub footprint: Footprint,
    pub fill: String,
    pub collide: bool,
    pub indexes: bool,
    pub label: Option<String>,
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    shapes: Vec<SavedShape>,
}

fn kind_index(kind: ShapeKind) -> u8 {
    match kind {
        ShapeKind::Hq => 0,
        ShapeKind::Tile => 1,
        ShapeKind::Decoration => 2,
    }
}

fn kind_from_index(idx: u8) -> Option<ShapeKind> {
    match idx {
        0 => Some(ShapeKind::Hq),
        1 => Some(ShapeKind::Tile),
        2 => Some(ShapeKind::Decoration),
        _ => None,
    }
}

/// Extract the persistable records from the placed shape list.
pub fn extract_save(shapes: &[Shape]) -> Vec<SavedShape> {
    shapes
        .iter()
        .map(|s| SavedShape {
            kind: kind_index(s.kind),
            row: s.row,
            col: s.col,
            footprint: s.footprint.clone(),
            fill: s.style.fill_style.clone(),
            collide: s.style.collide,
            indexes: s.style.indexes,
            label: s.label.clone(),
        })
        .collect()
}

/// Rebuild shapes from saved records, styling them against the current
/// layout options. Records with an unknown kind are dropped.
pub fn apply_saved(saved: Vec<SavedShape>, base: &GridOptions) -> Vec<Shape> {
    saved
        .into_iter()
        .filter_map(|s| {
            let kind = kind_from_index(s.kind)?;
            let mut style = base.clone();
            style.fill_style = s.fill;
            style.collide = s.collide;
            style.indexes = s.indexes;
            Some(Shape {
                kind,
                row: s.row,
                col: s.col,
                footprint: s.footprint,
                style,
                label: s.label,
            })
        })
        .collect()
}

#[cfg(any(target_arch = "wasm32", test))]
fn encode(shapes: &[SavedShape]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SaveData {
        version: SAVE_VERSION,
        shapes: shapes.to_vec(),
    })
}

/// Parse a stored entry; `None` on a parse failure or version mismatch.
#[cfg(any(target_arch = "wasm32", test))]
fn decode(json: &str) -> Option<Vec<SavedShape>> {
    let data: SaveData = serde_json::from_str(json).ok()?;
    if data.version != SAVE_VERSION {
        return None;
    }
    Some(data.shapes)
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Persist the shape records. Failures are logged and swallowed.
#[cfg(target_arch = "wasm32")]
pub fn store(shapes: &[SavedShape]) {
    let json = match encode(shapes) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(&format!("hex board: save serialize failed: {e}").into());
            return;
        }
    };

    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            web_sys::console::warn_1(&format!("hex board: localStorage write failed: {e:?}").into());
        }
    }
}

/// Read the persisted shape records. A corrupt or version-mismatched entry
/// is removed and `None` is returned (the load becomes a no-op redraw).
#[cfg(target_arch = "wasm32")]
pub fn load() -> Option<Vec<SavedShape>> {
    let storage = get_storage()?;
    let json = storage.get_item(STORAGE_KEY).ok()??;

    match decode(&json) {
        Some(shapes) => Some(shapes),
        None => {
            web_sys::console::warn_1(
                &"hex board: discarding unreadable saved shapes".into(),
            );
            let _ = storage.remove_item(STORAGE_KEY);
            None
        }
    }
}

/// Erase the persisted shape list.
#[cfg(target_arch = "wasm32")]
pub fn clear() {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}
