//! SVG surface: one `<polygon>` per cell inside an `<svg>` root.
//!
//! Cell regions carry their own click and hover listeners, so interaction
//! resolves to (row, col) without any hit-testing math. The callbacks are
//! provided at construction time; the glue layer turns them into grid
//! notifications.

use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use super::Surface;
use crate::board::grid::{polygon_points, Cell, GridOptions};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Raised by a cell's visual region on direct interaction.
pub type CellCallback = Rc<dyn Fn(i32, i32, MouseEvent)>;

pub struct SvgSurface {
    document: Document,
    host: Element,
    root: Option<Element>,
    polygons: HashMap<(i32, i32), Element>,
    labels: HashMap<(i32, i32), Element>,
    on_activate: CellCallback,
    on_hover: CellCallback,
}

impl SvgSurface {
    pub fn new(
        host: Element,
        on_activate: CellCallback,
        on_hover: CellCallback,
    ) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self {
            document,
            host,
            root: None,
            polygons: HashMap::new(),
            labels: HashMap::new(),
            on_activate,
            on_hover,
        })
    }

    fn rebuild_root(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.host.set_inner_html("");
        self.polygons.clear();
        self.labels.clear();

        let root = self.document.create_element_ns(Some(SVG_NS), "svg")?;
        root.set_attribute("version", "1.1")?;
        root.set_attribute("width", &width.to_string())?;
        root.set_attribute("height", &height.to_string())?;
        self.host.append_child(&root)?;
        self.root = Some(root);
        Ok(())
    }

    fn create_polygon(&mut self, cell: &Cell, opts: &GridOptions) -> Result<(), JsValue> {
        let root = match &self.root {
            Some(r) => r,
            None => return Ok(()),
        };

        let polygon = self.document.create_element_ns(Some(SVG_NS), "polygon")?;
        polygon.set_attribute("points", &points_attr(cell, opts))?;
        polygon.set_attribute("fill", &cell.fill)?;
        polygon.set_attribute("stroke", &opts.stroke_style)?;
        polygon.set_attribute("stroke-width", &opts.line_width.to_string())?;
        polygon.set_attribute("title", &format!("{}:{}", cell.row, cell.col))?;

        listen(&polygon, "click", cell.row, cell.col, self.on_activate.clone())?;
        listen(&polygon, "mouseenter", cell.row, cell.col, self.on_hover.clone())?;

        root.append_child(&polygon)?;
        self.polygons.insert((cell.row, cell.col), polygon);
        Ok(())
    }

    fn update_label(&mut self, cell: &Cell, text: Option<&str>) -> Result<(), JsValue> {
        let key = (cell.row, cell.col);
        match text {
            Some(text) => {
                if let Some(existing) = self.labels.get(&key) {
                    existing.set_text_content(Some(text));
                    return Ok(());
                }
                let root = match &self.root {
                    Some(r) => r,
                    None => return Ok(()),
                };
                let label = self.document.create_element_ns(Some(SVG_NS), "text")?;
                label.set_attribute("x", &cell.x.to_string())?;
                label.set_attribute("y", &cell.y.to_string())?;
                label.set_attribute("text-anchor", "middle")?;
                label.set_attribute("class", "label-text")?;
                label.set_text_content(Some(text));
                root.append_child(&label)?;
                self.labels.insert(key, label);
            }
            None => {
                if let Some(label) = self.labels.remove(&key) {
                    label.remove();
                }
            }
        }
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn reset(&mut self, width: u32, height: u32) {
        if let Err(e) = self.rebuild_root(width, height) {
            web_sys::console::error_1(&e);
        }
    }

    fn draw_cell(&mut self, cell: &Cell, opts: &GridOptions) {
        if let Err(e) = self.create_polygon(cell, opts) {
            web_sys::console::error_1(&e);
        }
    }

    fn repaint_cell(&mut self, cell: &Cell) {
        if let Some(polygon) = self.polygons.get(&(cell.row, cell.col)) {
            if let Err(e) = polygon.set_attribute("fill", &cell.fill) {
                web_sys::console::error_1(&e);
            }
        }
    }

    fn set_label(&mut self, cell: &Cell, text: Option<&str>) {
        if let Err(e) = self.update_label(cell, text) {
            web_sys::console::error_1(&e);
        }
    }
}

fn points_attr(cell: &Cell, opts: &GridOptions) -> String {
    polygon_points(cell.x, cell.y, opts.radius - opts.inset, opts.sides)
        .into_iter()
        .map(|(px, py)| format!("{px},{py}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn listen(
    target: &Element,
    event: &str,
    row: i32,
    col: i32,
    callback: CellCallback,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
        callback(row, col, e);
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // The listener lives as long as the polygon; a relayout drops both.
    closure.forget();
    Ok(())
}
