//! Raster-canvas surface.
//!
//! Cells have no individual regions here: the glue layer hit-tests clicks
//! through `pick::pixel_to_cell` against the cell geometry. Repainting a
//! cell redraws its hexagon, which also erases any previous label text.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use super::Surface;
use crate::board::grid::{polygon_points, Cell, GridOptions};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Options of the current layout, kept for repaints.
    opts: GridOptions,
}

impl CanvasSurface {
    pub fn new(host: &Element) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        host.set_inner_html("");
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        host.append_child(&canvas)?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            canvas,
            ctx,
            opts: GridOptions::default(),
        })
    }

    fn paint_hex(&self, cell: &Cell) {
        let points = polygon_points(
            cell.x,
            cell.y,
            self.opts.radius - self.opts.inset,
            self.opts.sides,
        );

        self.ctx.begin_path();
        if let Some(&(x0, y0)) = points.first() {
            self.ctx.move_to(x0, y0);
        }
        for &(px, py) in points.iter().skip(1) {
            self.ctx.line_to(px, py);
        }
        self.ctx.close_path();

        self.ctx.set_fill_style_str(&cell.fill);
        self.ctx.fill();
        self.ctx.set_line_width(self.opts.line_width);
        self.ctx.set_stroke_style_str(&self.opts.stroke_style);
        self.ctx.stroke();
    }
}

impl Surface for CanvasSurface {
    fn reset(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.ctx
            .clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_cell(&mut self, cell: &Cell, opts: &GridOptions) {
        self.opts = opts.clone();
        self.paint_hex(cell);
    }

    fn repaint_cell(&mut self, cell: &Cell) {
        self.paint_hex(cell);
    }

    fn set_label(&mut self, cell: &Cell, text: Option<&str>) {
        if let Some(text) = text {
            self.ctx
                .set_font("8px Verdana, Geneva, Tahoma, sans-serif");
            self.ctx.set_text_align("center");
            self.ctx.set_fill_style_str("black");
            let _ = self.ctx.fill_text(text, cell.x, cell.y);
        }
        // None needs no work: the repaint that precedes label removal
        // already redrew the hexagon over the old text.
    }
}
