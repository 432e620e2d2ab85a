//! Browser entry glue: reads the widget configuration, builds the surface,
//! board and control panel, and wires window-level listeners.
//!
//! The page hosts two elements: the grid host (`#hex-grid` by default,
//! configured via `data-*` attributes) and the panel host
//! (`#hex-grid-ctrl`, pointing at its grid with `data-grid`).

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, KeyboardEvent, MouseEvent};

use crate::board::grid::GridOptions;
use crate::board::{HexBoard, DEFAULT_RADIUS};
use crate::config::{self, RendererKind};
use crate::events::{EventBus, GridEvent, Pointer};
use crate::panel;
use crate::pick;
use crate::surface::canvas::CanvasSurface;
use crate::surface::svg::{CellCallback, SvgSurface};
use crate::surface::Surface;

pub type SharedBoard = Rc<RefCell<HexBoard<Box<dyn Surface>>>>;

const GRID_HOST_ID: &str = "hex-grid";
const PANEL_HOST_ID: &str = "hex-grid-ctrl";

pub fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let panel_host = document
        .get_element_by_id(PANEL_HOST_ID)
        .ok_or_else(|| JsValue::from_str("panel host element missing"))?;
    let grid_id = panel_host
        .get_attribute("data-grid")
        .unwrap_or_else(|| GRID_HOST_ID.to_string());
    let grid_host = document
        .get_element_by_id(&grid_id)
        .ok_or_else(|| JsValue::from_str("grid host element missing"))?;

    let cfg = config::from_element(&grid_host);
    let base_opts = GridOptions {
        radius: DEFAULT_RADIUS,
        fill_style: cfg.fill_style.clone().unwrap_or_default(),
        ..GridOptions::default()
    };

    let bus = Rc::new(EventBus::new());

    // The hover callback needs the board, which needs the surface, which
    // needs the callbacks; a one-shot slot breaks the cycle.
    let board_slot: Rc<OnceCell<SharedBoard>> = Rc::new(OnceCell::new());

    let on_activate: CellCallback = {
        let bus = bus.clone();
        Rc::new(move |row, col, e: MouseEvent| {
            bus.emit(&GridEvent::CellActivated {
                row,
                col,
                pointer: pointer_of(&e),
            });
        })
    };

    let on_hover: CellCallback = {
        let bus = bus.clone();
        let slot = board_slot.clone();
        Rc::new(move |row, col, e: MouseEvent| {
            let Some(board) = slot.get() else { return };
            let hovered = board.borrow().hovered_shape(row, col);
            if let Some((shape, label)) = hovered {
                bus.emit(&GridEvent::CellHovered {
                    shape,
                    label,
                    pointer: pointer_of(&e),
                });
            }
        })
    };

    let surface: Box<dyn Surface> = match cfg.renderer {
        RendererKind::Svg => Box::new(SvgSurface::new(
            grid_host.clone(),
            on_activate.clone(),
            on_hover,
        )?),
        RendererKind::Canvas => Box::new(CanvasSurface::new(&grid_host)?),
    };

    let board: SharedBoard = Rc::new(RefCell::new(HexBoard::new(surface)));
    let _ = board_slot.set(board.clone());

    // Canvas cells have no regions of their own; resolve clicks by hit
    // testing against the cell geometry.
    if cfg.renderer == RendererKind::Canvas {
        wire_canvas_clicks(&grid_host, board.clone(), on_activate)?;
    }

    panel::install(
        &document,
        &panel_host,
        board.clone(),
        bus.clone(),
        cfg.clone(),
        base_opts.clone(),
    )?;

    // Ctrl+Z reverses the latest placement.
    {
        let board = board.clone();
        let keyup = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            if e.ctrl_key() && e.key() == "z" {
                board.borrow_mut().undo();
            }
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
        keyup.forget();
    }

    let cells = board.borrow_mut().draw(cfg.width, cfg.height, base_opts);
    bus.emit(&GridEvent::AfterLayout { cells });

    if cfg.random_cells > 0 {
        board.borrow_mut().scatter_random(cfg.random_cells);
    }

    Ok(())
}

fn pointer_of(e: &MouseEvent) -> Pointer {
    Pointer {
        x: e.client_x() as f64,
        y: e.client_y() as f64,
    }
}

fn wire_canvas_clicks(
    host: &Element,
    board: SharedBoard,
    on_activate: CellCallback,
) -> Result<(), JsValue> {
    let rect_source = host.clone();
    let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
        let rect = rect_source.get_bounding_client_rect();
        let px = e.client_x() as f64 - rect.left();
        let py = e.client_y() as f64 - rect.top();

        let hit = {
            let b = board.borrow();
            let radius = b.state().options().radius;
            pick::pixel_to_cell(px, py, b.state().cells(), radius)
        };
        if let Some((row, col)) = hit {
            on_activate(row, col, e);
        }
    }) as Box<dyn FnMut(_)>);
    host.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
