//! Control panel: mode buttons, persistence actions, the HQ label dialog
//! and hover tooltips.
//!
//! Mode and routing rules live in [`state`] as pure logic; this module is
//! the DOM glue around them. The panel holds its grid reference and mode
//! in explicit shared cells passed through `install`, not in page-global
//! state.

pub mod state;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Element, HtmlDialogElement, HtmlElement, HtmlInputElement, MouseEvent};

#[cfg(target_arch = "wasm32")]
use crate::app::SharedBoard;
#[cfg(target_arch = "wasm32")]
use crate::board::grid::GridOptions;
#[cfg(target_arch = "wasm32")]
use crate::board::save;
#[cfg(target_arch = "wasm32")]
use crate::board::state::ShapeId;
#[cfg(target_arch = "wasm32")]
use crate::config::WidgetConfig;
#[cfg(target_arch = "wasm32")]
use crate::events::{EventBus, GridEvent};
#[cfg(target_arch = "wasm32")]
use crate::tooltip::TooltipTimer;
#[cfg(target_arch = "wasm32")]
use state::{PlacementMode, Routed};

#[cfg(target_arch = "wasm32")]
const PANEL_HTML: &str = r#"<style>
#control {
    position: fixed;
    top: 0;
    right: 0;
    width: 100px;
    border-left: 1px solid #ccc;
    border-bottom: 1px solid #ccc;
    background: #fff;
    display: flex;
    flex-direction: column;
    font-family: Arial, sans-serif;
}
#control h4 { margin: 0; padding: 5px; }
#control ul { list-style: none; margin: 0; padding-inline-start: 0; }
.button {
    font: bold 13px Arial;
    background-color: #eee;
    color: #333;
    padding: 6px;
    border: 1px solid #ccc;
    width: 100%;
    display: inline-block;
    cursor: pointer;
}
.button.selected { color: #000; font-weight: bold; background-color: #ddd; }
dialog { border: 1px solid #ccc; border-radius: 4px; padding: 6px; }
.tooltip {
    position: fixed;
    border: 1px solid #ccc;
    border-radius: 4px;
    padding: 6px;
    z-index: 2;
    background: #fff;
}
</style>
<div id="control">
    <div class="row">
        <h4>Markers</h4>
        <ul>
            <li><span class="button" id="select-hq">+HQ</span></li>
            <li><span class="button" id="select-tile">+Tile</span></li>
        </ul>
    </div>
    <div class="row">
        <span class="button" id="refresh">Clear all</span>
        <span class="button" id="load">Load</span>
        <span class="button" id="save">Save</span>
    </div>
</div>
<dialog id="dialog">
    <form>
        <div class="form-group">
            <label for="hq-owner">HQ Owner</label>
            <input type="text" id="hq-owner" name="hq-owner" />
        </div>
        <p><button type="button" id="save-hq" autofocus>Save + Close</button></p>
    </form>
</dialog>"#;

/// Wire the control panel into its host element and subscribe it to the
/// grid's notifications.
#[cfg(target_arch = "wasm32")]
pub fn install(
    document: &Document,
    host: &Element,
    board: SharedBoard,
    bus: Rc<EventBus>,
    cfg: WidgetConfig,
    base_opts: GridOptions,
) -> Result<(), JsValue> {
    host.set_inner_html(PANEL_HTML);

    let select = |id: &str| -> Result<Element, JsValue> {
        host.query_selector(&format!("#{id}"))?
            .ok_or_else(|| JsValue::from_str(&format!("panel element #{id} missing")))
    };

    let hq_button = select("select-hq")?;
    let tile_button = select("select-tile")?;
    let dialog: HtmlDialogElement = select("dialog")?.dyn_into()?;
    let owner_input: HtmlInputElement = select("hq-owner")?.dyn_into()?;

    let mode = Rc::new(RefCell::new(PlacementMode::None));
    let edit_target: Rc<RefCell<Option<ShapeId>>> = Rc::new(RefCell::new(None));
    let tooltips = Rc::new(RefCell::new(TooltipTimer::new()));

    // ── mode buttons ───────────────────────────────────────────────

    for (button, picked) in [
        (hq_button.clone(), PlacementMode::Hq),
        (tile_button.clone(), PlacementMode::Tile),
    ] {
        let mode = mode.clone();
        let hq_button = hq_button.clone();
        let tile_button = tile_button.clone();
        on_click(&button, move |_| {
            let next = mode.borrow().toggle(picked);
            *mode.borrow_mut() = next;
            sync_selected(&hq_button, &tile_button, next);
        })?;
    }

    // ── persistence actions ────────────────────────────────────────

    {
        let board = board.clone();
        on_click(&select("save")?, move |_| {
            let payload = board.borrow().save_payload();
            save::store(&payload);
        })?;
    }

    {
        let board = board.clone();
        let bus = bus.clone();
        let cfg = cfg.clone();
        let base_opts = base_opts.clone();
        on_click(&select("load")?, move |_| {
            // Absent or unreadable saved data degrades to a plain redraw.
            let saved = save::load().unwrap_or_default();
            let cells = board.borrow_mut().restore(
                saved,
                cfg.width,
                cfg.height,
                base_opts.clone(),
            );
            bus.emit(&GridEvent::AfterLayout { cells });
        })?;
    }

    on_click(&select("refresh")?, move |_| {
        save::clear();
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    })?;

    // ── label dialog commit ────────────────────────────────────────

    {
        let board = board.clone();
        let edit_target = edit_target.clone();
        let dialog = dialog.clone();
        let owner_input = owner_input.clone();
        on_click(&select("save-hq")?, move |_| {
            if let Some(id) = edit_target.borrow_mut().take() {
                let value = owner_input.value();
                let label = (!value.is_empty()).then_some(value);
                board.borrow_mut().set_shape_label(id, label);
            }
            dialog.close();
        })?;
    }

    // ── grid notifications ─────────────────────────────────────────

    {
        let board = board.clone();
        let mode = mode.clone();
        let document = document.clone();
        let host = host.clone();
        bus.subscribe(move |event| match *event {
            GridEvent::CellActivated { row, col, .. } => {
                let routed = {
                    let b = board.borrow();
                    let owner = b.state().shape_at(row, col).and_then(|id| {
                        b.state().shape(id).map(|shape| (id, shape.kind))
                    });
                    state::route_activation(*mode.borrow(), owner)
                };

                match routed {
                    Routed::PlaceHq => {
                        let result = board.borrow_mut().place_hq(row, col);
                        if let Err(e) = result {
                            alert(&e.to_string());
                        }
                    }
                    Routed::PlaceTile => {
                        let result = board.borrow_mut().place_tile(row, col);
                        if let Err(e) = result {
                            alert(&e.to_string());
                        }
                    }
                    Routed::EditLabel(id) => {
                        let label = board
                            .borrow()
                            .state()
                            .shape(id)
                            .and_then(|s| s.label.clone());
                        owner_input.set_value(label.as_deref().unwrap_or(""));
                        *edit_target.borrow_mut() = Some(id);
                        let _ = dialog.show_modal();
                    }
                    Routed::Nothing => {}
                }
            }
            GridEvent::CellHovered {
                shape,
                ref label,
                pointer,
            } => {
                let Some(label) = label else { return };
                if !tooltips.borrow_mut().trigger(shape, js_sys::Date::now()) {
                    return;
                }
                if let Err(e) =
                    show_tooltip(&document, &host, &tooltips, shape, label, pointer.x, pointer.y)
                {
                    web_sys::console::error_1(&e);
                }
            }
            GridEvent::AfterLayout { .. } => {}
        });
    }

    Ok(())
}

/// Keep at most one mode button marked selected.
#[cfg(target_arch = "wasm32")]
fn sync_selected(hq_button: &Element, tile_button: &Element, mode: PlacementMode) {
    let _ = hq_button.class_list().remove_1("selected");
    let _ = tile_button.class_list().remove_1("selected");
    let marked = match mode {
        PlacementMode::Hq => Some(hq_button),
        PlacementMode::Tile => Some(tile_button),
        PlacementMode::None => None,
    };
    if let Some(button) = marked {
        let _ = button.class_list().add_1("selected");
    }
}

/// Show a transient tooltip near the pointer and schedule its dismissal.
#[cfg(target_arch = "wasm32")]
fn show_tooltip(
    document: &Document,
    host: &Element,
    tooltips: &Rc<RefCell<TooltipTimer>>,
    shape: ShapeId,
    label: &str,
    x: f64,
    y: f64,
) -> Result<(), JsValue> {
    let tip: HtmlElement = document.create_element("div")?.dyn_into()?;
    tip.set_class_name("tooltip");
    tip.set_id(&format!("shape-tooltip-{shape}"));
    tip.set_text_content(Some(label));
    tip.style().set_property("left", &format!("{x}px"))?;
    tip.style().set_property("top", &format!("{}px", y - 10.0))?;
    host.append_child(&tip)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let tooltips = tooltips.clone();
    let dismiss = Closure::once_into_js(move || {
        tip.remove();
        tooltips.borrow_mut().hide(shape);
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        dismiss.unchecked_ref(),
        crate::tooltip::DISMISS_AFTER_MS as i32,
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn on_click(target: &Element, handler: impl FnMut(MouseEvent) + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
