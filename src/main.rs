mod board;
mod config;
mod events;
mod panel;
mod pick;
mod surface;
mod tooltip;

#[cfg(target_arch = "wasm32")]
mod app;

fn main() {
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    if let Err(e) = app::mount() {
        web_sys::console::error_1(&e);
    }
}
