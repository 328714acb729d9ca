//! Browser shell for the Mandelbrot explorer.

mod app;
mod components;
mod hooks;
mod rendering;

use leptos::*;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount_to_body(|| {
        view! {
            <app::App />
        }
    });
}
