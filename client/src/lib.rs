//! # client
//!
//! Leptos + WASM frontend for the admin console: the user directory, the
//! connected-user gallery and the read-only user viewer.
//!
//! Pages and components render; `state` holds every transition and derivation
//! as plain Rust so it compiles and tests natively; `net` is the typed client
//! for the remote admin API.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
