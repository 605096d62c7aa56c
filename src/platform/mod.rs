//! Platform abstraction layer
//!
//! Handles browser/native differences for logging and default storage.

use crate::persistence::Storage;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::WebGame;

/// Install the logger for this platform. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the logger for this platform. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Browser entry point: sets up logging; the page then creates a `WebGame`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    init_logging();
    log::info!("Moon Hopper core loaded");
}

/// LocalStorage in the browser
#[cfg(target_arch = "wasm32")]
pub fn default_storage() -> Box<dyn Storage> {
    Box::new(crate::persistence::LocalStorage)
}

/// Files under `dir` on native; falls back to memory if the directory is unusable
#[cfg(not(target_arch = "wasm32"))]
pub fn default_storage(dir: &std::path::Path) -> Box<dyn Storage> {
    match crate::persistence::FileStorage::open(dir) {
        Ok(storage) => Box::new(storage),
        Err(err) => {
            log::warn!(
                "Cannot use {} for storage ({}), scores will not persist",
                dir.display(),
                err
            );
            Box::new(crate::persistence::MemoryStorage::new())
        }
    }
}
