// slideshow_core: Rust/WASM slideshow controller.
// All state and timing decisions live here; the page only supplies markup and styling.

mod controller;
mod drivers;
mod error;
mod gesture;
mod navigation;
mod progress;
mod types;
mod video;
#[cfg(target_arch = "wasm32")]
mod web;

use wasm_bindgen::prelude::*;

pub use controller::Slideshow;
pub use drivers::{FullscreenDriver, MediaDriver, TimerDriver, ViewRenderer};
pub use error::{Result, SlideshowError};
pub use gesture::SwipeTracker;
pub use navigation::{counter_text, wrap_index};
pub use progress::{elapsed_fraction, ProgressRun};
pub use types::*;
pub use video::{VideoPhase, VideoTransition};

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    web::install_console_logger(log::LevelFilter::Info);
}

/// Handle to a mounted slideshow, exposed to JavaScript.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct SlideshowHandle {
    inner: std::rc::Rc<std::cell::RefCell<web::WebSlideshow>>,
}

/// Mount the slideshow on the current document.
/// `config_json` follows `SlideshowConfig`; `"{}"` uses the defaults.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn mount(config_json: &str) -> std::result::Result<SlideshowHandle, JsValue> {
    let config = SlideshowConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let inner = web::mount(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(SlideshowHandle { inner })
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl SlideshowHandle {
    pub fn next(&self) {
        self.inner.borrow_mut().next();
    }

    pub fn prev(&self) {
        self.inner.borrow_mut().prev();
    }

    pub fn go_to(&self, index: i32) {
        self.inner.borrow_mut().go_to(i64::from(index));
    }

    pub fn toggle_autoplay(&self) {
        self.inner.borrow_mut().toggle_autoplay();
    }

    pub fn toggle_fullscreen(&self) {
        self.inner.borrow_mut().toggle_fullscreen();
    }

    pub fn index(&self) -> usize {
        self.inner.borrow().index()
    }

    /// Current state as JSON (`SlideshowState`).
    pub fn state_json(&self) -> std::result::Result<String, JsValue> {
        serde_json::to_string(&self.inner.borrow().state())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
