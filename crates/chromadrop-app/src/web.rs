//! WebAssembly entry point and JS bindings.

use crate::panel::{PanelAction, PanelState};
use chromadrop_core::{
    Canvas, DocumentSandbox, ExtractorConfig, GradientKind, ImageUpload, PaletteExtractor, SandboxApi,
    build_descriptor,
};
use js_sys::Promise;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Resolution value for calls that find the panel mid-action.
fn busy(what: &str) -> Result<JsValue, JsValue> {
    log::warn!("{what} ignored: panel busy");
    Ok(JsValue::FALSE)
}

/// Initialize logging for the add-on.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Chromadrop logger was already initialized".into());
    }

    log::info!("Starting Chromadrop (WASM)");
}

/// Extract up to `count` colors from an encoded image. Returns an array of
/// `#rrggbb` strings, brightest first.
#[wasm_bindgen]
pub fn extract_palette(bytes: Vec<u8>, mime: &str, count: usize) -> Result<JsValue, JsValue> {
    let config = ExtractorConfig {
        color_count: count,
        ..ExtractorConfig::default()
    };
    let upload = ImageUpload::new("upload", mime, bytes);
    let palette = PaletteExtractor::new(config)
        .extract_upload(&upload)
        .map_err(js_error)?;
    serde_wasm_bindgen::to_value(palette.colors()).map_err(js_error)
}

/// CSS for a gradient over `colors` (an array of hex strings).
#[wasm_bindgen]
pub fn gradient_css(colors: JsValue, kind: &str, angle: i32) -> Result<String, JsValue> {
    let colors: Vec<String> = serde_wasm_bindgen::from_value(colors).map_err(js_error)?;
    let kind: GradientKind = kind.parse().map_err(js_error)?;
    let descriptor = build_descriptor(&colors, kind, angle as i64).map_err(js_error)?;
    Ok(descriptor.to_css())
}

type SharedSandbox = Rc<RefCell<DocumentSandbox<Canvas>>>;

/// The apply protocol over an in-memory document.
#[wasm_bindgen]
pub struct WasmSandbox {
    inner: SharedSandbox,
}

#[wasm_bindgen]
impl WasmSandbox {
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let mut canvas = Canvas::new();
        canvas.set_viewport_size(viewport_width, viewport_height);
        Self {
            inner: Rc::new(RefCell::new(DocumentSandbox::new(canvas))),
        }
    }

    /// Handle a JSON request such as `{"type":"applyColorToSelection","hex":"#ff0000"}`.
    pub fn handle_message(&self, message: &str) -> String {
        match self.inner.try_borrow_mut() {
            Ok(mut sandbox) => sandbox.handle_json(message),
            Err(_) => {
                log::warn!("Sandbox busy, message dropped");
                String::from(r#"{"ok":false}"#)
            }
        }
    }

    /// Resolves to `true` when the color was applied.
    pub fn apply_color_to_selection(&self, hex: String) -> Promise {
        let mut sandbox = Rc::clone(&self.inner);
        future_to_promise(async move {
            let ok = sandbox.apply_color_to_selection(&hex).await;
            Ok(JsValue::from_bool(ok))
        })
    }

    /// Resolves to `true` when the gradient was applied.
    pub fn apply_gradient_to_selection(&self, gradient_css: String) -> Promise {
        let mut sandbox = Rc::clone(&self.inner);
        future_to_promise(async move {
            let ok = sandbox.apply_gradient_to_selection(&gradient_css).await;
            Ok(JsValue::from_bool(ok))
        })
    }

    pub fn shape_count(&self) -> usize {
        self.inner.borrow().host().document.len()
    }

    pub fn selection_count(&self) -> usize {
        self.inner.borrow().host().selection.len()
    }
}

/// Panel model bound to a sandbox.
#[wasm_bindgen]
pub struct WasmPanel {
    state: Rc<RefCell<PanelState>>,
    sandbox: SharedSandbox,
}

#[wasm_bindgen]
impl WasmPanel {
    #[wasm_bindgen(constructor)]
    pub fn new(sandbox: &WasmSandbox) -> Self {
        let mut state = PanelState::default();
        state.initialized(Ok(()));
        Self {
            state: Rc::new(RefCell::new(state)),
            sandbox: Rc::clone(&sandbox.inner),
        }
    }

    /// Extract the palette of a picked file. Returns `false` and sets
    /// `upload_error` on failure.
    pub fn upload(&self, file_name: String, mime: String, bytes: Vec<u8>) -> bool {
        self.state
            .borrow_mut()
            .upload(&ImageUpload::new(file_name, mime, bytes))
    }

    pub fn colors(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.state.borrow().colors()).map_err(js_error)
    }

    pub fn upload_error(&self) -> Option<String> {
        self.state.borrow().upload_error.clone()
    }

    pub fn toggle_color(&self, hex: String) {
        self.state.borrow_mut().dispatch(PanelAction::ToggleColor(hex));
    }

    pub fn set_gradient_kind(&self, kind: &str) -> Result<(), JsValue> {
        let kind: GradientKind = kind.parse().map_err(js_error)?;
        self.state.borrow_mut().dispatch(PanelAction::SetGradientKind(kind));
        Ok(())
    }

    pub fn set_gradient_angle(&self, angle: i32) {
        self.state
            .borrow_mut()
            .dispatch(PanelAction::SetGradientAngle(angle as i64));
    }

    pub fn gradient_css(&self) -> Option<String> {
        self.state.borrow().gradient_css()
    }

    pub fn gradient_clipboard_text(&self) -> Option<String> {
        self.state.borrow().gradient_clipboard_text()
    }

    /// `{success, message}` or `undefined`.
    pub fn status(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.borrow().status).map_err(js_error)
    }

    pub fn dismiss_status(&self) {
        self.state.borrow_mut().dispatch(PanelAction::DismissStatus);
    }

    pub fn apply_color(&self, hex: String) -> Promise {
        let state = Rc::clone(&self.state);
        let mut sandbox = Rc::clone(&self.sandbox);
        future_to_promise(async move {
            let Ok(mut state) = state.try_borrow_mut() else {
                return busy("apply_color");
            };
            let ok = state.apply_color(&mut sandbox, &hex).await;
            Ok(JsValue::from_bool(ok))
        })
    }

    pub fn apply_gradient(&self) -> Promise {
        let state = Rc::clone(&self.state);
        let mut sandbox = Rc::clone(&self.sandbox);
        future_to_promise(async move {
            let Ok(mut state) = state.try_borrow_mut() else {
                return busy("apply_gradient");
            };
            let ok = state.apply_gradient(&mut sandbox).await;
            Ok(JsValue::from_bool(ok))
        })
    }
}
