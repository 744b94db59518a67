//! The panel-to-sandbox apply protocol.
//!
//! The panel never touches the document. It asks the sandbox to apply a paint
//! and gets back a success flag; failures are logged on the sandbox side.

use crate::bridge::{apply_color, apply_gradient};
use crate::config::BridgeConfig;
use crate::host::DocumentHost;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Operations the sandbox exposes to the panel. Calls never fail; a `false`
/// result means nothing was changed.
pub trait SandboxApi {
    fn apply_color_to_selection(&mut self, hex: &str) -> BoxFuture<'_, bool>;

    fn apply_gradient_to_selection(&mut self, gradient_css: &str) -> BoxFuture<'_, bool>;
}

/// Messages sent from the panel to the sandbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SandboxRequest {
    #[serde(rename_all = "camelCase")]
    ApplyColorToSelection { hex: String },
    #[serde(rename_all = "camelCase")]
    ApplyGradientToSelection { gradient_css: String },
}

/// Reply to a [`SandboxRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxResponse {
    pub ok: bool,
}

/// Serves the apply protocol against a document host.
pub struct DocumentSandbox<H> {
    host: H,
    config: BridgeConfig,
}

impl<H: DocumentHost> DocumentSandbox<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, BridgeConfig::default())
    }

    pub fn with_config(host: H, config: BridgeConfig) -> Self {
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Dispatch one request.
    pub fn handle(&mut self, request: &SandboxRequest) -> SandboxResponse {
        let ok = match request {
            SandboxRequest::ApplyColorToSelection { hex } => {
                apply_color(&mut self.host, hex, &self.config)
            }
            SandboxRequest::ApplyGradientToSelection { gradient_css } => {
                apply_gradient(&mut self.host, gradient_css, &self.config)
            }
        };
        SandboxResponse { ok }
    }

    /// Dispatch a JSON-encoded request and encode the reply. Malformed
    /// messages are answered with `{"ok":false}`.
    pub fn handle_json(&mut self, message: &str) -> String {
        let response = match serde_json::from_str::<SandboxRequest>(message) {
            Ok(request) => self.handle(&request),
            Err(err) => {
                log::error!("Malformed sandbox message: {err}");
                SandboxResponse { ok: false }
            }
        };
        serde_json::to_string(&response).unwrap_or_else(|_| String::from(r#"{"ok":false}"#))
    }
}

impl<H: DocumentHost> SandboxApi for DocumentSandbox<H> {
    fn apply_color_to_selection(&mut self, hex: &str) -> BoxFuture<'_, bool> {
        let request = SandboxRequest::ApplyColorToSelection {
            hex: hex.to_string(),
        };
        Box::pin(async move { self.handle(&request).ok })
    }

    fn apply_gradient_to_selection(&mut self, gradient_css: &str) -> BoxFuture<'_, bool> {
        let request = SandboxRequest::ApplyGradientToSelection {
            gradient_css: gradient_css.to_string(),
        };
        Box::pin(async move { self.handle(&request).ok })
    }
}

/// A sandbox shared with other callers. A call that finds it already
/// borrowed resolves to `false` without touching the document.
impl<S: SandboxApi> SandboxApi for Rc<RefCell<S>> {
    fn apply_color_to_selection(&mut self, hex: &str) -> BoxFuture<'_, bool> {
        let hex = hex.to_string();
        Box::pin(async move {
            match self.try_borrow_mut() {
                Ok(mut sandbox) => sandbox.apply_color_to_selection(&hex).await,
                Err(_) => {
                    log::warn!("Sandbox busy, color {hex} not applied");
                    false
                }
            }
        })
    }

    fn apply_gradient_to_selection(&mut self, gradient_css: &str) -> BoxFuture<'_, bool> {
        let gradient_css = gradient_css.to_string();
        Box::pin(async move {
            match self.try_borrow_mut() {
                Ok(mut sandbox) => sandbox.apply_gradient_to_selection(&gradient_css).await,
                Err(_) => {
                    log::warn!("Sandbox busy, gradient not applied");
                    false
                }
            }
        })
    }
}
