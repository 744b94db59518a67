//! Chromadrop Application
//!
//! The panel model shared by the browser add-on and the native command line,
//! plus the WASM bindings.

mod panel;

pub use panel::{CopiedItem, PanelAction, PanelPhase, PanelState, StatusMessage};

#[cfg(feature = "native")]
pub mod cli;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WasmPanel, WasmSandbox, extract_palette, gradient_css, start};
