//! Panel state: the model behind the add-on's sidebar.
//!
//! The panel owns the extracted palette, the colors picked for a gradient and
//! the inline status line. It never touches the document; colors and
//! gradients go to the sandbox through [`SandboxApi`].

use chromadrop_core::{
    ChromaConfig, ChromaError, ColorSelection, GradientDescriptor, GradientKind, ImageUpload, Palette,
    PaletteExtractor, SandboxApi, clipboard_text,
};
use serde::Serialize;

/// Startup phase of the panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "phase", content = "message", rename_all = "snake_case")]
pub enum PanelPhase {
    /// Waiting for the sandbox connection.
    #[default]
    Loading,
    Ready,
    /// The sandbox could not be reached; the whole panel shows this error.
    InitError(String),
}

/// Transient feedback shown under the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub success: bool,
    pub message: String,
}

impl StatusMessage {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Actions the panel view can emit that don't need the sandbox.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// Toggle a palette color in the gradient selection.
    ToggleColor(String),
    /// Switch between linear and radial gradients.
    SetGradientKind(GradientKind),
    /// Change the linear gradient angle in degrees.
    SetGradientAngle(i64),
    /// Remember that a color's hex code was copied.
    CopyColor(usize),
    /// Remember that the gradient CSS was copied.
    CopyGradient,
    /// Hide the status line and copy feedback.
    DismissStatus,
    /// Retry initialization after an error.
    Retry,
}

/// What the user copied last, for the "Copied!" badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopiedItem {
    Color(usize),
    Gradient,
}

/// Panel model.
#[derive(Debug, Clone)]
pub struct PanelState {
    pub phase: PanelPhase,
    /// Last successfully extracted palette. Kept when a later upload fails.
    pub palette: Option<Palette>,
    /// Upload or extraction error, shown in place of the palette header.
    pub upload_error: Option<String>,
    /// Colors picked for the gradient, in pick order.
    pub selection: ColorSelection,
    pub gradient_kind: GradientKind,
    /// Linear gradient angle in degrees.
    pub gradient_angle: i64,
    pub status: Option<StatusMessage>,
    /// Set while an extraction or apply call is running.
    pub busy: bool,
    pub copied: Option<CopiedItem>,
    extractor: PaletteExtractor,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(ChromaConfig::default())
    }
}

impl PanelState {
    pub fn new(config: ChromaConfig) -> Self {
        Self {
            phase: PanelPhase::Loading,
            palette: None,
            upload_error: None,
            selection: ColorSelection::new(),
            gradient_kind: GradientKind::Linear,
            gradient_angle: 90,
            status: None,
            busy: false,
            copied: None,
            extractor: PaletteExtractor::new(config.extractor),
        }
    }

    /// Record the outcome of connecting to the sandbox.
    pub fn initialized(&mut self, result: Result<(), String>) {
        self.phase = match result {
            Ok(()) => PanelPhase::Ready,
            Err(message) => {
                log::error!("Failed to initialize panel: {message}");
                PanelPhase::InitError(message)
            }
        };
    }

    pub fn is_ready(&self) -> bool {
        self.phase == PanelPhase::Ready
    }

    /// Extract the palette of an uploaded file.
    ///
    /// The gradient selection is cleared on every attempt. On failure the
    /// previous palette stays and an error message is set.
    pub fn upload(&mut self, upload: &ImageUpload) -> bool {
        if self.busy {
            log::warn!("Upload of {} ignored: panel busy", upload.file_name);
            return false;
        }
        self.selection.clear();
        self.upload_error = None;
        self.busy = true;
        let result = self.extractor.extract_upload(upload);
        self.busy = false;

        match result {
            Ok(palette) => {
                log::info!("Extracted {} colors from {}", palette.len(), upload.file_name);
                self.palette = Some(palette);
                true
            }
            Err(err) => {
                log::error!("Color extraction failed for {}: {err}", upload.file_name);
                self.upload_error = Some(upload_error_message(&err).to_string());
                false
            }
        }
    }

    /// Palette colors, brightest first.
    pub fn colors(&self) -> &[String] {
        self.palette.as_ref().map(Palette::colors).unwrap_or_default()
    }

    pub fn dispatch(&mut self, action: PanelAction) {
        match action {
            PanelAction::ToggleColor(hex) => {
                self.selection.toggle(&hex);
            }
            PanelAction::SetGradientKind(kind) => self.gradient_kind = kind,
            PanelAction::SetGradientAngle(angle) => self.gradient_angle = angle,
            PanelAction::CopyColor(index) => {
                if index < self.colors().len() {
                    self.copied = Some(CopiedItem::Color(index));
                }
            }
            PanelAction::CopyGradient => {
                if self.gradient_css().is_some() {
                    self.copied = Some(CopiedItem::Gradient);
                }
            }
            PanelAction::DismissStatus => {
                self.status = None;
                self.copied = None;
            }
            PanelAction::Retry => {
                if matches!(self.phase, PanelPhase::InitError(_)) {
                    self.phase = PanelPhase::Loading;
                }
            }
        }
    }

    /// Descriptor for the picked colors; `None` until two colors are picked.
    pub fn gradient(&self) -> Option<GradientDescriptor> {
        if self.selection.len() < 2 {
            return None;
        }
        GradientDescriptor::build(self.selection.colors(), self.gradient_kind, self.gradient_angle).ok()
    }

    pub fn gradient_css(&self) -> Option<String> {
        self.gradient().map(|d| d.to_css())
    }

    /// `background: <css>;` for the copy button.
    pub fn gradient_clipboard_text(&self) -> Option<String> {
        self.gradient_css().map(|css| clipboard_text(&css))
    }

    /// Apply a palette color through the sandbox and update the status line.
    pub async fn apply_color(&mut self, sandbox: &mut dyn SandboxApi, hex: &str) -> bool {
        if !self.begin_apply() {
            return false;
        }
        let ok = sandbox.apply_color_to_selection(hex).await;
        self.finish_apply(ok, "Color applied!", "Failed to apply color");
        ok
    }

    /// Apply the current gradient through the sandbox and update the status line.
    pub async fn apply_gradient(&mut self, sandbox: &mut dyn SandboxApi) -> bool {
        let Some(css) = self.gradient_css() else {
            self.status = Some(StatusMessage::error("Select at least two colors"));
            return false;
        };
        if !self.begin_apply() {
            return false;
        }
        let ok = sandbox.apply_gradient_to_selection(&css).await;
        self.finish_apply(ok, "Gradient applied!", "Failed to apply gradient");
        ok
    }

    fn begin_apply(&mut self) -> bool {
        if !self.is_ready() {
            self.status = Some(StatusMessage::error("Plugin not ready"));
            return false;
        }
        if self.busy {
            log::warn!("Apply ignored: panel busy");
            return false;
        }
        self.busy = true;
        true
    }

    fn finish_apply(&mut self, ok: bool, success: &str, failure: &str) {
        self.busy = false;
        self.status = Some(if ok {
            StatusMessage::ok(success)
        } else {
            StatusMessage::error(failure)
        });
    }
}

fn upload_error_message(err: &ChromaError) -> &'static str {
    match err {
        ChromaError::UnsupportedMediaType(_) => "Please upload an image file",
        ChromaError::ImageDecodeFailure(_) => "Failed to load image. Please try another one.",
        _ => "Failed to extract colors. Please try another image.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromadrop_core::{BoxFuture, Canvas, DocumentSandbox, color_distance};
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
                return result;
            }
        }
    }

    /// Records requests and answers with a fixed result.
    struct RecordingSandbox {
        ok: bool,
        requests: Vec<String>,
    }

    impl SandboxApi for RecordingSandbox {
        fn apply_color_to_selection(&mut self, hex: &str) -> BoxFuture<'_, bool> {
            self.requests.push(hex.to_string());
            let ok = self.ok;
            Box::pin(async move { ok })
        }

        fn apply_gradient_to_selection(&mut self, gradient_css: &str) -> BoxFuture<'_, bool> {
            self.requests.push(gradient_css.to_string());
            let ok = self.ok;
            Box::pin(async move { ok })
        }
    }

    fn png_upload(colors: &[[u8; 3]]) -> ImageUpload {
        let image = RgbaImage::from_fn(8, 8 * colors.len() as u32, |_, y| {
            let [r, g, b] = colors[(y / 8) as usize];
            Rgba([r, g, b, 255])
        });
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        ImageUpload::new("swatch.png", "image/png", bytes)
    }

    fn ready_panel() -> PanelState {
        let mut panel = PanelState::default();
        panel.initialized(Ok(()));
        panel
    }

    #[test]
    fn test_init_error_and_retry() {
        let mut panel = PanelState::default();
        assert_eq!(panel.phase, PanelPhase::Loading);
        panel.initialized(Err("Runtime not available".into()));
        assert_eq!(panel.phase, PanelPhase::InitError("Runtime not available".into()));
        panel.dispatch(PanelAction::Retry);
        assert_eq!(panel.phase, PanelPhase::Loading);
        panel.initialized(Ok(()));
        assert!(panel.is_ready());
    }

    #[test]
    fn test_upload_replaces_palette_and_clears_selection() {
        let mut panel = ready_panel();
        assert!(panel.upload(&png_upload(&[[255, 0, 0], [0, 0, 255]])));
        assert_eq!(panel.colors().len(), 2);
        let brightest = panel.colors()[0].clone();
        assert!(color_distance(&brightest, "#ff0000").unwrap() < 25.0);

        panel.dispatch(PanelAction::ToggleColor(brightest));
        assert_eq!(panel.selection.len(), 1);

        assert!(panel.upload(&png_upload(&[[0, 0, 0], [230, 230, 230]])));
        assert_eq!(panel.colors().len(), 2);
        assert!(color_distance(&panel.colors()[1], "#000000").unwrap() < 25.0);
        assert!(panel.selection.is_empty());
    }

    #[test]
    fn test_failed_upload_keeps_palette() {
        let mut panel = ready_panel();
        assert!(panel.upload(&png_upload(&[[255, 0, 0], [0, 0, 255]])));
        let previous = panel.colors().to_vec();
        panel.dispatch(PanelAction::ToggleColor(previous[1].clone()));

        let not_image = ImageUpload::new("notes.txt", "text/plain", b"hello".to_vec());
        assert!(!panel.upload(&not_image));
        assert_eq!(panel.upload_error.as_deref(), Some("Please upload an image file"));
        assert_eq!(panel.colors(), previous.as_slice());
        assert!(panel.selection.is_empty());

        let broken = ImageUpload::new("broken.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47, 0, 0]);
        assert!(!panel.upload(&broken));
        assert_eq!(
            panel.upload_error.as_deref(),
            Some("Failed to load image. Please try another one.")
        );
        assert_eq!(panel.colors(), previous.as_slice());

        assert!(panel.upload(&png_upload(&[[0, 255, 0], [0, 0, 0]])));
        assert!(panel.upload_error.is_none());
    }

    #[test]
    fn test_gradient_needs_two_colors() {
        let mut panel = ready_panel();
        assert!(panel.gradient_css().is_none());
        panel.dispatch(PanelAction::ToggleColor("#ff0000".into()));
        assert!(panel.gradient_css().is_none());
        panel.dispatch(PanelAction::ToggleColor("#0000ff".into()));
        assert_eq!(
            panel.gradient_css().as_deref(),
            Some("linear-gradient(90deg, #ff0000 0%, #0000ff 100%)")
        );

        panel.dispatch(PanelAction::SetGradientKind(GradientKind::Radial));
        assert_eq!(
            panel.gradient_clipboard_text().as_deref(),
            Some("background: radial-gradient(circle, #ff0000 0%, #0000ff 100%);")
        );

        panel.dispatch(PanelAction::ToggleColor("#ff0000".into()));
        assert!(panel.gradient_css().is_none());
    }

    #[test]
    fn test_gradient_angle() {
        let mut panel = ready_panel();
        panel.dispatch(PanelAction::ToggleColor("#000000".into()));
        panel.dispatch(PanelAction::ToggleColor("#ffffff".into()));
        panel.dispatch(PanelAction::SetGradientAngle(-90));
        assert_eq!(panel.gradient().unwrap().angle_degrees, 270);
    }

    #[test]
    fn test_apply_color_status() {
        let mut panel = ready_panel();
        let mut sandbox = RecordingSandbox { ok: true, requests: Vec::new() };
        assert!(block_on(panel.apply_color(&mut sandbox, "#ff0000")));
        assert_eq!(panel.status, Some(StatusMessage::ok("Color applied!")));
        assert!(!panel.busy);

        sandbox.ok = false;
        assert!(!block_on(panel.apply_color(&mut sandbox, "#00ff00")));
        assert_eq!(panel.status, Some(StatusMessage::error("Failed to apply color")));
        assert_eq!(sandbox.requests, ["#ff0000", "#00ff00"]);

        panel.dispatch(PanelAction::DismissStatus);
        assert!(panel.status.is_none());
    }

    #[test]
    fn test_apply_requires_ready_and_idle() {
        let mut panel = PanelState::default();
        let mut sandbox = RecordingSandbox { ok: true, requests: Vec::new() };
        assert!(!block_on(panel.apply_color(&mut sandbox, "#ff0000")));
        assert_eq!(panel.status, Some(StatusMessage::error("Plugin not ready")));

        panel.initialized(Ok(()));
        panel.busy = true;
        assert!(!block_on(panel.apply_color(&mut sandbox, "#ff0000")));
        assert!(sandbox.requests.is_empty());
    }

    #[test]
    fn test_apply_gradient_through_document_sandbox() {
        let mut panel = ready_panel();
        let mut sandbox = DocumentSandbox::new(Canvas::new());
        assert!(!block_on(panel.apply_gradient(&mut sandbox)));
        assert!(sandbox.host().document.is_empty());

        panel.dispatch(PanelAction::ToggleColor("#ff0000".into()));
        panel.dispatch(PanelAction::ToggleColor("#00ff00".into()));
        panel.dispatch(PanelAction::ToggleColor("#0000ff".into()));
        assert!(block_on(panel.apply_gradient(&mut sandbox)));
        assert_eq!(panel.status, Some(StatusMessage::ok("Gradient applied!")));
        assert_eq!(sandbox.host().document.len(), 1);
    }

    #[test]
    fn test_copy_feedback() {
        let mut panel = ready_panel();
        panel.dispatch(PanelAction::CopyColor(0));
        assert!(panel.copied.is_none());
        assert!(panel.upload(&png_upload(&[[255, 0, 0], [0, 0, 255]])));
        panel.dispatch(PanelAction::CopyColor(1));
        assert_eq!(panel.copied, Some(CopiedItem::Color(1)));
        panel.dispatch(PanelAction::DismissStatus);
        assert!(panel.copied.is_none());
    }
}
