//! User-supplied image files and their decoding into pixel data.

use crate::error::{ChromaError, ChromaResult};
use image::RgbaImage;

/// Image formats the decoder is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Png,
    Jpeg,
    WebP,
}

impl UploadFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            UploadFormat::Png => "image/png",
            UploadFormat::Jpeg => "image/jpeg",
            UploadFormat::WebP => "image/webp",
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(UploadFormat::Png),
            "jpg" | "jpeg" => Some(UploadFormat::Jpeg),
            "webp" => Some(UploadFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }
        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(UploadFormat::Png);
        }
        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(UploadFormat::Jpeg);
        }
        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(UploadFormat::WebP);
        }
        None
    }
}

/// A file handed over by the panel, with the content type the browser declared.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Build an upload from a path on disk, declaring the MIME type from the
    /// extension (or the magic bytes when the extension is unknown).
    pub fn from_file_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = file_name
            .rsplit_once('.')
            .and_then(|(_, ext)| UploadFormat::from_extension(ext))
            .or_else(|| UploadFormat::from_magic_bytes(&bytes))
            .map(|format| format.mime_type())
            .unwrap_or("application/octet-stream");
        Self::new(file_name, mime_type, bytes)
    }

    /// Whether the declared content type is an image type.
    pub fn is_image(&self) -> bool {
        self.mime_type.trim().to_ascii_lowercase().starts_with("image/")
    }

    /// Check the declared type, then decode into an RGBA buffer.
    pub fn decode(&self) -> ChromaResult<RgbaImage> {
        if !self.is_image() {
            return Err(ChromaError::UnsupportedMediaType(self.mime_type.clone()));
        }
        let decoded = image::load_from_memory(&self.bytes)?;
        log::debug!(
            "Decoded {} ({}x{})",
            self.file_name,
            decoded.width(),
            decoded.height()
        );
        Ok(decoded.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::io::Cursor;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(UploadFormat::from_extension("JPG"), Some(UploadFormat::Jpeg));
        assert_eq!(UploadFormat::from_extension("gif"), None);
        assert_eq!(UploadFormat::WebP.mime_type(), "image/webp");
        let png = png_bytes(&RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])));
        assert_eq!(UploadFormat::from_magic_bytes(&png), Some(UploadFormat::Png));
        assert_eq!(UploadFormat::from_magic_bytes(b"GIF89a"), None);
    }

    #[test]
    fn test_decode_png() {
        let image = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let upload = ImageUpload::new("swatch.png", "image/png", png_bytes(&image));
        let decoded = upload.decode().unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_rejects_non_image_type() {
        let upload = ImageUpload::new("notes.txt", "text/plain", b"hello".to_vec());
        assert!(!upload.is_image());
        assert!(matches!(upload.decode(), Err(ChromaError::UnsupportedMediaType(_))));
    }

    #[test]
    fn test_garbage_bytes_fail_decode() {
        let upload = ImageUpload::new("broken.png", "image/png", vec![1, 2, 3, 4, 5]);
        assert!(matches!(upload.decode(), Err(ChromaError::ImageDecodeFailure(_))));
    }

    #[test]
    fn test_from_file_bytes_declares_type() {
        let png = png_bytes(&RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])));
        assert_eq!(ImageUpload::from_file_bytes("a.webp", vec![]).mime_type, "image/webp");
        assert_eq!(ImageUpload::from_file_bytes("noext", png).mime_type, "image/png");
        assert_eq!(
            ImageUpload::from_file_bytes("notes.txt", b"hi".to_vec()).mime_type,
            "application/octet-stream"
        );
    }
}
