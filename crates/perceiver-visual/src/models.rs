//! Frames and vision detections.

use std::time::SystemTime;

use base64::Engine as _;
use deskpilot_core_types::Rect;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::errors::VisualError;

/// One decoded still image of the display.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbaImage,
    pub captured_at: SystemTime,
}

impl Frame {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            captured_at: SystemTime::now(),
        }
    }

    /// Uniform-color frame, mostly useful in tests and demos.
    pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, color))
    }

    pub fn from_png_bytes(data: &[u8]) -> Result<Self, VisualError> {
        let image = image::load_from_memory(data)?.to_rgba8();
        Ok(Self::new(image))
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>, VisualError> {
        let mut buf = Vec::new();
        self.image
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)?;
        Ok(buf)
    }

    /// PNG bytes base64-encoded for oracle transport.
    pub fn to_base64_png(&self) -> Result<String, VisualError> {
        let bytes = self.to_png_bytes()?;
        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// One raw vision detection before merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Inferred control class, e.g. "button", "icon".
    pub control: String,
    /// Inferred name or description, may be empty.
    pub name: String,
    pub rect: Rect,
    /// Model confidence in `[0, 1]`.
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_round_trip() {
        let frame = Frame::solid(8, 6, Rgba([10, 20, 30, 255]));
        let bytes = frame.to_png_bytes().unwrap();
        let decoded = Frame::from_png_bytes(&bytes).unwrap();
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 6);
        assert_eq!(decoded.image.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_base64_is_nonempty_ascii() {
        let frame = Frame::solid(4, 4, Rgba([0, 0, 0, 255]));
        let encoded = frame.to_base64_png().unwrap();
        assert!(!encoded.is_empty());
        assert!(encoded.is_ascii());
    }
}
