//! Set-of-Marks overlay rendering.
//!
//! Draws the merged element catalogue onto a frame copy so an oracle (or a
//! human inspecting artifacts) can refer to elements by their numeric id.

use std::path::Path;
use std::sync::OnceLock;

use ab_glyph::{FontArc, PxScale};
use deskpilot_core_types::{Element, ElementSource};
use image::Rgba;
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect as PixelRect;
use tracing::debug;

use crate::models::Frame;

const FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
];

const BADGE_SIZE: i32 = 24;
const LABEL_MAX_CHARS: usize = 30;

/// Renders numbered bounding boxes over a frame.
///
/// API-sourced elements are drawn green, vision-sourced ones orange. When
/// no usable system font is found the renderer degrades to boxes and
/// badges without text.
pub struct OverlayRenderer {
    api_color: Rgba<u8>,
    vision_color: Rgba<u8>,
    text_color: Rgba<u8>,
    box_width: i32,
    show_labels: bool,
    font: Option<FontArc>,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayRenderer {
    pub fn new() -> Self {
        let font = load_system_font();
        if font.is_none() {
            debug!("no system font found, overlay text disabled");
        }
        Self {
            api_color: Rgba([0, 255, 0, 255]),
            vision_color: Rgba([255, 165, 0, 255]),
            text_color: Rgba([255, 255, 255, 255]),
            box_width: 2,
            show_labels: true,
            font,
        }
    }

    pub fn without_labels(mut self) -> Self {
        self.show_labels = false;
        self
    }

    /// Draw all elements onto a copy of `frame`. The input is never
    /// mutated; later elements paint over earlier ones.
    pub fn render(&self, frame: &Frame, elements: &[Element]) -> Frame {
        let mut canvas = frame.image.clone();
        let (width, height) = (canvas.width() as i32, canvas.height() as i32);

        for element in elements {
            let rect = element.rect;
            if rect.width <= 0 || rect.height <= 0 {
                continue;
            }
            if rect.x >= width || rect.y >= height || rect.right() <= 0 || rect.bottom() <= 0 {
                continue;
            }
            let color = match element.source {
                ElementSource::Api => self.api_color,
                ElementSource::Vision => self.vision_color,
            };

            for inset in 0..self.box_width {
                let w = rect.width - 2 * inset;
                let h = rect.height - 2 * inset;
                if w <= 0 || h <= 0 {
                    break;
                }
                draw_hollow_rect_mut(
                    &mut canvas,
                    PixelRect::at(rect.x + inset, rect.y + inset).of_size(w as u32, h as u32),
                    color,
                );
            }

            self.draw_badge(&mut canvas, element, color);
            if self.show_labels {
                self.draw_label(&mut canvas, element);
            }
        }

        Frame::new(canvas)
    }

    /// Filled id badge anchored at the element's top-left corner, above
    /// the box when there is room, inside it otherwise.
    fn draw_badge(&self, canvas: &mut image::RgbaImage, element: &Element, color: Rgba<u8>) {
        let rect = element.rect;
        let badge_y = if rect.y >= BADGE_SIZE {
            rect.y - BADGE_SIZE
        } else {
            rect.y
        };
        let badge_x = rect.x.max(0);
        let digits = element.id.to_string();
        let badge_w = (digits.len() as i32 * 12 + 8).max(BADGE_SIZE);

        draw_filled_rect_mut(
            canvas,
            PixelRect::at(badge_x, badge_y.max(0)).of_size(badge_w as u32, BADGE_SIZE as u32),
            color,
        );

        if let Some(font) = &self.font {
            draw_text_mut(
                canvas,
                Rgba([0, 0, 0, 255]),
                badge_x + 4,
                badge_y.max(0) + 2,
                PxScale::from(20.0),
                font,
                &digits,
            );
        }
    }

    /// Truncated name label under the box, on a dark backing strip.
    fn draw_label(&self, canvas: &mut image::RgbaImage, element: &Element) {
        let Some(font) = &self.font else {
            return;
        };
        if element.name.is_empty() {
            return;
        }
        let mut label: String = element.name.chars().take(LABEL_MAX_CHARS).collect();
        if element.name.chars().count() > LABEL_MAX_CHARS {
            label.push('…');
        }

        let rect = element.rect;
        let label_y = rect.bottom();
        if label_y < 0 || label_y >= canvas.height() as i32 {
            return;
        }
        let strip_w = (label.chars().count() as i32 * 9 + 6).max(12);

        draw_filled_rect_mut(
            canvas,
            PixelRect::at(rect.x.max(0), label_y).of_size(strip_w as u32, 18),
            Rgba([20, 20, 20, 255]),
        );
        draw_text_mut(
            canvas,
            self.text_color,
            rect.x.max(0) + 3,
            label_y + 1,
            PxScale::from(15.0),
            font,
            &label,
        );
    }
}

/// Probe well-known system font locations, once per process. `None` when
/// nothing usable is installed, which callers treat as "render without
/// text".
fn load_system_font() -> Option<FontArc> {
    static FONT: OnceLock<Option<FontArc>> = OnceLock::new();
    FONT.get_or_init(|| {
        for candidate in FONT_CANDIDATES {
            let path = Path::new(candidate);
            if !path.is_file() {
                continue;
            }
            if let Ok(bytes) = std::fs::read(path) {
                if let Ok(font) = FontArc::try_from_vec(bytes) {
                    debug!(path = %candidate, "loaded overlay font");
                    return Some(font);
                }
            }
        }
        None
    })
    .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskpilot_core_types::Rect;

    fn element(id: u32, source: ElementSource, rect: Rect) -> Element {
        Element {
            id,
            source,
            name: format!("element {id}"),
            control: "Button".into(),
            rect,
            automation_id: None,
            class_name: None,
            confidence: None,
        }
    }

    #[test]
    fn test_render_does_not_mutate_input() {
        let frame = Frame::solid(100, 100, Rgba([0, 0, 0, 255]));
        let elements = vec![element(
            1,
            ElementSource::Api,
            Rect {
                x: 30,
                y: 30,
                width: 40,
                height: 20,
            },
        )];
        let rendered = OverlayRenderer::new().render(&frame, &elements);

        assert_eq!(frame.image.get_pixel(30, 30), &Rgba([0, 0, 0, 255]));
        assert_eq!(rendered.image.get_pixel(30, 30), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_vision_elements_draw_orange() {
        let frame = Frame::solid(100, 100, Rgba([0, 0, 0, 255]));
        let elements = vec![element(
            1,
            ElementSource::Vision,
            Rect {
                x: 50,
                y: 50,
                width: 30,
                height: 30,
            },
        )];
        let rendered = OverlayRenderer::new().render(&frame, &elements);
        assert_eq!(rendered.image.get_pixel(50, 50), &Rgba([255, 165, 0, 255]));
    }

    #[test]
    fn test_degenerate_and_offscreen_rects_are_skipped() {
        let frame = Frame::solid(50, 50, Rgba([0, 0, 0, 255]));
        let elements = vec![
            element(
                1,
                ElementSource::Api,
                Rect {
                    x: 10,
                    y: 10,
                    width: 0,
                    height: 5,
                },
            ),
            element(
                2,
                ElementSource::Api,
                Rect {
                    x: 200,
                    y: 200,
                    width: 10,
                    height: 10,
                },
            ),
        ];
        let rendered = OverlayRenderer::new().render(&frame, &elements);
        assert!(rendered
            .image
            .pixels()
            .all(|p| *p == Rgba([0, 0, 0, 255])));
    }
}
