use image::RgbaImage;

use super::{height_for, TextEngine, TextExtent, TextMetrics};
use crate::geometry::{Point, Rect};
use crate::render::raster::fill_rect;
use crate::style::{FontFamily, TextStyle};

const BOLD_ADVANCE_FACTOR: f32 = 1.1;
const GLYPH_INK_INSET_RATIO: f32 = 0.1;
const GLYPH_INK_HEIGHT_RATIO: f32 = 0.7;

/// Font-free engine with a fixed advance per character. Glyphs are drawn as solid blocks
/// sitting on the baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedText;

impl EstimatedText {
    pub fn advance(style: &TextStyle) -> f32 {
        let ratio = match style.family {
            FontFamily::Arial => 0.55,
            FontFamily::CourierNew => 0.6,
            FontFamily::TimesNewRoman => 0.5,
        };
        let weight = if style.bold { BOLD_ADVANCE_FACTOR } else { 1.0 };
        height_for(style) * ratio * weight
    }
}

impl TextMetrics for EstimatedText {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtent {
        let count = text.chars().filter(|ch| !ch.is_control()).count();
        TextExtent {
            width: count as f32 * Self::advance(style),
            height: height_for(style),
        }
    }
}

impl TextEngine for EstimatedText {
    fn draw_text(&self, surface: &mut RgbaImage, text: &str, style: &TextStyle, origin: Point) {
        let advance = Self::advance(style);
        let ink_top = origin.y - height_for(style) * GLYPH_INK_HEIGHT_RATIO;
        let mut pen_x = origin.x;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            if !ch.is_whitespace() {
                let inset = advance * GLYPH_INK_INSET_RATIO;
                let block = Rect::new(pen_x + inset, ink_top, pen_x + advance - inset, origin.y);
                fill_rect(surface, block, style.color);
            }
            pen_x += advance;
        }
    }
}
