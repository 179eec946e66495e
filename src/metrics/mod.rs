//! Text measurement and drawing. Every measure and draw site goes through one engine so
//! hit boxes, caret positions and rendered glyphs resolve fonts the same way.

mod estimate;
mod font;
mod memo;

use image::RgbaImage;

use crate::geometry::Point;
use crate::style::TextStyle;

pub use estimate::EstimatedText;
pub use font::{FontError, FontLibrary};
pub use memo::MemoizedMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f32,
    /// Approximated as the style's pixel size.
    pub height: f32,
}

pub trait TextMetrics {
    /// Pure for identical inputs. Empty text measures zero width.
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtent;
}

pub trait TextEngine: TextMetrics {
    /// Draws `text` with its baseline starting at `origin`. No clipping or wrapping beyond
    /// the surface bounds.
    fn draw_text(&self, surface: &mut RgbaImage, text: &str, style: &TextStyle, origin: Point);
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtent {
        (**self).measure(text, style)
    }
}

impl<T: TextEngine + ?Sized> TextEngine for &T {
    fn draw_text(&self, surface: &mut RgbaImage, text: &str, style: &TextStyle, origin: Point) {
        (**self).draw_text(surface, text, style, origin)
    }
}

pub(crate) fn height_for(style: &TextStyle) -> f32 {
    f32::from(style.size_px())
}
