use image::{Rgba, RgbaImage};

use crate::geometry::{Color, Rect};

/// Fills every pixel whose index lies in the rounded `[left, right) x [top, bottom)` span.
pub(crate) fn fill_rect(surface: &mut RgbaImage, rect: Rect, color: Color) {
    let (width, height) = surface.dimensions();
    let x_range = pixel_span(rect.left, rect.right, width);
    let y_range = pixel_span(rect.top, rect.bottom, height);
    for y in y_range {
        for x in x_range.clone() {
            blend_pixel(surface, x, y, color, 1.0);
        }
    }
}

/// Source-over blend of `color` at `coverage` onto an opaque surface pixel.
pub(crate) fn blend_pixel(surface: &mut RgbaImage, x: u32, y: u32, color: Color, coverage: f32) {
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage <= 0.0 || x >= surface.width() || y >= surface.height() {
        return;
    }
    let Rgba([r, g, b, a]) = *surface.get_pixel(x, y);
    let mix = |dst: u8, src: u8| -> u8 {
        let blended = f32::from(dst) + (f32::from(src) - f32::from(dst)) * coverage;
        blended.round().clamp(0.0, 255.0) as u8
    };
    let alpha = f32::from(a) + (255.0 - f32::from(a)) * coverage;
    surface.put_pixel(
        x,
        y,
        Rgba([
            mix(r, color.r),
            mix(g, color.g),
            mix(b, color.b),
            alpha.round().clamp(0.0, 255.0) as u8,
        ]),
    );
}

fn pixel_span(start: f32, end: f32, limit: u32) -> std::ops::Range<u32> {
    let clamp = |value: f32| -> u32 {
        if value.is_nan() || value <= 0.0 {
            0
        } else {
            (value.round() as u64).min(u64::from(limit)) as u32
        }
    };
    clamp(start)..clamp(end)
}
