//! Composites the background and every annotation onto an off-screen surface.

mod overlay;
pub(crate) mod raster;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::metrics::TextEngine;
use crate::scene::Scene;

pub use overlay::Overlay;

const CLEAR_PIXEL: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Drawn,
    /// The background is not ready yet; one render is queued for when it arrives.
    Deferred,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    surface: RgbaImage,
    background: Option<RgbaImage>,
    pending: bool,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: RgbaImage::from_pixel(width.max(1), height.max(1), CLEAR_PIXEL),
            background: None,
            pending: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.background.is_some()
    }

    pub fn has_pending_render(&self) -> bool {
        self.pending
    }

    /// Installs the decoded background, scaled to the surface. Returns whether a render
    /// was deferred while waiting and should now be flushed.
    pub fn set_background(&mut self, image: &RgbaImage) -> bool {
        let (width, height) = self.surface.dimensions();
        let scaled = if image.dimensions() == (width, height) {
            image.clone()
        } else {
            imageops::resize(image, width, height, FilterType::Triangle)
        };
        tracing::debug!(
            source_width = image.width(),
            source_height = image.height(),
            width,
            height,
            "background ready"
        );
        self.background = Some(scaled);
        std::mem::take(&mut self.pending)
    }

    /// Clears the surface and redraws background then annotations in store order.
    pub fn render<E: TextEngine + ?Sized>(&mut self, scene: &Scene, engine: &E) -> RenderStatus {
        let Some(background) = self.background.as_ref() else {
            if !self.pending {
                tracing::debug!("render requested before background is ready; deferring");
            }
            self.pending = true;
            return RenderStatus::Deferred;
        };

        self.surface.copy_from_slice(background.as_raw());
        for annotation in scene.iter_front_to_back() {
            engine.draw_text(
                &mut self.surface,
                &annotation.text,
                &annotation.style,
                annotation.anchor(),
            );
        }
        self.pending = false;
        RenderStatus::Drawn
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Color, Point};
    use crate::metrics::EstimatedText;
    use crate::style::{FontFamily, TextStyle};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn red_style() -> TextStyle {
        TextStyle::new(FontFamily::CourierNew, 30, Color::new(255, 0, 0))
    }

    #[test]
    fn render_before_background_is_deferred_once() {
        let mut renderer = Renderer::new(100, 80);
        let scene = Scene::new();
        assert_eq!(renderer.render(&scene, &EstimatedText), RenderStatus::Deferred);
        assert_eq!(renderer.render(&scene, &EstimatedText), RenderStatus::Deferred);
        assert!(renderer.has_pending_render());

        let flush = renderer.set_background(&RgbaImage::from_pixel(100, 80, WHITE));
        assert!(flush);
        assert!(!renderer.has_pending_render());
        assert_eq!(renderer.render(&scene, &EstimatedText), RenderStatus::Drawn);
        assert_eq!(renderer.surface().get_pixel(0, 0), &WHITE);
    }

    #[test]
    fn background_is_scaled_to_surface_bounds() {
        let mut renderer = Renderer::new(40, 30);
        assert!(!renderer.set_background(&RgbaImage::from_pixel(7, 5, WHITE)));
        renderer.render(&Scene::new(), &EstimatedText);
        assert_eq!(renderer.surface().dimensions(), (40, 30));
        assert!(renderer
            .surface()
            .pixels()
            .all(|pixel| pixel.0.iter().all(|&channel| channel >= 250)));
    }

    #[test]
    fn annotations_draw_in_store_order_with_their_own_style() {
        let mut renderer = Renderer::new(100, 80);
        renderer.set_background(&RgbaImage::from_pixel(100, 80, WHITE));
        let mut scene = Scene::new();
        scene.add("a", Point::new(10.0, 40.0), red_style());
        let mut blue = red_style();
        blue.color = Color::new(0, 0, 255);
        scene.add("b", Point::new(10.0, 40.0), blue);

        renderer.render(&scene, &EstimatedText);
        assert_eq!(renderer.surface().get_pixel(18, 30), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn rendering_is_idempotent_and_reflects_removal() {
        let mut renderer = Renderer::new(100, 80);
        renderer.set_background(&RgbaImage::from_pixel(100, 80, WHITE));
        let mut scene = Scene::new();
        let id = scene.add("a", Point::new(10.0, 40.0), red_style());

        renderer.render(&scene, &EstimatedText);
        let first = renderer.surface().clone();
        renderer.render(&scene, &EstimatedText);
        assert_eq!(renderer.surface(), &first);

        scene.remove(id);
        renderer.render(&scene, &EstimatedText);
        assert!(renderer.surface().pixels().all(|pixel| pixel == &WHITE));
    }
}
