use std::collections::HashMap;

use ab_glyph::{point, Font, FontArc, FontVec, PxScale, ScaleFont};
use fontdb::{Database, Family, Query, Style, Weight};
use image::RgbaImage;
use thiserror::Error;

use super::{height_for, TextEngine, TextExtent, TextMetrics};
use crate::geometry::Point;
use crate::render::raster::blend_pixel;
use crate::style::{FontFamily, TextStyle};

const FAMILIES: [FontFamily; 3] = [
    FontFamily::Arial,
    FontFamily::CourierNew,
    FontFamily::TimesNewRoman,
];

#[derive(Debug, Error)]
pub enum FontError {
    #[error("no usable font face found in the font database")]
    NoFace,
    #[error("failed to decode font face for {family}: {source}")]
    Decode {
        family: &'static str,
        #[source]
        source: ab_glyph::InvalidFont,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FaceKey {
    family: FontFamily,
    bold: bool,
    italic: bool,
}

impl FaceKey {
    const fn for_style(style: &TextStyle) -> Self {
        Self {
            family: style.family,
            bold: style.bold,
            italic: style.italic,
        }
    }

    const fn regular(self) -> Self {
        Self {
            family: self.family,
            bold: false,
            italic: false,
        }
    }
}

/// System fonts resolved once per family, weight and slant.
#[derive(Clone)]
pub struct FontLibrary {
    faces: HashMap<FaceKey, FontArc>,
    fallback: FontArc,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("faces", &self.faces.len())
            .finish()
    }
}

impl FontLibrary {
    pub fn load_system() -> Result<Self, FontError> {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "system font database loaded");
        Self::from_database(&db)
    }

    pub fn from_database(db: &Database) -> Result<Self, FontError> {
        let mut faces = HashMap::new();
        for family in FAMILIES {
            for (bold, italic) in [(false, false), (true, false), (false, true), (true, true)] {
                let key = FaceKey {
                    family,
                    bold,
                    italic,
                };
                if let Some(font) = load_face(db, key)? {
                    faces.insert(key, font);
                }
            }
        }

        let fallback = FAMILIES
            .iter()
            .find_map(|&family| {
                faces.get(&FaceKey {
                    family,
                    bold: false,
                    italic: false,
                })
            })
            .or_else(|| faces.values().next())
            .cloned()
            .ok_or(FontError::NoFace)?;

        tracing::info!(faces = faces.len(), "font library ready");
        Ok(Self { faces, fallback })
    }

    fn face(&self, style: &TextStyle) -> &FontArc {
        let key = FaceKey::for_style(style);
        self.faces
            .get(&key)
            .or_else(|| self.faces.get(&key.regular()))
            .unwrap_or(&self.fallback)
    }
}

fn load_face(db: &Database, key: FaceKey) -> Result<Option<FontArc>, FontError> {
    let generic = match key.family {
        FontFamily::Arial => Family::SansSerif,
        FontFamily::CourierNew => Family::Monospace,
        FontFamily::TimesNewRoman => Family::Serif,
    };
    let families = [Family::Name(key.family.family_name()), generic];
    let query = Query {
        families: &families,
        weight: if key.bold { Weight::BOLD } else { Weight::NORMAL },
        style: if key.italic { Style::Italic } else { Style::Normal },
        ..Default::default()
    };
    let Some(id) = db.query(&query) else {
        return Ok(None);
    };
    let Some(decoded) = db.with_face_data(id, |data, index| {
        FontVec::try_from_vec_and_index(data.to_vec(), index)
    }) else {
        return Ok(None);
    };
    let font = decoded.map_err(|source| FontError::Decode {
        family: key.family.family_name(),
        source,
    })?;
    Ok(Some(FontArc::new(font)))
}

/// CSS pixel sizes are em sizes; ab_glyph scales by ascent-to-descent height.
fn em_scale(font: &FontArc, style: &TextStyle) -> PxScale {
    let size = height_for(style);
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(size * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(size),
    }
}

impl TextMetrics for FontLibrary {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtent {
        let font = self.face(style);
        let scaled = font.as_scaled(em_scale(font, style));
        let mut width = 0.0_f32;
        let mut previous = None;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let glyph_id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);
        }
        TextExtent {
            width: width.max(0.0),
            height: height_for(style),
        }
    }
}

impl TextEngine for FontLibrary {
    fn draw_text(&self, surface: &mut RgbaImage, text: &str, style: &TextStyle, origin: Point) {
        let font = self.face(style);
        let scaled = font.as_scaled(em_scale(font, style));
        let mut pen_x = origin.x;
        let mut previous = None;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let glyph_id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                pen_x += scaled.kern(prev, glyph_id);
            }
            let mut glyph = scaled.scaled_glyph(ch);
            glyph.position = point(pen_x, origin.y);
            if let Some(outline) = font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                outline.draw(|x, y, coverage| {
                    let px = bounds.min.x + x as f32;
                    let py = bounds.min.y + y as f32;
                    if px >= 0.0 && py >= 0.0 {
                        blend_pixel(surface, px as u32, py as u32, style.color, coverage);
                    }
                });
            }
            pen_x += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);
        }
    }
}
