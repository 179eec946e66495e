//! Text style descriptors and the toolbar lookup tables that produce them.

mod applier;

use crate::geometry::Color;

pub use applier::{StyleApplier, StyleChange, StyleOutcome};

pub const SMALL_SIZE_PX: u16 = 20;
pub const MEDIUM_SIZE_PX: u16 = 30;
pub const LARGE_SIZE_PX: u16 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Arial,
    CourierNew,
    TimesNewRoman,
}

impl FontFamily {
    pub const fn family_name(self) -> &'static str {
        match self {
            Self::Arial => "Arial",
            Self::CourierNew => "Courier New",
            Self::TimesNewRoman => "Times New Roman",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePreset {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizePreset {
    /// Resolves a toolbar key; unknown keys fall back to `Medium`.
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            other => {
                tracing::warn!(key = other, "unknown size key; falling back to medium");
                Self::default()
            }
        }
    }

    pub const fn size_px(self) -> u16 {
        match self {
            Self::Small => SMALL_SIZE_PX,
            Self::Medium => MEDIUM_SIZE_PX,
            Self::Large => LARGE_SIZE_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FamilyPreset {
    #[default]
    Regular,
    Simple,
    Fancy,
}

impl FamilyPreset {
    /// Resolves a toolbar key; unknown keys fall back to `Regular`.
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "regular" => Self::Regular,
            "simple" => Self::Simple,
            "fancy" => Self::Fancy,
            other => {
                tracing::warn!(key = other, "unknown family key; falling back to regular");
                Self::default()
            }
        }
    }

    pub const fn family(self) -> FontFamily {
        match self {
            Self::Regular => FontFamily::Arial,
            Self::Simple => FontFamily::CourierNew,
            Self::Fancy => FontFamily::TimesNewRoman,
        }
    }
}

/// Style owned by value by every annotation and by the pending "current style".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextStyle {
    pub family: FontFamily,
    size_px: u16,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: FamilyPreset::default().family(),
            size_px: SizePreset::default().size_px(),
            bold: false,
            italic: false,
            color: Color::BLACK,
        }
    }
}

impl TextStyle {
    pub fn new(family: FontFamily, size_px: u16, color: Color) -> Self {
        Self {
            family,
            size_px: clamp_size_px(size_px),
            bold: false,
            italic: false,
            color,
        }
    }

    pub const fn size_px(&self) -> u16 {
        self.size_px
    }

    pub fn set_size_px(&mut self, size_px: u16) {
        self.size_px = clamp_size_px(size_px);
    }

    /// CSS-like font shorthand, e.g. `bold italic 30px Arial`.
    pub fn font_descriptor(&self) -> String {
        let mut descriptor = String::new();
        if self.bold {
            descriptor.push_str("bold ");
        }
        if self.italic {
            descriptor.push_str("italic ");
        }
        descriptor.push_str(&format!(
            "{}px {}",
            self.size_px,
            self.family.family_name()
        ));
        descriptor
    }
}

const fn clamp_size_px(size_px: u16) -> u16 {
    if size_px == 0 {
        1
    } else {
        size_px
    }
}
