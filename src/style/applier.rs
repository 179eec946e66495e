use super::{FamilyPreset, SizePreset, TextStyle};
use crate::geometry::Color;
use crate::scene::{AnnotationId, Scene};
use crate::session::EditSession;

/// Discrete toolbar style events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleChange {
    Color(Color),
    Size(SizePreset),
    Family(FamilyPreset),
    ToggleBold,
    ToggleItalic,
}

impl StyleChange {
    /// Color pick from a toolbar value; unparsable values fall back to black.
    pub fn color_from_key(key: &str) -> Self {
        let color = Color::parse(key).unwrap_or_else(|| {
            tracing::warn!(key, "unknown color key; falling back to black");
            Color::BLACK
        });
        Self::Color(color)
    }

    fn apply_to(self, style: &mut TextStyle, bold: bool, italic: bool) {
        match self {
            Self::Color(color) => style.color = color,
            Self::Size(size) => style.set_size_px(size.size_px()),
            Self::Family(family) => style.family = family.family(),
            Self::ToggleBold => style.bold = bold,
            Self::ToggleItalic => style.italic = italic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleOutcome {
    /// Only the style for the next added annotation changed.
    CurrentOnly,
    /// The selected annotation was restyled as well.
    Applied(AnnotationId),
}

impl StyleOutcome {
    pub const fn needs_redraw(self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StyleApplier {
    current: TextStyle,
}

impl StyleApplier {
    pub const fn new(current: TextStyle) -> Self {
        Self { current }
    }

    /// Style copied into the next added annotation.
    pub const fn current(&self) -> TextStyle {
        self.current
    }

    /// Updates the current style and, when a selection exists, the selected annotation.
    /// Toggles flip the selected annotation's own flag and carry the result into the
    /// current style; without a selection they flip the current style.
    pub fn apply(
        &mut self,
        change: StyleChange,
        session: &mut EditSession,
        scene: &mut Scene,
    ) -> StyleOutcome {
        session.validate(scene);
        let target = session.selected().and_then(|id| scene.get_mut(id));
        let basis = target
            .as_ref()
            .map(|annotation| annotation.style)
            .unwrap_or(self.current);
        let bold = !basis.bold;
        let italic = !basis.italic;

        change.apply_to(&mut self.current, bold, italic);
        tracing::debug!(?change, current = %self.current.font_descriptor(), "style changed");
        match target {
            Some(annotation) => {
                change.apply_to(&mut annotation.style, bold, italic);
                StyleOutcome::Applied(annotation.id())
            }
            None => StyleOutcome::CurrentOnly,
        }
    }
}
