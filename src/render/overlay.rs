use crate::geometry::Rect;
use crate::metrics::TextMetrics;
use crate::scene::{annotation_bounds, Scene};
use crate::session::{CaretLayout, EditSession};

/// On-screen decorations for the current selection. Derived from state on demand and
/// never drawn into the exported surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overlay {
    /// Dotted box around the selected annotation.
    pub selection_box: Option<Rect>,
    pub caret: Option<CaretLayout>,
    pub caret_visible: bool,
}

impl Overlay {
    pub fn derive<M: TextMetrics + ?Sized>(
        scene: &Scene,
        session: &EditSession,
        metrics: &M,
    ) -> Self {
        let Some(annotation) = session.selected_annotation(scene) else {
            return Self::default();
        };
        Self {
            selection_box: Some(annotation_bounds(
                annotation,
                metrics,
                session.hit_options(),
            )),
            caret: session.caret_layout(scene, metrics),
            caret_visible: session.caret_visible(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selection_box.is_none()
    }
}
