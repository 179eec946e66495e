//! Selection, drag and text-edit state machine driving the scene.

mod caret;
mod machine;

use std::time::Duration;

use crate::geometry::Point;
use crate::input::{EditKey, KeyInput};
use crate::metrics::TextMetrics;
use crate::scene::{hit_test, text, Annotation, AnnotationId, HitTestOptions, Scene};

pub use caret::{caret_layout, BlinkToken, CaretBlink, CaretLayout, DEFAULT_BLINK_INTERVAL};
pub use machine::{can_transition, next_state, SessionEvent, SessionState};

/// Result of feeding one event to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Selected(AnnotationId),
    Deselected,
    Moved,
    Released,
    InsertCharacter(char),
    DeleteBackward,
    MoveCursor,
    Committed,
    Deleted(AnnotationId),
    NoTextTarget,
    NoAction,
}

impl SessionOutcome {
    pub const fn needs_redraw(self) -> bool {
        !matches!(self, Self::NoTextTarget | Self::NoAction | Self::Released)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct DragAnchor {
    dx: f32,
    dy: f32,
}

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: SessionState,
    selected: Option<AnnotationId>,
    cursor_chars: usize,
    drag_anchor: DragAnchor,
    caret: CaretBlink,
    hit_options: HitTestOptions,
}

impl EditSession {
    pub fn new(blink_interval: Duration, hit_options: HitTestOptions) -> Self {
        Self {
            caret: CaretBlink::new(blink_interval),
            hit_options,
            ..Self::default()
        }
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    pub const fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    pub const fn cursor(&self) -> usize {
        self.cursor_chars
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, SessionState::Dragging)
    }

    pub const fn caret_visible(&self) -> bool {
        self.caret.is_visible()
    }

    pub const fn hit_options(&self) -> HitTestOptions {
        self.hit_options
    }

    pub fn caret(&self) -> &CaretBlink {
        &self.caret
    }

    pub fn caret_mut(&mut self) -> &mut CaretBlink {
        &mut self.caret
    }

    /// The selected annotation, if it still exists in `scene`.
    pub fn selected_annotation<'a>(&self, scene: &'a Scene) -> Option<&'a Annotation> {
        self.selected.and_then(|id| scene.get(id))
    }

    fn transition(&mut self, event: SessionEvent) -> bool {
        match next_state(self.state, event) {
            Some(next) => {
                if next != self.state {
                    tracing::debug!(from = ?self.state, to = ?next, ?event, "session transition");
                }
                self.state = next;
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.selected = None;
        self.cursor_chars = 0;
        self.drag_anchor = DragAnchor::default();
        self.caret.stop();
    }

    /// Compare-and-clear: drops a selection whose annotation is gone from `scene`.
    pub fn validate(&mut self, scene: &Scene) -> bool {
        match self.selected {
            Some(id) if !scene.contains(id) => {
                tracing::debug!(%id, "selected annotation no longer exists; returning to idle");
                self.transition(SessionEvent::SelectionLost);
                self.clear();
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Clears the session if it points at `id`. Used when an annotation is removed by
    /// something other than `delete_selected`.
    pub fn forget(&mut self, id: AnnotationId) {
        if self.selected == Some(id) {
            self.transition(SessionEvent::SelectionLost);
            self.clear();
        }
    }

    pub fn pointer_down<M: TextMetrics + ?Sized>(
        &mut self,
        scene: &Scene,
        metrics: &M,
        point: Point,
    ) -> SessionOutcome {
        let hit = hit_test(scene, metrics, point, self.hit_options).and_then(|id| scene.get(id));
        match hit {
            Some(annotation) => {
                self.transition(SessionEvent::PointerDownOnAnnotation);
                self.selected = Some(annotation.id());
                self.drag_anchor = DragAnchor {
                    dx: point.x - annotation.x,
                    dy: point.y - annotation.y,
                };
                self.cursor_chars = annotation.char_len();
                self.caret.restart();
                SessionOutcome::Selected(annotation.id())
            }
            None => {
                let had_selection = self.selected.is_some();
                self.transition(SessionEvent::PointerDownOnEmpty);
                self.clear();
                if had_selection {
                    SessionOutcome::Deselected
                } else {
                    SessionOutcome::NoAction
                }
            }
        }
    }

    pub fn pointer_move(&mut self, scene: &mut Scene, point: Point) -> SessionOutcome {
        if !self.is_dragging() || !self.validate(scene) {
            return SessionOutcome::NoAction;
        }
        let anchor = Point::new(point.x - self.drag_anchor.dx, point.y - self.drag_anchor.dy);
        let Some(annotation) = self.selected.and_then(|id| scene.get_mut(id)) else {
            return SessionOutcome::NoAction;
        };
        annotation.move_to(anchor);
        self.transition(SessionEvent::PointerMove);
        SessionOutcome::Moved
    }

    pub fn pointer_up(&mut self) -> SessionOutcome {
        if self.transition(SessionEvent::PointerUp) {
            SessionOutcome::Released
        } else {
            SessionOutcome::NoAction
        }
    }

    pub fn key_input(&mut self, scene: &mut Scene, key: &KeyInput) -> SessionOutcome {
        if !self.validate(scene) {
            return SessionOutcome::NoTextTarget;
        }
        let Some(edit) = EditKey::resolve(key) else {
            return SessionOutcome::NoAction;
        };
        if edit == EditKey::Commit {
            self.transition(SessionEvent::Commit);
            self.clear();
            return SessionOutcome::Committed;
        }

        let Some(annotation) = self.selected.and_then(|id| scene.get_mut(id)) else {
            return SessionOutcome::NoTextTarget;
        };
        let cursor = text::clamp_offset(&annotation.text, self.cursor_chars);
        let outcome = match edit {
            EditKey::Insert(ch) => {
                self.cursor_chars = text::insert_char(&mut annotation.text, cursor, ch);
                SessionOutcome::InsertCharacter(ch)
            }
            EditKey::DeleteBackward => match text::delete_backward(&mut annotation.text, cursor) {
                Some(next) => {
                    self.cursor_chars = next;
                    SessionOutcome::DeleteBackward
                }
                None => {
                    self.cursor_chars = 0;
                    SessionOutcome::NoAction
                }
            },
            EditKey::CursorLeft => {
                self.cursor_chars = cursor.saturating_sub(1);
                SessionOutcome::MoveCursor
            }
            EditKey::CursorRight => {
                self.cursor_chars = text::clamp_offset(&annotation.text, cursor + 1);
                SessionOutcome::MoveCursor
            }
            EditKey::Commit => SessionOutcome::Committed,
        };
        self.transition(SessionEvent::Edit);
        outcome
    }

    /// Removes the selected annotation and returns to idle atomically.
    pub fn delete_selected(&mut self, scene: &mut Scene) -> SessionOutcome {
        let Some(id) = self.selected else {
            return SessionOutcome::NoTextTarget;
        };
        let removed = scene.remove(id);
        self.transition(SessionEvent::Delete);
        self.clear();
        match removed {
            Some(_) => SessionOutcome::Deleted(id),
            None => SessionOutcome::Deselected,
        }
    }

    pub fn caret_layout<M: TextMetrics + ?Sized>(
        &self,
        scene: &Scene,
        metrics: &M,
    ) -> Option<CaretLayout> {
        let annotation = self.selected_annotation(scene)?;
        Some(caret_layout(annotation, self.cursor_chars, metrics))
    }
}
