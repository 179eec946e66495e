//! Ordered annotation store. Store order is draw order; hit-testing walks it in reverse.

pub mod text;

use crate::geometry::Point;
use crate::style::TextStyle;

pub use hit_test::{annotation_bounds, hit_test, HitTestOptions};

/// Stable identity handle for an annotation. Never reused within one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(u64);

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    id: AnnotationId,
    pub text: String,
    /// Baseline anchor in surface coordinates.
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
}

impl Annotation {
    pub const fn id(&self) -> AnnotationId {
        self.id
    }

    pub const fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn move_to(&mut self, anchor: Point) {
        self.x = anchor.x;
        self.y = anchor.y;
    }

    pub fn char_len(&self) -> usize {
        text::char_len(&self.text)
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    annotations: Vec<Annotation>,
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> AnnotationId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        AnnotationId(id)
    }

    /// Appends an annotation on top of the scene. The style is copied.
    pub fn add(
        &mut self,
        text: impl Into<String>,
        anchor: Point,
        style: TextStyle,
    ) -> AnnotationId {
        let id = self.allocate_id();
        self.annotations.push(Annotation {
            id,
            text: text.into(),
            x: anchor.x,
            y: anchor.y,
            style,
        });
        tracing::debug!(%id, x = anchor.x, y = anchor.y, "annotation added");
        id
    }

    /// Removes an annotation. Unknown or already removed ids are a no-op.
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self
            .annotations
            .iter()
            .position(|annotation| annotation.id == id)?;
        let removed = self.annotations.remove(index);
        tracing::debug!(%id, "annotation removed");
        Some(removed)
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| annotation.id == id)
    }

    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations
            .iter_mut()
            .find(|annotation| annotation.id == id)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.get(id).is_some()
    }

    /// Draw order: oldest first.
    pub fn iter_front_to_back(&self) -> impl DoubleEndedIterator<Item = &Annotation> + '_ {
        self.annotations.iter()
    }

    /// Hit-test order: most recently added (topmost) first.
    pub fn iter_back_to_front(&self) -> impl Iterator<Item = &Annotation> + '_ {
        self.annotations.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(iter: impl Iterator<Item = &'a Annotation>) -> Vec<&'a str> {
        iter.map(|annotation| annotation.text.as_str()).collect()
    }

    #[test]
    fn iteration_follows_insertion_order_minus_removed_entries() {
        let mut scene = Scene::new();
        let style = TextStyle::default();
        let a = scene.add("a", Point::new(0.0, 0.0), style);
        let _b = scene.add("b", Point::new(0.0, 0.0), style);
        let c = scene.add("c", Point::new(0.0, 0.0), style);
        let _d = scene.add("d", Point::new(0.0, 0.0), style);

        scene.remove(c).expect("c should be removed");
        scene.remove(a).expect("a should be removed");
        let _e = scene.add("e", Point::new(0.0, 0.0), style);

        assert_eq!(texts(scene.iter_front_to_back()), vec!["b", "d", "e"]);
        assert_eq!(texts(scene.iter_back_to_front()), vec!["e", "d", "b"]);
    }

    #[test]
    fn iteration_order_holds_across_add_remove_interleavings() {
        // `+x` adds an annotation with text x, `-x` removes it.
        let scripts = [
            "+a +b +c -b +d -a",
            "+a -a +b -b +c",
            "+a +b -b -b +c -a -c",
            "+a +b +c +d -d -c -b -a +e",
            "-z +a +b -a +a",
        ];
        for script in scripts {
            let mut scene = Scene::new();
            let mut expected: Vec<(String, AnnotationId)> = Vec::new();
            for op in script.split_whitespace() {
                let (kind, text) = op.split_at(1);
                if kind == "+" {
                    let id = scene.add(text, Point::default(), TextStyle::default());
                    expected.push((text.to_string(), id));
                } else if let Some(index) = expected.iter().position(|(t, _)| t == text) {
                    let (_, id) = expected.remove(index);
                    assert!(scene.remove(id).is_some(), "{script}: {op} should remove");
                }
            }

            let front: Vec<&str> = expected.iter().map(|(t, _)| t.as_str()).collect();
            let mut back = front.clone();
            back.reverse();
            assert_eq!(texts(scene.iter_front_to_back()), front, "{script}");
            assert_eq!(texts(scene.iter_back_to_front()), back, "{script}");
            assert_eq!(scene.len(), expected.len(), "{script}");
        }
    }

    #[test]
    fn remove_is_idempotent_for_unknown_ids() {
        let mut scene = Scene::new();
        let id = scene.add("text", Point::new(50.0, 50.0), TextStyle::default());
        assert!(scene.remove(id).is_some());
        assert!(scene.remove(id).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut scene = Scene::new();
        let first = scene.add("one", Point::default(), TextStyle::default());
        scene.remove(first);
        let second = scene.add("two", Point::default(), TextStyle::default());
        assert_ne!(first, second);
        assert!(!scene.contains(first));
    }

    #[test]
    fn annotations_own_independent_style_copies() {
        let mut scene = Scene::new();
        let mut style = TextStyle::default();
        let id = scene.add("text", Point::default(), style);
        style.bold = true;
        assert!(!scene.get(id).expect("annotation should exist").style.bold);
    }

    #[test]
    fn empty_text_and_offscreen_anchor_are_valid() {
        let mut scene = Scene::new();
        let id = scene.add("", Point::new(-400.0, 9000.0), TextStyle::default());
        let annotation = scene.get(id).expect("annotation should exist");
        assert_eq!(annotation.char_len(), 0);
        assert_eq!(annotation.anchor(), Point::new(-400.0, 9000.0));
    }
}
