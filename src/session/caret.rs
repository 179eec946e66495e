use std::time::Duration;

use crate::metrics::TextMetrics;
use crate::scene::{text, Annotation};

pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(500);

const CARET_TOP_INSET_RATIO: f32 = 0.2;
const CARET_LENGTH_RATIO: f32 = 0.8;

/// Identifies one run of the blink timer. Ticks carrying a stale token are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkToken(u64);

/// Cosmetic caret visibility toggle. Never gates editing.
#[derive(Debug, Clone)]
pub struct CaretBlink {
    interval: Duration,
    visible: bool,
    running: bool,
    elapsed: Duration,
    generation: u64,
}

impl Default for CaretBlink {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_INTERVAL)
    }
}

impl CaretBlink {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            visible: false,
            running: false,
            elapsed: Duration::ZERO,
            generation: 0,
        }
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Token of the live blink run, if any. Hosts schedule their periodic callback with it.
    pub const fn token(&self) -> Option<BlinkToken> {
        if self.running {
            Some(BlinkToken(self.generation))
        } else {
            None
        }
    }

    /// Shows the caret and starts a new blink run, cancelling the previous one.
    pub fn restart(&mut self) -> BlinkToken {
        self.generation = self.generation.wrapping_add(1);
        self.visible = true;
        self.running = true;
        self.elapsed = Duration::ZERO;
        BlinkToken(self.generation)
    }

    /// Hides the caret and invalidates any outstanding token.
    pub fn stop(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.visible = false;
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    /// Periodic callback from a host timer. Returns whether visibility flipped.
    pub fn on_tick(&mut self, token: BlinkToken) -> bool {
        if !self.running || token.0 != self.generation {
            return false;
        }
        self.visible = !self.visible;
        true
    }

    /// Frame-clock driven variant. Returns whether visibility changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += elapsed;
        let before = self.visible;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.visible = !self.visible;
        }
        before != self.visible
    }
}

/// Caret geometry derived from the selected annotation and cursor offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretLayout {
    pub x: f32,
    pub top: f32,
    pub length: f32,
}

impl CaretLayout {
    pub fn bottom(&self) -> f32 {
        self.top + self.length
    }
}

pub fn caret_layout<M: TextMetrics + ?Sized>(
    annotation: &Annotation,
    cursor_chars: usize,
    metrics: &M,
) -> CaretLayout {
    let before_cursor = text::prefix(&annotation.text, cursor_chars);
    let extent = metrics.measure(before_cursor, &annotation.style);
    CaretLayout {
        x: annotation.x + extent.width,
        top: annotation.y - extent.height + extent.height * CARET_TOP_INSET_RATIO,
        length: extent.height * CARET_LENGTH_RATIO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::metrics::EstimatedText;
    use crate::scene::Scene;
    use crate::style::TextStyle;

    #[test]
    fn restart_invalidates_previous_token() {
        let mut blink = CaretBlink::default();
        let first = blink.restart();
        let second = blink.restart();
        assert_eq!(blink.token(), Some(second));
        assert!(blink.is_visible());
        assert!(!blink.on_tick(first));
        assert!(blink.is_visible());
        assert!(blink.on_tick(second));
        assert!(!blink.is_visible());
    }

    #[test]
    fn stop_hides_and_ignores_later_ticks() {
        let mut blink = CaretBlink::default();
        let token = blink.restart();
        blink.stop();
        assert_eq!(blink.token(), None);
        assert!(!blink.is_visible());
        assert!(!blink.on_tick(token));
        assert!(!blink.advance(Duration::from_secs(5)));
        assert!(!blink.is_visible());
    }

    #[test]
    fn advance_toggles_once_per_interval() {
        let mut blink = CaretBlink::new(Duration::from_millis(500));
        blink.restart();
        assert!(!blink.advance(Duration::from_millis(499)));
        assert!(blink.advance(Duration::from_millis(1)));
        assert!(!blink.is_visible());
        // Two whole intervals cancel out.
        assert!(!blink.advance(Duration::from_millis(1000)));
        assert!(!blink.is_visible());
    }

    #[test]
    fn caret_layout_tracks_cursor_prefix_width() {
        let mut scene = Scene::new();
        let id = scene.add("cat", Point::new(50.0, 50.0), TextStyle::default());
        let annotation = scene.get(id).expect("annotation should exist");
        let advance = EstimatedText::advance(&annotation.style);

        let layout = caret_layout(annotation, 1, &EstimatedText);
        assert!((layout.x - (50.0 + advance)).abs() < 1e-4);
        assert!((layout.top - 26.0).abs() < 1e-4);
        assert!((layout.length - 24.0).abs() < 1e-4);
        assert!((layout.bottom() - 50.0).abs() < 1e-4);

        let at_start = caret_layout(annotation, 0, &EstimatedText);
        assert_eq!(at_start.x, 50.0);
    }
}
