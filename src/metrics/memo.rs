use std::cell::RefCell;
use std::collections::HashMap;

use image::RgbaImage;

use super::{TextEngine, TextExtent, TextMetrics};
use crate::geometry::Point;
use crate::style::TextStyle;

const DEFAULT_CAPACITY: usize = 512;

/// Memoizes measurements on `(text, style)`. Drawing is delegated untouched.
/// The cache is cleared wholesale once it reaches capacity.
#[derive(Debug)]
pub struct MemoizedMetrics<M> {
    inner: M,
    cache: RefCell<HashMap<(String, TextStyle), TextExtent>>,
    capacity: usize,
}

impl<M> MemoizedMetrics<M> {
    pub fn new(inner: M) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: M, capacity: usize) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<M: TextMetrics> TextMetrics for MemoizedMetrics<M> {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtent {
        let key = (text.to_string(), *style);
        if let Some(extent) = self.cache.borrow().get(&key) {
            return *extent;
        }
        let extent = self.inner.measure(text, style);
        let mut cache = self.cache.borrow_mut();
        if cache.len() >= self.capacity {
            cache.clear();
        }
        cache.insert(key, extent);
        extent
    }
}

impl<M: TextEngine> TextEngine for MemoizedMetrics<M> {
    fn draw_text(&self, surface: &mut RgbaImage, text: &str, style: &TextStyle, origin: Point) {
        self.inner.draw_text(surface, text, style, origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::EstimatedText;
    use std::cell::Cell;

    struct CountingMetrics {
        calls: Cell<usize>,
    }

    impl TextMetrics for CountingMetrics {
        fn measure(&self, text: &str, style: &TextStyle) -> TextExtent {
            self.calls.set(self.calls.get() + 1);
            EstimatedText.measure(text, style)
        }
    }

    #[test]
    fn repeated_measurements_hit_the_cache() {
        let metrics = MemoizedMetrics::new(CountingMetrics {
            calls: Cell::new(0),
        });
        let style = TextStyle::default();
        let first = metrics.measure("hello", &style);
        let second = metrics.measure("hello", &style);
        assert_eq!(first, second);
        assert_eq!(metrics.inner().calls.get(), 1);

        let mut bold = style;
        bold.bold = true;
        metrics.measure("hello", &bold);
        assert_eq!(metrics.inner().calls.get(), 2);
    }

    #[test]
    fn cache_is_bounded_by_capacity() {
        let metrics = MemoizedMetrics::with_capacity(EstimatedText, 2);
        let style = TextStyle::default();
        metrics.measure("a", &style);
        metrics.measure("b", &style);
        metrics.measure("c", &style);
        assert_eq!(metrics.cached_entries(), 1);
    }
}
