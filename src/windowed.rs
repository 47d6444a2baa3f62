use serde::Serialize;

/// Half-open index range `[start, end)` of the visible items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowRange {
    pub start: usize,
    pub end: usize,
}

impl WindowRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// An item of the visible slice, with its absolute vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placed<'a, T> {
    pub index: usize,
    pub top: f64,
    pub item: &'a T,
}

/// Visible range of a list of `len` items scrolled to `scroll_offset`.
///
/// Panics if `item_height` is not a positive finite number.
pub fn visible_range(len: usize, item_height: f64, visible_count: usize, scroll_offset: f64) -> WindowRange {
    assert!(
        item_height.is_finite() && item_height > 0.0,
        "item height must be positive, got {item_height}"
    );

    let raw = if scroll_offset.is_finite() && scroll_offset > 0.0 {
        (scroll_offset / item_height).floor() as usize
    } else if scroll_offset == f64::INFINITY {
        usize::MAX
    } else {
        0
    };
    let start = raw.min(len.saturating_sub(visible_count));
    let end = start.saturating_add(visible_count).min(len);
    WindowRange { start, end }
}

pub fn windowed_slice<T>(items: &[T], item_height: f64, visible_count: usize, scroll_offset: f64) -> Vec<Placed<'_, T>> {
    let range = visible_range(items.len(), item_height, visible_count, scroll_offset);
    items[range.start..range.end]
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let index = range.start + i;
            Placed {
                index,
                top: index as f64 * item_height,
                item,
            }
        })
        .collect()
}

/// Height of the scroll spacer for `len` items.
pub fn total_height(len: usize, item_height: f64) -> f64 {
    len.saturating_sub(1) as f64 * item_height
}

/// Largest scroll offset that still changes the visible range.
pub fn max_scroll_offset(len: usize, item_height: f64, visible_count: usize) -> f64 {
    len.saturating_sub(visible_count) as f64 * item_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn top_of_list() {
        assert_eq!(visible_range(100, 30.0, 10, 0.0), WindowRange { start: 0, end: 10 });
    }

    #[test]
    fn scrolls_by_whole_items() {
        assert_eq!(visible_range(100, 30.0, 10, 95.0), WindowRange { start: 3, end: 13 });
    }

    #[test]
    fn clamps_at_end_of_list() {
        assert_eq!(visible_range(100, 30.0, 10, 1e9), WindowRange { start: 90, end: 100 });
        assert_eq!(visible_range(100, 30.0, 10, f64::INFINITY), WindowRange { start: 90, end: 100 });
    }

    #[test]
    fn short_lists_start_at_zero() {
        assert_eq!(visible_range(4, 30.0, 10, 500.0), WindowRange { start: 0, end: 4 });
        assert!(visible_range(0, 30.0, 10, 500.0).is_empty());
    }

    #[test]
    fn negative_and_nan_offsets_clamp_to_top() {
        assert_eq!(visible_range(50, 30.0, 10, -120.0).start, 0);
        assert_eq!(visible_range(50, 30.0, 10, f64::NAN).start, 0);
    }

    #[test]
    #[should_panic(expected = "item height")]
    fn zero_item_height_panics() {
        visible_range(10, 0.0, 3, 0.0);
    }

    #[test]
    fn placed_items_carry_absolute_offsets() {
        let items: Vec<u32> = (0..20).collect();
        let slice = windowed_slice(&items, 30.0, 3, 65.0);
        let placed: Vec<(usize, f64, u32)> = slice.iter().map(|p| (p.index, p.top, *p.item)).collect();
        assert_eq!(placed, vec![(2, 60.0, 2), (3, 90.0, 3), (4, 120.0, 4)]);
    }

    #[test]
    fn spacer_height() {
        assert_eq!(total_height(100, 30.0), 2970.0);
        assert_eq!(total_height(0, 30.0), 0.0);
        assert_eq!(max_scroll_offset(100, 30.0, 10), 2700.0);
    }

    proptest! {
        #[test]
        fn slice_length_is_bounded(
            len in 0usize..500,
            visible in 0usize..50,
            height in 1f64..100.0,
            offset in -1000f64..100_000.0,
        ) {
            let range = visible_range(len, height, visible, offset);
            prop_assert!(range.start <= range.end);
            prop_assert!(range.end <= len);
            prop_assert_eq!(range.len(), visible.min(len - range.start));
            prop_assert_eq!(range, visible_range(len, height, visible, offset));
        }
    }
}
