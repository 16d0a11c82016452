//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks which entries of the list are visible and
//! handles all scroll operations. Offsets are counted in entries, not
//! terminal rows.

use std::ops::Range;

use super::ROW_STRIDE;

/// Manages the visible portion of the entry list.
///
/// The viewport tracks:
/// - List area dimensions (width, height in terminal rows)
/// - Current scroll offset (index of the first visible entry)
/// - Total number of entries
///
/// # Example
///
/// ```
/// use robolist::ui::viewport::Viewport;
///
/// // 24 rows fit four 6-row entries.
/// let mut vp = Viewport::new(80, 24, 10);
/// assert_eq!(vp.visible_range(), 0..4);
///
/// vp.scroll_down(3);
/// assert_eq!(vp.visible_range(), 3..7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total: usize,
}

impl Viewport {
    /// Create a new viewport.
    ///
    /// # Arguments
    ///
    /// * `width` - List area width in columns
    /// * `height` - List area height in rows
    /// * `total` - Number of entries in the list
    pub const fn new(width: u16, height: u16, total: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total,
        }
    }

    /// Index of the first visible entry.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    /// Entries at least partially visible at once.
    pub const fn capacity(&self) -> usize {
        let rows = self.height as usize;
        let stride = ROW_STRIDE as usize;
        let n = rows.div_ceil(stride);
        if n == 0 { 1 } else { n }
    }

    /// Entries that fit completely; one page of scrolling.
    pub const fn page_size(&self) -> usize {
        let n = self.height as usize / ROW_STRIDE as usize;
        if n == 0 { 1 } else { n }
    }

    /// Range of entry indices that may appear on screen.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total);
        let end = (self.offset + self.capacity()).min(self.total);
        start..end
    }

    const fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.page_size())
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_size());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_size());
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Update the entry count after the list changed.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp();
    }

    /// Update dimensions after a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_counts_partial_rows() {
        assert_eq!(Viewport::new(80, 24, 10).capacity(), 4);
        assert_eq!(Viewport::new(80, 25, 10).capacity(), 5);
        assert_eq!(Viewport::new(80, 0, 10).capacity(), 1);
    }

    #[test]
    fn test_visible_range_clamps_to_total() {
        let vp = Viewport::new(80, 60, 3);
        assert_eq!(vp.visible_range(), 0..3);
    }

    #[test]
    fn test_scroll_down_stops_at_last_page() {
        let mut vp = Viewport::new(80, 24, 10);
        vp.scroll_down(100);
        assert_eq!(vp.offset(), 6);
        assert!(!vp.can_scroll_down());
        assert!(vp.can_scroll_up());
    }

    #[test]
    fn test_page_navigation() {
        let mut vp = Viewport::new(80, 24, 20);
        vp.page_down();
        assert_eq!(vp.offset(), 4);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 16);
        vp.go_to_top();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_short_list_cannot_scroll() {
        let mut vp = Viewport::new(80, 24, 3);
        assert!(!vp.can_scroll_down());
        vp.scroll_down(1);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_resize_and_set_total_clamp_offset() {
        let mut vp = Viewport::new(80, 12, 10);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 8);
        vp.resize(100, 60);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.width(), 100);
        vp.resize(100, 12);
        vp.go_to_bottom();
        vp.set_total(12);
        assert_eq!(vp.offset(), 8);
        assert_eq!(vp.total(), 12);
    }
}
