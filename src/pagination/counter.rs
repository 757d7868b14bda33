//! Bounded page counter with a visible-page window.
//!
//! No registry: the current page is a plain reactive integer clamped into
//! `1..=pages`. [`PageCounter::items`] produces the page buttons to show,
//! truncating with ellipses when there are more pages than `visible` slots.

use std::fmt;

use spark_signals::{signal, Signal};

/// Counter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCounterOptions {
    /// Initial 1-based page.
    pub page: usize,
    /// Number of items being paged.
    pub size: usize,
    /// Items per page (treated as at least 1).
    pub items_per_page: usize,
    /// Maximum number of entries `items` returns.
    pub visible: usize,
}

impl Default for PageCounterOptions {
    fn default() -> Self {
        Self {
            page: 1,
            size: 0,
            items_per_page: 10,
            visible: 5,
        }
    }
}

/// One entry of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Ellipsis => f.write_str("…"),
        }
    }
}

/// Page counter. Clones share the same signals.
#[derive(Clone)]
pub struct PageCounter {
    page: Signal<usize>,
    size: Signal<usize>,
    items_per_page: Signal<usize>,
    visible: usize,
}

impl Default for PageCounter {
    fn default() -> Self {
        Self::new(PageCounterOptions::default())
    }
}

impl PageCounter {
    pub fn new(options: PageCounterOptions) -> Self {
        let counter = Self {
            page: signal(1),
            size: signal(options.size),
            items_per_page: signal(options.items_per_page.max(1)),
            visible: options.visible,
        };
        counter.select(options.page);
        counter
    }

    /// The page signal, for effects and deriveds.
    pub fn page_signal(&self) -> Signal<usize> {
        self.page.clone()
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page.get()
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page.get()
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Page count, never less than 1.
    pub fn pages(&self) -> usize {
        self.size.get().div_ceil(self.items_per_page.get()).max(1)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move to `page`, clamped into `1..=pages`. Returns true if it changed.
    pub fn select(&self, page: usize) -> bool {
        let page = page.clamp(1, self.pages());
        if page == self.page.get() {
            return false;
        }
        self.page.set(page);
        true
    }

    pub fn first(&self) -> bool {
        self.select(1)
    }

    pub fn last(&self) -> bool {
        self.select(self.pages())
    }

    pub fn next(&self) -> bool {
        self.select(self.page() + 1)
    }

    pub fn prev(&self) -> bool {
        self.select(self.page().saturating_sub(1))
    }

    pub fn is_first(&self) -> bool {
        self.page() == 1
    }

    pub fn is_last(&self) -> bool {
        self.page() == self.pages()
    }

    /// Zero-based offset of the current page's first item.
    pub fn page_start(&self) -> usize {
        (self.page() - 1) * self.items_per_page()
    }

    /// Exclusive end offset of the current page, capped at `size`.
    pub fn page_stop(&self) -> usize {
        (self.page() * self.items_per_page()).min(self.size())
    }

    pub fn set_size(&self, size: usize) {
        self.size.set(size);
        self.clamp();
    }

    pub fn set_items_per_page(&self, items_per_page: usize) {
        self.items_per_page.set(items_per_page.max(1));
        self.clamp();
    }

    fn clamp(&self) {
        self.select(self.page());
    }

    // =========================================================================
    // Window
    // =========================================================================

    /// Page numbers and ellipses to display, at most `visible` entries.
    pub fn items(&self) -> Vec<PageItem> {
        window(self.page(), self.pages(), self.visible)
    }
}

fn window(page: usize, pages: usize, visible: usize) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if pages <= visible {
        return (1..=pages).map(Page).collect();
    }
    if visible <= 2 {
        return vec![Page(page)];
    }
    if visible == 3 {
        let middle = page.clamp(2, pages - 1);
        return vec![Page(1), Page(middle), Page(pages)];
    }

    let boundary = visible - 2;
    let middle = visible - 4;

    let mut items = Vec::with_capacity(visible);
    if page <= boundary {
        items.extend((1..=boundary).map(Page));
        items.push(Ellipsis);
        items.push(Page(pages));
    } else if page > pages - boundary {
        items.push(Page(1));
        items.push(Ellipsis);
        items.extend((pages - boundary + 1..=pages).map(Page));
    } else if middle == 0 {
        let hidden_left = page - 2;
        let hidden_right = pages - page - 1;
        items.push(Page(1));
        if hidden_left >= hidden_right {
            items.push(Ellipsis);
            items.push(Page(page));
        } else {
            items.push(Page(page));
            items.push(Ellipsis);
        }
        items.push(Page(pages));
    } else {
        let start = page - middle / 2;
        items.push(Page(1));
        items.push(Ellipsis);
        items.extend((start..start + middle).map(Page));
        items.push(Ellipsis);
        items.push(Page(pages));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::effect;
    use std::cell::Cell;
    use std::rc::Rc;
    use super::PageItem::{Ellipsis, Page};

    fn counter(page: usize, pages: usize, visible: usize) -> PageCounter {
        PageCounter::new(PageCounterOptions {
            page,
            size: pages * 10,
            items_per_page: 10,
            visible,
        })
    }

    fn render(items: &[PageItem]) -> String {
        items.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_centered_window() {
        let counter = counter(10, 20, 7);
        let items = counter.items();

        assert_eq!(render(&items), "1 … 9 10 11 … 20");
        assert!(items.len() <= 7);
    }

    #[test]
    fn test_all_pages_fit() {
        let counter = counter(2, 5, 7);
        assert_eq!(counter.items(), (1..=5).map(Page).collect::<Vec<_>>());
    }

    #[test]
    fn test_left_and_right_layouts() {
        assert_eq!(render(&counter(1, 20, 7).items()), "1 2 3 4 5 … 20");
        assert_eq!(render(&counter(5, 20, 7).items()), "1 2 3 4 5 … 20");
        assert_eq!(render(&counter(6, 20, 7).items()), "1 … 5 6 7 … 20");
        assert_eq!(render(&counter(15, 20, 7).items()), "1 … 14 15 16 … 20");
        assert_eq!(render(&counter(16, 20, 7).items()), "1 … 16 17 18 19 20");
        assert_eq!(render(&counter(20, 20, 7).items()), "1 … 16 17 18 19 20");
    }

    #[test]
    fn test_small_visible() {
        assert_eq!(counter(4, 10, 1).items(), vec![Page(4)]);
        assert_eq!(counter(4, 10, 2).items(), vec![Page(4)]);

        assert_eq!(counter(1, 10, 3).items(), vec![Page(1), Page(2), Page(10)]);
        assert_eq!(counter(4, 10, 3).items(), vec![Page(1), Page(4), Page(10)]);
        assert_eq!(counter(10, 10, 3).items(), vec![Page(1), Page(9), Page(10)]);
    }

    #[test]
    fn test_visible_four_single_ellipsis() {
        assert_eq!(render(&counter(2, 10, 4).items()), "1 2 … 10");
        assert_eq!(render(&counter(4, 10, 4).items()), "1 4 … 10");
        assert_eq!(render(&counter(6, 10, 4).items()), "1 … 6 10");
        assert_eq!(render(&counter(5, 9, 4).items()), "1 … 5 9");
        assert_eq!(render(&counter(9, 10, 4).items()), "1 … 9 10");
    }

    #[test]
    fn test_window_never_exceeds_visible() {
        for visible in 1..12 {
            for pages in 1..30 {
                for page in 1..=pages {
                    let items = window(page, pages, visible);
                    assert!(items.len() <= visible.max(1), "{page}/{pages} in {visible}");
                    assert!(items.contains(&Page(page)), "{page}/{pages} in {visible}");
                }
            }
        }
    }

    #[test]
    fn test_select_clamps() {
        let counter = counter(1, 5, 5);

        assert!(counter.select(9));
        assert_eq!(counter.page(), 5);
        assert!(!counter.next());
        assert!(counter.is_last());

        assert!(counter.select(0));
        assert_eq!(counter.page(), 1);
        assert!(!counter.prev());
        assert!(counter.is_first());
    }

    #[test]
    fn test_page_offsets() {
        let counter = PageCounter::new(PageCounterOptions {
            page: 3,
            size: 25,
            items_per_page: 10,
            visible: 5,
        });

        assert_eq!(counter.pages(), 3);
        assert_eq!(counter.page_start(), 20);
        assert_eq!(counter.page_stop(), 25);
    }

    #[test]
    fn test_resize_reclamps() {
        let counter = counter(8, 10, 5);

        counter.set_size(35);
        assert_eq!(counter.pages(), 4);
        assert_eq!(counter.page(), 4);

        counter.set_items_per_page(0);
        assert_eq!(counter.items_per_page(), 1);
        assert_eq!(counter.pages(), 35);
        assert_eq!(counter.page(), 4);
    }

    #[test]
    fn test_empty_counter_has_one_page() {
        let counter = PageCounter::default();
        assert_eq!(counter.pages(), 1);
        assert_eq!(counter.items(), vec![Page(1)]);
        assert!(counter.is_first() && counter.is_last());
    }

    #[test]
    fn test_page_signal_drives_effects() {
        let counter = counter(1, 10, 5);
        let runs = Rc::new(Cell::new(0));

        let runs_clone = runs.clone();
        let page = counter.page_signal();
        let _e = effect(move || {
            let _ = page.get();
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        counter.next();
        assert_eq!(runs.get(), 2);

        // Clamped no-op leaves the signal alone.
        counter.first();
        counter.prev();
        assert_eq!(runs.get(), 3);
    }

    #[test]
    fn test_ellipsis_display() {
        assert_eq!(Ellipsis.to_string(), "…");
        assert_eq!(Page(12).to_string(), "12");
    }
}
