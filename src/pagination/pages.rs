//! Registry-backed pagination.
//!
//! Pages are tickets (`id "page-N"`, value `N`) navigated by a [`Step`]. The
//! current page is the selected ticket's index plus one, or 0 when nothing is
//! selected.

use std::cell::Cell;

use tracing::debug;

use crate::engine::{Registry, RegistryOptions};
use crate::state::{Step, StepOptions};
use crate::types::{Mandatory, TicketProps};

/// Pagination configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Number of items being paged. Falls back to `total` for the page count.
    pub size: Option<usize>,
    /// Items per page (treated as at least 1).
    pub per_page: usize,
    /// Explicit item total for `to`.
    pub total: Option<usize>,
    pub circular: bool,
    pub mandatory: Mandatory,
    pub registry: RegistryOptions,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            size: None,
            per_page: 10,
            total: None,
            circular: false,
            mandatory: Mandatory::Force,
            registry: RegistryOptions::default(),
        }
    }
}

/// Page-ticket id for a 1-based page number.
pub fn page_id(page: usize) -> String {
    format!("page-{page}")
}

/// Pagination over page tickets.
pub struct Pagination {
    step: Step<usize>,
    size: Cell<Option<usize>>,
    per_page: usize,
    total: Option<usize>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PaginationOptions::default())
    }
}

impl Pagination {
    pub fn new(options: PaginationOptions) -> Self {
        let step = Step::new(StepOptions {
            circular: options.circular,
            mandatory: options.mandatory,
            registry: options.registry,
        });
        let pagination = Self {
            step,
            size: Cell::new(options.size),
            per_page: options.per_page.max(1),
            total: options.total,
        };
        pagination.rebuild(0);
        pagination
    }

    pub fn step(&self) -> &Step<usize> {
        &self.step
    }

    pub fn registry(&self) -> &Registry<usize> {
        self.step.registry()
    }

    /// Page count derived from `size` (or `total`).
    fn page_count(&self) -> usize {
        self.size
            .get()
            .or(self.total)
            .map_or(0, |items| items.div_ceil(self.per_page))
    }

    fn rebuild(&self, keep: usize) {
        let count = self.page_count();
        let registry = self.registry();
        registry.batch(|| {
            registry.clear();
            registry.onboard((1..=count).map(|n| TicketProps::with_id(page_id(n)).value(n)));
            if keep > 0 {
                self.go_to_page(keep.min(count));
            }
        });
        debug!(pages = count, page = self.page(), "pagination rebuilt");
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current 1-based page, 0 when no page is selected.
    pub fn page(&self) -> usize {
        self.step.selected_index().map_or(0, |index| index + 1)
    }

    pub fn total_pages(&self) -> usize {
        self.step.size()
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Explicit total, else the item count, else a full-pages estimate.
    pub fn total(&self) -> usize {
        self.total
            .or(self.size.get())
            .unwrap_or(self.total_pages() * self.per_page)
    }

    /// 1-based position of the first item on the current page.
    pub fn from(&self) -> usize {
        match self.page() {
            0 => 0,
            page => (page - 1) * self.per_page + 1,
        }
    }

    /// 1-based position of the last item on the current page, capped at `total`.
    pub fn to(&self) -> usize {
        match self.page() {
            0 => 0,
            page => (page * self.per_page).min(self.total()),
        }
    }

    /// Items on the current page.
    pub fn count(&self) -> usize {
        match self.page() {
            0 => 0,
            _ => (self.to() + 1).saturating_sub(self.from()),
        }
    }

    pub fn is_first(&self) -> bool {
        self.page() == 1
    }

    pub fn is_last(&self) -> bool {
        let page = self.page();
        page > 0 && page == self.total_pages()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Select page `page`. No-op for out-of-range or disabled pages.
    pub fn go_to_page(&self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() {
            return false;
        }
        let Some(id) = self.registry().lookup(page - 1) else {
            return false;
        };
        if self.registry().get(&id).is_none_or(|t| t.disabled) {
            return false;
        }
        self.step.select(id)
    }

    pub fn first(&self) -> bool {
        self.step.first()
    }

    pub fn last(&self) -> bool {
        self.step.last()
    }

    pub fn next(&self) -> bool {
        self.step.next()
    }

    pub fn prev(&self) -> bool {
        self.step.prev()
    }

    /// Change the item count, rebuilding the page tickets. The current page is
    /// kept where it still exists and clamped otherwise.
    pub fn resize(&self, size: usize) {
        let keep = self.page();
        self.size.set(Some(size));
        self.rebuild(keep);
    }
}
