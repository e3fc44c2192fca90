//! Pagination state and page-control helpers.
//!
//! The data store accepts any page number; clamping to
//! `[1, total_pages]` is done here, on the caller's side.

use serde::{Deserialize, Serialize};

/// Number of leading page links shown before an ellipsis.
const LEADING_PAGE_LINKS: u32 = 5;

/// Current position within a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// The page most recently requested (1-based).
    pub current_page: u32,
    /// Records requested per page.
    pub page_size: u32,
    /// Total pages reported by the last successful fetch.
    pub total_pages: u32,
}

/// A single entry in a row of page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "page")]
pub enum PageLink {
    /// A link to a specific page.
    Page(u32),
    /// A gap between the leading pages and the last page.
    Ellipsis,
}

impl Pagination {
    /// Whether page controls are worth showing at all.
    #[must_use]
    pub const fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// The page before the current one, clamped to 1.
    #[must_use]
    pub fn previous_page(&self) -> u32 {
        self.current_page.saturating_sub(1).max(1)
    }

    /// The page after the current one, clamped to `total_pages`.
    #[must_use]
    pub fn next_page(&self) -> u32 {
        self.current_page
            .saturating_add(1)
            .min(self.total_pages.max(1))
    }

    /// Clamps an arbitrary page number into `[1, total_pages]`.
    #[must_use]
    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages.max(1))
    }

    /// Whether the current page is the first one.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.current_page <= 1
    }

    /// Whether the current page is the last one.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// Page links to render: the first five pages, then an ellipsis and
    /// the last page when there are more than five.
    #[must_use]
    pub fn page_links(&self) -> Vec<PageLink> {
        let leading = self.total_pages.min(LEADING_PAGE_LINKS);
        let mut links: Vec<PageLink> = (1..=leading).map(PageLink::Page).collect();
        if self.total_pages > LEADING_PAGE_LINKS {
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(self.total_pages));
        }
        links
    }
}
