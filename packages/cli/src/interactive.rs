//! Interactive page browser.
//!
//! Shows the acquisition view for the current page and offers a
//! `dialoguer` menu for moving between pages and switching to the market
//! view. Page numbers are clamped here before they reach the store.

use dialoguer::{Input, Select};
use homesite_property_models::Pagination;
use homesite_store::{PageOutcome, PropertyStore};

use crate::render;

/// Actions offered after each page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowseAction {
    NextPage,
    PreviousPage,
    GoToPage,
    MarketView,
    Refresh,
    Quit,
}

impl BrowseAction {
    const ALL: &[Self] = &[
        Self::NextPage,
        Self::PreviousPage,
        Self::GoToPage,
        Self::MarketView,
        Self::Refresh,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::NextPage => "Next page",
            Self::PreviousPage => "Previous page",
            Self::GoToPage => "Go to page...",
            Self::MarketView => "Market overview",
            Self::Refresh => "Refresh",
            Self::Quit => "Quit",
        }
    }

    /// Whether the action does anything from the given position.
    const fn is_available(self, pagination: &Pagination) -> bool {
        match self {
            Self::NextPage => !pagination.is_last(),
            Self::PreviousPage => !pagination.is_first(),
            Self::GoToPage => pagination.shows_controls(),
            Self::MarketView | Self::Refresh | Self::Quit => true,
        }
    }
}

/// Runs the page browser until the user quits.
///
/// # Errors
///
/// Returns an error if a user prompt fails.
pub async fn run(store: &PropertyStore) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let snapshot = store.snapshot();
        println!();
        print!("{}", render::acquisition(&snapshot));
        println!();

        let actions: Vec<BrowseAction> = BrowseAction::ALL
            .iter()
            .copied()
            .filter(|a| a.is_available(&snapshot.pagination))
            .collect();
        let labels: Vec<&str> = actions.iter().map(BrowseAction::label).collect();

        let idx = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        let pagination = store.pagination();
        match actions[idx] {
            BrowseAction::NextPage => go_to(store, pagination.next_page()).await,
            BrowseAction::PreviousPage => go_to(store, pagination.previous_page()).await,
            BrowseAction::GoToPage => {
                let requested: u32 = Input::new()
                    .with_prompt(format!("Page (1-{})", pagination.total_pages))
                    .default(pagination.current_page)
                    .interact_text()?;
                go_to(store, pagination.clamp(requested)).await;
            }
            BrowseAction::MarketView => {
                println!();
                print!("{}", render::market(&snapshot));
            }
            BrowseAction::Refresh => {
                store.refresh().await;
            }
            BrowseAction::Quit => return Ok(()),
        }
    }
}

async fn go_to(store: &PropertyStore, page: u32) {
    if store.request_page(page).await == PageOutcome::FellBackToEmpty {
        println!("Could not load page {page}; showing an empty page.");
    }
}
