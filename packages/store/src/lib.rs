#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Paginated property data store.
//!
//! [`PropertyStore`] holds the current page of properties, the full
//! site-plan set, and the pagination cursor. Page changes trigger a fetch
//! through a [`PropertySource`]; failures are logged and degrade to an
//! empty slice rather than surfacing as errors. Nothing is cached across
//! pages.
//!
//! The store never applies a timeout. A hung request leaves
//! [`PropertyStore::is_loading`] set, and [`PropertyStore::loading_since`]
//! tells callers how long it has been pending.

pub mod config;
pub mod snapshot;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use homesite_property_models::{Pagination, Property, PropertyPage, SitePlan};
use homesite_source::PropertySource;

pub use config::{ConfigError, DashboardConfig, StaleResponsePolicy};
pub use snapshot::DashboardSnapshot;

/// What happened to a page request once its fetch resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The fetched page replaced the store's properties.
    Loaded,
    /// The fetch failed; properties were cleared and total pages reset
    /// to 1.
    FellBackToEmpty,
    /// A newer request was issued first, so this response was dropped.
    Discarded,
}

/// What happened to a site-plan load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitePlanOutcome {
    /// The fetched set replaced the store's site plans.
    Loaded,
    /// The fetch failed; site plans were cleared.
    FellBackToEmpty,
}

#[derive(Debug)]
struct StoreState {
    current_page: u32,
    total_pages: u32,
    properties: Arc<[Property]>,
    siteplans: Arc<[SitePlan]>,
    /// Generation of the newest page request.
    generation: u64,
    /// Set while a page request is outstanding.
    loading_since: Option<DateTime<Utc>>,
}

/// In-memory store for the current property page and all site plans.
pub struct PropertyStore {
    source: Arc<dyn PropertySource>,
    page_size: u32,
    stale_responses: StaleResponsePolicy,
    state: RwLock<StoreState>,
}

impl PropertyStore {
    /// Creates an empty store on page 1. Nothing is fetched until
    /// [`Self::request_page`], [`Self::load_siteplans`], or
    /// [`Self::refresh`] is called.
    #[must_use]
    pub fn new(
        source: Arc<dyn PropertySource>,
        page_size: u32,
        stale_responses: StaleResponsePolicy,
    ) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            stale_responses,
            state: RwLock::new(StoreState {
                current_page: 1,
                total_pages: 1,
                properties: Arc::from(Vec::new()),
                siteplans: Arc::from(Vec::new()),
                generation: 0,
                loading_since: None,
            }),
        }
    }

    /// Creates a store using the page size and stale-response policy from
    /// `config`.
    #[must_use]
    pub fn from_config(source: Arc<dyn PropertySource>, config: &DashboardConfig) -> Self {
        Self::new(source, config.page_size, config.stale_responses)
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The most recently requested page.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.read().current_page
    }

    /// Total pages reported by the last applied page response.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.read().total_pages
    }

    /// Properties requested per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Current pagination state.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        let state = self.read();
        Pagination {
            current_page: state.current_page,
            page_size: self.page_size,
            total_pages: state.total_pages,
        }
    }

    /// The current page of properties.
    #[must_use]
    pub fn properties(&self) -> Arc<[Property]> {
        Arc::clone(&self.read().properties)
    }

    /// Every site plan.
    #[must_use]
    pub fn siteplans(&self) -> Arc<[SitePlan]> {
        Arc::clone(&self.read().siteplans)
    }

    /// Whether a page request is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().loading_since.is_some()
    }

    /// When the outstanding page request started, if any.
    #[must_use]
    pub fn loading_since(&self) -> Option<DateTime<Utc>> {
        self.read().loading_since
    }

    /// Requests page `page` and waits for it to resolve.
    ///
    /// The page number is forwarded as-is; callers clamp it (see
    /// [`Pagination::clamp`]). Concurrent requests are not cancelled.
    /// Under [`StaleResponsePolicy::Discard`], a response that resolves
    /// after a newer request was issued is dropped; under
    /// [`StaleResponsePolicy::LastWriteWins`] it is applied.
    pub async fn request_page(&self, page: u32) -> PageOutcome {
        let generation = {
            let mut state = self.write();
            state.current_page = page;
            state.generation += 1;
            state.loading_since = Some(Utc::now());
            state.generation
        };

        log::info!(
            "Requesting page {page} (size {}) from {}",
            self.page_size,
            self.source.name()
        );

        let (fetched, outcome) = match self.source.fetch_properties(page, self.page_size).await {
            Ok(fetched) => (fetched, PageOutcome::Loaded),
            Err(e) => {
                log::error!("Error fetching properties page {page}: {e}");
                (PropertyPage::empty(), PageOutcome::FellBackToEmpty)
            }
        };

        let mut state = self.write();
        if self.stale_responses == StaleResponsePolicy::Discard && generation != state.generation {
            log::debug!(
                "Discarding response for page {page} (request {generation} superseded by {})",
                state.generation
            );
            return PageOutcome::Discarded;
        }

        log::debug!(
            "Applying page {page}: {} properties, {} total pages",
            fetched.properties.len(),
            fetched.total_pages
        );
        state.properties = Arc::from(fetched.properties);
        state.total_pages = fetched.total_pages.max(1);
        state.loading_since = None;
        outcome
    }

    /// Fetches the full site-plan set, replacing whatever was loaded.
    pub async fn load_siteplans(&self) -> SitePlanOutcome {
        let (siteplans, outcome) = match self.source.fetch_siteplans().await {
            Ok(siteplans) => {
                log::info!("Loaded {} site plans", siteplans.len());
                (siteplans, SitePlanOutcome::Loaded)
            }
            Err(e) => {
                log::error!("Error fetching site plans: {e}");
                (Vec::new(), SitePlanOutcome::FellBackToEmpty)
            }
        };
        self.write().siteplans = Arc::from(siteplans);
        outcome
    }

    /// Reloads the current page and the site-plan set concurrently.
    pub async fn refresh(&self) -> (PageOutcome, SitePlanOutcome) {
        let page = self.current_page();
        futures::join!(self.request_page(page), self.load_siteplans())
    }

    /// Computes every derived view from the current state.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        let (pagination, loading_since, properties, siteplans) = {
            let state = self.read();
            (
                Pagination {
                    current_page: state.current_page,
                    page_size: self.page_size,
                    total_pages: state.total_pages,
                },
                state.loading_since,
                Arc::clone(&state.properties),
                Arc::clone(&state.siteplans),
            )
        };
        DashboardSnapshot::compute(pagination, loading_since, &properties, &siteplans)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use homesite_analytics_models::MetricValue;
    use homesite_source::SourceError;
    use tokio::sync::oneshot;

    use super::*;

    /// In-memory source. Pages can be scripted up front or gated behind a
    /// oneshot so tests control when (and in what order) they resolve.
    #[derive(Default)]
    struct FakeSource {
        pages: Mutex<BTreeMap<u32, PropertyPage>>,
        gates: Mutex<BTreeMap<u32, oneshot::Receiver<PropertyPage>>>,
        siteplans: Mutex<Option<Vec<SitePlan>>>,
        requests: Mutex<Vec<(u32, u32)>>,
    }

    impl FakeSource {
        fn with_page(self, page: u32, fetched: PropertyPage) -> Self {
            self.pages.lock().unwrap().insert(page, fetched);
            self
        }

        fn with_siteplans(self, siteplans: Vec<SitePlan>) -> Self {
            *self.siteplans.lock().unwrap() = Some(siteplans);
            self
        }

        fn gate(&self, page: u32) -> oneshot::Sender<PropertyPage> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(page, rx);
            tx
        }

        fn requests(&self) -> Vec<(u32, u32)> {
            self.requests.lock().unwrap().clone()
        }
    }

    fn not_found(path: &str) -> SourceError {
        SourceError::Status {
            url: path.to_string(),
            status: 404,
        }
    }

    #[async_trait]
    impl PropertySource for FakeSource {
        fn name(&self) -> &str {
            "fake"
        }

        async fn fetch_properties(
            &self,
            page: u32,
            page_size: u32,
        ) -> Result<PropertyPage, SourceError> {
            self.requests.lock().unwrap().push((page, page_size));
            let gate = self.gates.lock().unwrap().remove(&page);
            if let Some(rx) = gate {
                return rx.await.map_err(|_| not_found("gate dropped"));
            }
            self.pages
                .lock()
                .unwrap()
                .get(&page)
                .cloned()
                .ok_or_else(|| not_found("/properties"))
        }

        async fn fetch_siteplans(&self) -> Result<Vec<SitePlan>, SourceError> {
            self.siteplans
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| not_found("/siteplans"))
        }
    }

    fn listing(city: &str) -> Property {
        Property {
            city: Some(city.to_string()),
            state: Some("TX".to_string()),
            zipcode: Some("75201".to_string()),
            homesite_price: Some(300_000.0),
            homesite_square_feet: Some(1500.0),
            ..Property::default()
        }
    }

    fn page_of(cities: &[&str], total_pages: u32) -> PropertyPage {
        PropertyPage {
            properties: cities.iter().map(|c| listing(c)).collect(),
            total_pages,
        }
    }

    fn dallas_plans() -> Vec<SitePlan> {
        vec![
            SitePlan {
                city: Some("Dallas".to_string()),
                state: Some("TX".to_string()),
                sold_count: 5,
                total_count: 10,
            },
            SitePlan {
                city: Some("dallas".to_string()),
                state: Some("tx".to_string()),
                sold_count: 3,
                total_count: 10,
            },
        ]
    }

    fn store(source: FakeSource, policy: StaleResponsePolicy) -> (Arc<FakeSource>, PropertyStore) {
        let source = Arc::new(source);
        let store = PropertyStore::new(source.clone(), 10, policy);
        (source, store)
    }

    #[test]
    fn starts_empty_on_page_one() {
        let (_, store) = store(FakeSource::default(), StaleResponsePolicy::Discard);

        assert_eq!(store.current_page(), 1);
        assert_eq!(store.total_pages(), 1);
        assert!(!store.is_loading());
        assert!(store.properties().is_empty());
        assert!(store.siteplans().is_empty());
    }

    #[tokio::test]
    async fn loads_requested_page() {
        let source = FakeSource::default().with_page(2, page_of(&["Dallas", "Austin"], 5));
        let (source, store) = store(source, StaleResponsePolicy::Discard);

        let outcome = store.request_page(2).await;

        assert_eq!(outcome, PageOutcome::Loaded);
        assert_eq!(store.current_page(), 2);
        assert_eq!(store.total_pages(), 5);
        assert_eq!(store.properties().len(), 2);
        assert!(!store.is_loading());
        assert_eq!(source.requests(), [(2, 10)]);
    }

    #[tokio::test]
    async fn page_change_replaces_previous_page() {
        let source = FakeSource::default()
            .with_page(1, page_of(&["Dallas", "Austin"], 2))
            .with_page(2, page_of(&["Tulsa"], 2));
        let (_, store) = store(source, StaleResponsePolicy::Discard);

        store.request_page(1).await;
        store.request_page(2).await;

        let properties = store.properties();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].city.as_deref(), Some("Tulsa"));
    }

    #[tokio::test]
    async fn forwards_out_of_range_pages_unvalidated() {
        let (source, store) = store(FakeSource::default(), StaleResponsePolicy::Discard);

        store.request_page(0).await;
        store.request_page(99).await;

        assert_eq!(source.requests(), [(0, 10), (99, 10)]);
        assert_eq!(store.current_page(), 99);
    }

    #[tokio::test]
    async fn failed_page_fetch_clears_properties() {
        let source = FakeSource::default().with_page(1, page_of(&["Dallas"], 4));
        let (_, store) = store(source, StaleResponsePolicy::Discard);
        store.request_page(1).await;
        assert_eq!(store.total_pages(), 4);

        let outcome = store.request_page(3).await;

        assert_eq!(outcome, PageOutcome::FellBackToEmpty);
        assert!(store.properties().is_empty());
        assert_eq!(store.total_pages(), 1);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn failed_siteplan_fetch_yields_empty_set() {
        let (_, store) = store(FakeSource::default(), StaleResponsePolicy::Discard);

        assert_eq!(store.load_siteplans().await, SitePlanOutcome::FellBackToEmpty);
        assert!(store.siteplans().is_empty());
    }

    #[tokio::test]
    async fn failed_properties_with_good_siteplans_keeps_siteplan_stats() {
        let source = FakeSource::default().with_siteplans(dallas_plans());
        let (_, store) = store(source, StaleResponsePolicy::Discard);

        let (page, plans) = store.refresh().await;

        assert_eq!(page, PageOutcome::FellBackToEmpty);
        assert_eq!(plans, SitePlanOutcome::Loaded);
        assert!(store.properties().is_empty());
        assert_eq!(store.total_pages(), 1);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.stats.total_inventory, 0);
        assert_eq!(snapshot.stats.sold_inventory, 8);
        assert_eq!(snapshot.stats.total_available, 20);
        assert_eq!(snapshot.stats.sales_pace_percent, 40);
        assert_eq!(snapshot.metros.len(), 1);
        assert_eq!(snapshot.metros[0].homes_closed, 8);
    }

    #[tokio::test]
    async fn empty_page_scenario() {
        let source = FakeSource::default()
            .with_page(1, PropertyPage::empty())
            .with_siteplans(dallas_plans());
        let (_, store) = store(source, StaleResponsePolicy::Discard);

        store.refresh().await;
        let snapshot = store.snapshot();

        assert_eq!(snapshot.stats.total_inventory, 0);
        assert_eq!(snapshot.stats.sold_inventory, 8);
        assert!(snapshot.filters.is_empty());
        assert!(snapshot.geo_points.is_empty());
        assert!(!snapshot.pagination.shows_controls());
    }

    #[tokio::test]
    async fn snapshot_derives_every_view() {
        let source = FakeSource::default()
            .with_page(1, page_of(&["Dallas", "DALLAS", "Austin"], 3))
            .with_siteplans(dallas_plans());
        let (_, store) = store(source, StaleResponsePolicy::Discard);

        store.refresh().await;
        let snapshot = store.snapshot();

        assert!(!snapshot.loading);
        assert_eq!(snapshot.pagination.total_pages, 3);
        assert_eq!(snapshot.properties.len(), 3);
        assert_eq!(snapshot.stats.average_price_per_sq_ft, 200);
        assert_eq!(snapshot.stats.price_increase_percent, MetricValue::Unavailable);
        assert_eq!(snapshot.filters.cities, ["Dallas", "DALLAS", "Austin"]);
        assert_eq!(snapshot.metros.len(), 2);
        let top = &snapshot.rankings.by_homes_closed[0];
        assert_eq!(top.name.as_str(), "Dallas, TX");
        assert_eq!(top.new_homes, 2);
        assert_eq!(snapshot.rankings.by_new_homes[0].name.as_str(), "Dallas, TX");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["stats"]["totalInventory"], 3);
        assert!(json["stats"]["priceIncreasePercent"].is_null());
    }

    #[tokio::test]
    async fn discards_superseded_responses() {
        let source = FakeSource::default();
        let first = source.gate(1);
        let second = source.gate(2);
        let (_, store) = store(source, StaleResponsePolicy::Discard);

        let driver = async {
            tokio::task::yield_now().await;
            assert!(store.is_loading());
            assert!(store.loading_since().is_some());
            second.send(page_of(&["Austin"], 2)).unwrap();
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            first.send(page_of(&["Dallas"], 2)).unwrap();
        };

        let (one, two, ()) = tokio::join!(store.request_page(1), store.request_page(2), driver);

        assert_eq!(two, PageOutcome::Loaded);
        assert_eq!(one, PageOutcome::Discarded);
        assert_eq!(store.current_page(), 2);
        assert_eq!(store.properties()[0].city.as_deref(), Some("Austin"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn stays_loading_until_newest_request_resolves() {
        let source = FakeSource::default();
        let first = source.gate(1);
        let second = source.gate(2);
        let (_, store) = store(source, StaleResponsePolicy::Discard);

        let driver = async {
            tokio::task::yield_now().await;
            first.send(page_of(&["Dallas"], 2)).unwrap();
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            assert!(store.is_loading());
            assert!(store.properties().is_empty());
            second.send(page_of(&["Austin"], 2)).unwrap();
        };

        let (one, two, ()) = tokio::join!(store.request_page(1), store.request_page(2), driver);

        assert_eq!(one, PageOutcome::Discarded);
        assert_eq!(two, PageOutcome::Loaded);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn last_write_wins_applies_late_responses() {
        let source = FakeSource::default();
        let first = source.gate(1);
        let second = source.gate(2);
        let (_, store) = store(source, StaleResponsePolicy::LastWriteWins);

        let driver = async {
            tokio::task::yield_now().await;
            second.send(page_of(&["Austin"], 2)).unwrap();
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            first.send(page_of(&["Dallas"], 2)).unwrap();
        };

        let (one, two, ()) = tokio::join!(store.request_page(1), store.request_page(2), driver);

        assert_eq!(one, PageOutcome::Loaded);
        assert_eq!(two, PageOutcome::Loaded);
        // The stale page is shown even though page 2 was requested last.
        assert_eq!(store.current_page(), 2);
        assert_eq!(store.properties()[0].city.as_deref(), Some("Dallas"));
    }

    #[test]
    fn from_config_uses_configured_page_size() {
        let config = DashboardConfig {
            page_size: 25,
            ..DashboardConfig::default()
        };
        let store = PropertyStore::from_config(Arc::new(FakeSource::default()), &config);
        assert_eq!(store.page_size(), 25);
        assert_eq!(store.pagination().page_size, 25);
    }
}
