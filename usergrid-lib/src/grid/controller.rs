//! The grid state machine.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::watch;

use super::COLUMN_WIDTHS_KEY;
use super::ColumnWidths;
use super::Completion;
use super::Debouncer;
use super::FetchPlan;
use super::FilterState;
use super::GridConfig;
use super::PageState;
use super::RequestCoordinator;
use super::ResultSet;
use super::SortState;
use super::plan;
use crate::api::UserSource;
use crate::api::query::ListQuery;
use crate::error::GridError;
use crate::error::SettingsError;
use crate::model::ColumnKey;
use crate::model::RecordDetail;
use crate::model::User;
use crate::settings::SettingsProvider;

/// Everything a view needs to draw the grid.
#[derive(Debug, Clone, Serialize)]
pub struct GridSnapshot {
    /// Records on the current page, in display order.
    pub rows: Vec<User>,
    /// Number of records matching the current filters.
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub page_sizes: Vec<usize>,
    pub can_prev: bool,
    pub can_next: bool,
    pub sort: SortState,
    /// Filter text as typed, including text still inside the debounce window.
    pub filters: FilterState,
    pub column_widths: BTreeMap<ColumnKey, u32>,
    pub loading: bool,
    /// Banner message of the last failed request.
    pub error: Option<String>,
    pub selected: Option<RecordDetail>,
    /// When the shown rows were last replaced by a successful fetch.
    pub loaded_at: Option<DateTime<Utc>>,
}

enum Event {
    FiltersSettled(FilterState),
    Completed(Option<Completion>),
}

/// Owns the grid state and turns operator gestures into fetches.
///
/// Every transition method is synchronous and returns once the state is
/// updated; fetches run on spawned tasks. Call [`step`](Self::step) (or
/// [`settle`](Self::settle)) from the event loop to let debounced filters
/// fire and completed fetches apply.
///
/// # Example
///
/// ```ignore
/// let client = UsersClient::builder().url("https://dummyjson.com").build()?;
/// let mut grid = GridController::new(Arc::new(client), GridConfig::default());
///
/// grid.load();
/// grid.toggle_sort(ColumnKey::Age);
/// grid.settle().await;
///
/// let snapshot = grid.snapshot();
/// ```
pub struct GridController {
    config: GridConfig,
    coordinator: RequestCoordinator,
    debouncer: Debouncer<FilterState>,

    /// Text as typed.
    filters: FilterState,
    /// Text the current rows were computed from.
    applied_filters: FilterState,
    sort: SortState,
    pages: PageState,
    widths: ColumnWidths,

    rows: Vec<User>,
    loading: bool,
    error: Option<String>,
    selected: Option<u64>,
    loaded_at: Option<DateTime<Utc>>,

    /// Whole collection from the last local fetch, keyed by the query that produced it.
    collection: Option<(ListQuery, Vec<User>)>,
    persist: Option<watch::Sender<BTreeMap<String, u32>>>,
}

impl GridController {
    /// Creates an empty grid. Nothing is fetched until [`load`](Self::load).
    pub fn new(source: Arc<dyn UserSource>, config: GridConfig) -> Self {
        let pages = PageState::new(config.initial_page_size());
        let widths = ColumnWidths::new(&config.default_widths, config.min_column_width);
        Self {
            coordinator: RequestCoordinator::new(source),
            debouncer: Debouncer::new(config.debounce),
            filters: FilterState::default(),
            applied_filters: FilterState::default(),
            sort: SortState::none(),
            pages,
            widths,
            rows: Vec::new(),
            loading: false,
            error: None,
            selected: None,
            loaded_at: None,
            collection: None,
            persist: None,
            config,
        }
    }

    /// Restores saved column widths and persists every later change.
    ///
    /// Reads the snapshot once; writes happen on a background task so width
    /// changes never wait on storage. Must be called from within a Tokio
    /// runtime.
    pub async fn attach_settings(&mut self, settings: SettingsProvider) -> Result<(), SettingsError> {
        if let Some(saved) = settings
            .get::<BTreeMap<String, u32>>(COLUMN_WIDTHS_KEY)
            .await?
        {
            log::debug!("Restoring {} saved column widths", saved.len());
            self.widths.restore(&saved);
        }

        let (tx, mut rx) = watch::channel(self.widths.to_persisted());
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let widths = rx.borrow_and_update().clone();
                if let Err(e) = settings.set(COLUMN_WIDTHS_KEY, &widths).await {
                    log::warn!("Failed to persist column widths: {}", e);
                }
            }
        });
        self.persist = Some(tx);
        Ok(())
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Fetches the current view, reusing a loaded collection when possible.
    pub fn load(&mut self) {
        self.requery();
    }

    /// Re-issues the current query, ignoring anything already loaded.
    pub fn refresh(&mut self) {
        self.collection = None;
        let plan = self.plan();
        self.issue(plan);
    }

    fn plan(&self) -> FetchPlan {
        plan(
            &self.applied_filters,
            self.sort,
            &self.pages,
            self.config.endpoint_filters,
        )
    }

    fn requery(&mut self) {
        let plan = self.plan();
        if let FetchPlan::Local(query) = &plan {
            let cached = matches!(&self.collection, Some((loaded, _)) if loaded == query);
            if cached {
                self.coordinator.cancel();
                self.loading = false;
                self.error = None;
                self.apply_collection();
                return;
            }
        }
        self.issue(plan);
    }

    fn issue(&mut self, plan: FetchPlan) {
        self.coordinator.issue(plan);
        self.loading = true;
    }

    fn apply_collection(&mut self) {
        let Some((_, users)) = &self.collection else {
            return;
        };
        let result =
            ResultSet::from_collection(users, &self.applied_filters, self.sort, &mut self.pages);
        self.rows = result.rows;
    }

    fn complete(&mut self, completion: Completion) {
        let Completion {
            token,
            plan,
            result,
        } = completion;

        if !self.coordinator.is_current(&token) {
            log::debug!("Discarding result of superseded request #{}", token.generation());
            return;
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Request #{} failed: {}", token.generation(), e);
                self.loading = false;
                self.error = Some(e.to_string());
                return;
            }
        };

        match plan {
            FetchPlan::Local(query) => {
                log::info!("Loaded {} records for local paging", page.len());
                self.collection = Some((query, page.into_users()));
                self.apply_collection();
            }
            FetchPlan::Remote(_) => {
                // newer than any loaded collection
                self.collection = None;
                let result = ResultSet::from_remote(page);
                if self.pages.reconcile(result.total) {
                    log::debug!(
                        "Page out of range for {} records, re-fetching page {}",
                        result.total,
                        self.pages.page()
                    );
                    let plan = self.plan();
                    self.issue(plan);
                    return;
                }
                log::info!("Loaded {} of {} records", result.rows.len(), result.total);
                self.rows = result.rows;
            }
        }

        self.loading = false;
        self.error = None;
        self.loaded_at = Some(Utc::now());
    }

    // =========================================================================
    // Filtering and sorting
    // =========================================================================

    /// Updates one filter box. Takes effect once typing pauses.
    pub fn set_filter(&mut self, key: ColumnKey, text: impl Into<String>) {
        self.filters.set(key, text);
        self.debouncer.push(self.filters.clone());
    }

    /// Empties every filter box and applies that immediately.
    pub fn clear_filters(&mut self) {
        self.debouncer.cancel();
        self.filters.clear();
        self.commit_filters(self.filters.clone());
    }

    fn commit_filters(&mut self, filters: FilterState) {
        if filters == self.applied_filters {
            return;
        }
        log::debug!("Applying filters {:?}", filters);
        self.applied_filters = filters;
        self.requery();
    }

    /// Cycles the sort of `key` through asc, desc and none.
    pub fn toggle_sort(&mut self, key: ColumnKey) {
        self.set_sort(self.sort.toggled(key));
    }

    /// Replaces the sort.
    pub fn set_sort(&mut self, sort: SortState) {
        if sort == self.sort {
            return;
        }
        self.sort = sort;
        self.requery();
    }

    // =========================================================================
    // Paging
    // =========================================================================

    pub fn go_to_page(&mut self, page: usize) {
        if self.pages.go_to(page) {
            self.requery();
        }
    }

    pub fn next_page(&mut self) {
        if self.pages.next() {
            self.requery();
        }
    }

    pub fn prev_page(&mut self) {
        if self.pages.prev() {
            self.requery();
        }
    }

    /// Changes the page size. Only configured sizes are accepted.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), GridError> {
        if !self.config.allows_page_size(size) {
            return Err(GridError::InvalidPageSize(size));
        }
        if self.pages.set_page_size(size) {
            self.requery();
        }
        Ok(())
    }

    // =========================================================================
    // Column widths
    // =========================================================================

    /// Grabs the right edge of `column` at pointer position `x`.
    pub fn begin_resize(&mut self, column: ColumnKey, x: i32) {
        self.widths.begin_drag(column, x);
    }

    /// Moves the held edge to `x`. Ignored when no edge is held.
    pub fn resize_to(&mut self, x: i32) {
        if self.widths.drag_to(x).is_some() {
            self.persist_widths();
        }
    }

    /// Releases the held edge.
    pub fn end_resize(&mut self) {
        self.widths.end_drag();
    }

    /// Widens `column` by `delta` pixels in one step (negative narrows).
    pub fn resize(&mut self, column: ColumnKey, delta: i32) {
        self.widths.resize(column, delta);
        self.persist_widths();
    }

    fn persist_widths(&self) {
        if let Some(tx) = &self.persist {
            tx.send_replace(self.widths.to_persisted());
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Opens the detail view of a loaded record.
    ///
    /// Returns `false`, leaving the selection unchanged, if no loaded row has this id.
    pub fn select(&mut self, id: u64) -> bool {
        if self.rows.iter().any(|user| user.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // =========================================================================
    // Driving
    // =========================================================================

    /// Waits for the next debounced filter or fetch completion and applies it.
    ///
    /// Returns `false` without waiting when neither is pending. Cancel safe,
    /// so it can sit in a `select!` next to input handling.
    pub async fn step(&mut self) -> bool {
        let event = tokio::select! {
            Some(filters) = self.debouncer.settled(), if self.debouncer.is_pending() => {
                Event::FiltersSettled(filters)
            }
            completion = self.coordinator.next_completion(), if self.coordinator.is_in_flight() => {
                Event::Completed(completion)
            }
            else => return false,
        };

        match event {
            Event::FiltersSettled(filters) => self.commit_filters(filters),
            Event::Completed(Some(completion)) => self.complete(completion),
            Event::Completed(None) => {}
        }
        true
    }

    /// Runs [`step`](Self::step) until nothing is pending.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    /// Returns `true` when no filter is waiting and no fetch is in flight.
    pub fn is_idle(&self) -> bool {
        !self.debouncer.is_pending() && !self.coordinator.is_in_flight()
    }

    // =========================================================================
    // Observation
    // =========================================================================

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Captures the current state for rendering.
    pub fn snapshot(&self) -> GridSnapshot {
        let selected = self
            .selected
            .and_then(|id| self.rows.iter().find(|user| user.id == id))
            .map(RecordDetail::from);

        GridSnapshot {
            rows: self.rows.clone(),
            total: self.pages.total(),
            page: self.pages.page(),
            total_pages: self.pages.total_pages(),
            page_size: self.pages.page_size(),
            page_sizes: self.config.page_sizes.clone(),
            can_prev: self.pages.can_prev(),
            can_next: self.pages.can_next(),
            sort: self.sort,
            filters: self.filters.clone(),
            column_widths: self.widths.as_map().clone(),
            loading: self.loading,
            error: self.error.clone(),
            selected,
            loaded_at: self.loaded_at,
        }
    }
}
