//! Query planning and the single in-flight request.
//!
//! The coordinator owns at most one spawned fetch at a time. Issuing a new
//! fetch cancels the previous token and forgets its task, so only the most
//! recently issued request can ever complete through
//! [`RequestCoordinator::next_completion`].

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::FilterState;
use super::PageState;
use super::SortState;
use super::apply_filters;
use super::sort_users;
use crate::api::UserPage;
use crate::api::UserSource;
use crate::api::query::ListQuery;
use crate::error::ApiError;
use crate::model::User;

// =============================================================================
// ResultSet
// =============================================================================

/// The visible page plus the count of every matching record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub rows: Vec<User>,
    pub total: usize,
}

impl ResultSet {
    /// Takes an endpoint page as is: its ordering and its total.
    pub fn from_remote(page: UserPage) -> Self {
        let total = page.total();
        Self {
            rows: page.into_users(),
            total,
        }
    }

    /// Filters, sorts and slices a whole collection.
    ///
    /// `pages` is reconciled against the number of matches before slicing, so
    /// an out-of-range page is clamped here rather than re-fetched.
    pub fn from_collection(
        users: &[User],
        filters: &FilterState,
        sort: SortState,
        pages: &mut PageState,
    ) -> Self {
        let mut matched = apply_filters(users.to_vec(), filters);
        sort_users(&mut matched, sort);
        pages.reconcile(matched.len());
        Self {
            rows: pages.slice(&matched).to_vec(),
            total: matched.len(),
        }
    }
}

// =============================================================================
// FetchPlan
// =============================================================================

/// What to request and who finishes the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// The endpoint filters, orders and paginates; its page is shown as is.
    Remote(ListQuery),
    /// The endpoint returns a whole collection; filtering, sorting and
    /// pagination happen locally.
    Local(ListQuery),
}

impl FetchPlan {
    pub fn query(&self) -> &ListQuery {
        match self {
            FetchPlan::Remote(query) | FetchPlan::Local(query) => query,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, FetchPlan::Local(_))
    }
}

/// Decides where filtering and sorting happen for the given state.
///
/// Without endpoint filters, any active filter or a sort the endpoint cannot
/// express means fetching everything and working locally. With endpoint
/// filters, expressible filters go to the filter route; the endpoint also
/// paginates unless the sort has to be local.
///
/// # Example
///
/// ```
/// use usergrid_lib::grid::{FetchPlan, FilterState, PageState, SortState, plan};
/// use usergrid_lib::model::ColumnKey;
///
/// let mut filters = FilterState::default();
/// let pages = PageState::new(10);
///
/// let remote = plan(&filters, SortState::asc(ColumnKey::Age), &pages, false);
/// assert!(!remote.is_local());
///
/// filters.set(ColumnKey::City, "Kazan");
/// let local = plan(&filters, SortState::asc(ColumnKey::Age), &pages, false);
/// assert!(local.is_local());
/// ```
pub fn plan(
    filters: &FilterState,
    sort: SortState,
    pages: &PageState,
    endpoint_filters: bool,
) -> FetchPlan {
    let order = sort.to_order_by();

    let field_filters = if !filters.is_active() {
        Vec::new()
    } else if !endpoint_filters {
        return FetchPlan::Local(ListQuery::all());
    } else {
        match filters.to_field_filters() {
            Some(field_filters) => field_filters,
            None => return FetchPlan::Local(ListQuery::all()),
        }
    };

    match order {
        Ok(order) => {
            let mut query = ListQuery::page(pages.page_size(), pages.offset());
            if let Some(order) = order {
                query = query.order_by(order);
            }
            FetchPlan::Remote(field_filters.into_iter().fold(query, ListQuery::filter))
        }
        Err(()) => FetchPlan::Local(field_filters.into_iter().fold(ListQuery::all(), ListQuery::filter)),
    }
}

// =============================================================================
// RequestToken
// =============================================================================

/// Handle of one issued fetch.
///
/// Tokens are ordered by `generation`; a token is current only while it is
/// the latest one issued and has not been cancelled.
#[derive(Debug, Clone)]
pub struct RequestToken {
    generation: u64,
    cancel: CancellationToken,
}

impl RequestToken {
    /// Monotonic issue number.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` once a newer request superseded this one.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl PartialEq for RequestToken {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation
    }
}

impl Eq for RequestToken {}

// =============================================================================
// RequestCoordinator
// =============================================================================

/// A finished fetch, delivered back to the controller.
#[derive(Debug)]
pub struct Completion {
    pub token: RequestToken,
    pub plan: FetchPlan,
    pub result: Result<UserPage, ApiError>,
}

struct InFlight {
    token: RequestToken,
    plan: FetchPlan,
    handle: JoinHandle<Option<Result<UserPage, ApiError>>>,
}

/// Issues fetches and guarantees at most one of them is live.
pub struct RequestCoordinator {
    source: Arc<dyn UserSource>,
    generation: u64,
    current: Option<InFlight>,
}

impl RequestCoordinator {
    /// Creates a coordinator with nothing in flight.
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        Self {
            source,
            generation: 0,
            current: None,
        }
    }

    /// Cancels whatever is in flight and starts `plan` on a new task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn issue(&mut self, plan: FetchPlan) -> RequestToken {
        self.cancel();

        self.generation += 1;
        let token = RequestToken {
            generation: self.generation,
            cancel: CancellationToken::new(),
        };
        log::debug!("Issuing request #{}: {:?}", token.generation, plan);

        let source = Arc::clone(&self.source);
        let query = plan.query().clone();
        let cancel = token.cancel.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = source.list_users(&query) => Some(result),
            }
        });

        self.current = Some(InFlight {
            token: token.clone(),
            plan,
            handle,
        });
        token
    }

    /// Cancels the in-flight request, if any. Its result will never be delivered.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.current.take() {
            log::debug!("Cancelling request #{}", previous.token.generation);
            previous.token.cancel.cancel();
        }
    }

    /// Returns `true` while a request is awaiting completion.
    pub fn is_in_flight(&self) -> bool {
        self.current.is_some()
    }

    /// Returns `true` if `token` belongs to the latest, uncancelled request.
    pub fn is_current(&self, token: &RequestToken) -> bool {
        token.generation == self.generation && !token.is_cancelled()
    }

    /// Waits for the in-flight request to finish.
    ///
    /// Returns `None` at once when nothing is in flight. Cancel safe: if the
    /// returned future is dropped early, the request stays in flight.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        let joined = (&mut self.current.as_mut()?.handle).await;
        let InFlight { token, plan, .. } = self.current.take()?;

        let result = match joined {
            Ok(Some(result)) => result,
            Ok(None) => return None,
            Err(e) => Err(ApiError::from(e)),
        };
        Some(Completion {
            token,
            plan,
            result,
        })
    }
}

impl Drop for RequestCoordinator {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::api::query::OrderBy;
    use crate::model::ColumnKey;

    fn user(id: u64, age: u32, city: &str) -> User {
        let mut user = User {
            id,
            age,
            last_name: format!("L{id}"),
            ..User::default()
        };
        user.address.city = city.into();
        user
    }

    fn pages(size: usize, total: usize, page: usize) -> PageState {
        let mut pages = PageState::new(size);
        pages.reconcile(total);
        pages.go_to(page);
        pages
    }

    #[test]
    fn test_plan_remote_page_with_order() {
        let plan = plan(
            &FilterState::default(),
            SortState::desc(ColumnKey::Email),
            &pages(10, 40, 3),
            false,
        );
        assert_eq!(
            plan,
            FetchPlan::Remote(ListQuery::page(10, 20).order_by(OrderBy::desc("email")))
        );
    }

    #[test]
    fn test_plan_unsorted_is_remote() {
        let plan = plan(&FilterState::default(), SortState::none(), &pages(5, 0, 1), false);
        assert_eq!(plan, FetchPlan::Remote(ListQuery::page(5, 0)));
    }

    #[test]
    fn test_plan_local_sort_fetches_everything() {
        for key in [ColumnKey::FullName, ColumnKey::Gender, ColumnKey::Country, ColumnKey::City] {
            let plan = plan(&FilterState::default(), SortState::asc(key), &pages(10, 0, 1), false);
            assert_eq!(plan, FetchPlan::Local(ListQuery::all()));
        }
    }

    #[test]
    fn test_plan_active_filter_fetches_everything() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::Email, "gmail");
        let plan = plan(&filters, SortState::asc(ColumnKey::Age), &pages(10, 0, 1), false);
        assert_eq!(plan, FetchPlan::Local(ListQuery::all()));
    }

    #[test]
    fn test_plan_endpoint_filters() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::Gender, "ж");

        let remote = plan(&filters, SortState::asc(ColumnKey::Age), &pages(10, 0, 1), true);
        assert_eq!(
            remote,
            FetchPlan::Remote(
                ListQuery::page(10, 0)
                    .order_by(OrderBy::asc("age"))
                    .filter(crate::api::query::FieldFilter::eq("gender", "female"))
            )
        );

        let local = plan(&filters, SortState::asc(ColumnKey::City), &pages(10, 0, 1), true);
        assert_eq!(
            local,
            FetchPlan::Local(
                ListQuery::all().filter(crate::api::query::FieldFilter::eq("gender", "female"))
            )
        );

        filters.set(ColumnKey::FullName, "Smith");
        let composite = plan(&filters, SortState::none(), &pages(10, 0, 1), true);
        assert_eq!(composite, FetchPlan::Local(ListQuery::all()));
    }

    #[test]
    fn test_plan_unknown_gender_stays_local() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::Gender, "q");

        let plan = plan(&filters, SortState::asc(ColumnKey::Age), &pages(10, 0, 1), true);
        assert_eq!(plan, FetchPlan::Local(ListQuery::all()));

        let users = vec![user(1, 30, "Kazan")];
        let mut pages = pages(10, 0, 1);
        let result = ResultSet::from_collection(&users, &filters, SortState::none(), &mut pages);
        assert!(result.rows.is_empty());
        assert_eq!(result.total, 0);
    }

    #[test]
    fn test_collection_result_filters_sorts_and_slices() {
        let users: Vec<User> = (1..=23)
            .map(|id| user(id, 100 - id as u32, if id % 2 == 0 { "Kazan" } else { "Omsk" }))
            .collect();

        let mut filters = FilterState::default();
        filters.set(ColumnKey::City, "kaz");
        let mut pages = pages(5, 23, 4);

        let result =
            ResultSet::from_collection(&users, &filters, SortState::asc(ColumnKey::Age), &mut pages);

        // 11 even ids match; page 4 of 5 no longer exists and clamps to 3
        assert_eq!(result.total, 11);
        assert_eq!(pages.page(), 3);
        let ids: Vec<u64> = result.rows.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_remote_result_trusts_total() {
        let page = UserPage::new(vec![user(1, 30, "")]).with_total(208);
        let result = ResultSet::from_remote(page);
        assert_eq!(result.total, 208);
        assert_eq!(result.rows.len(), 1);
    }

    struct Slow(Duration);

    #[async_trait]
    impl UserSource for Slow {
        async fn list_users(&self, query: &ListQuery) -> Result<UserPage, ApiError> {
            tokio::time::sleep(self.0).await;
            let total = match query.window() {
                crate::api::query::Window::Page { skip, .. } => skip,
                crate::api::query::Window::All => 0,
            };
            Ok(UserPage::new(Vec::new()).with_total(total))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reissue_supersedes_previous() {
        let mut coordinator = RequestCoordinator::new(Arc::new(Slow(Duration::from_millis(100))));

        let first = coordinator.issue(FetchPlan::Remote(ListQuery::page(10, 0)));
        let second = coordinator.issue(FetchPlan::Remote(ListQuery::page(10, 10)));

        assert!(first.is_cancelled());
        assert!(!coordinator.is_current(&first));
        assert!(coordinator.is_current(&second));

        let completion = coordinator.next_completion().await.unwrap();
        assert_eq!(completion.token, second);
        assert_eq!(completion.result.unwrap().total(), 10);

        assert!(!coordinator.is_in_flight());
        assert!(coordinator.next_completion().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_request() {
        let mut coordinator = RequestCoordinator::new(Arc::new(Slow(Duration::from_millis(100))));
        let token = coordinator.issue(FetchPlan::Local(ListQuery::all()));

        coordinator.cancel();

        assert!(token.is_cancelled());
        assert!(!coordinator.is_in_flight());
        assert!(coordinator.next_completion().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_request() {
        let mut coordinator = RequestCoordinator::new(Arc::new(Slow(Duration::from_millis(100))));
        coordinator.issue(FetchPlan::Remote(ListQuery::page(5, 5)));

        let early =
            tokio::time::timeout(Duration::from_millis(10), coordinator.next_completion()).await;
        assert!(early.is_err());
        assert!(coordinator.is_in_flight());

        let completion = coordinator.next_completion().await.unwrap();
        assert_eq!(completion.result.unwrap().total(), 5);
    }
}
