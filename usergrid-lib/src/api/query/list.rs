//! List query and URL generation.

use url::Url;

use super::FieldFilter;
use super::OrderBy;
use crate::error::ApiError;

/// The `limit` value the endpoint reads as "return every record".
pub const FETCH_ALL_LIMIT: usize = 0;

/// Which slice of the collection a query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// `limit` records starting at offset `skip`.
    Page { limit: usize, skip: usize },
    /// The whole collection.
    All,
}

/// One request against the users list endpoint.
///
/// # Example
///
/// ```
/// use url::Url;
/// use usergrid_lib::api::query::{ListQuery, OrderBy};
///
/// let base = Url::parse("https://dummyjson.com").unwrap();
/// let url = ListQuery::page(10, 20)
///     .order_by(OrderBy::desc("age"))
///     .build_url(&base)
///     .unwrap();
///
/// assert_eq!(
///     url.as_str(),
///     "https://dummyjson.com/users?limit=10&skip=20&sortBy=age&order=desc"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    window: Window,
    order_by: Option<OrderBy>,
    filters: Vec<FieldFilter>,
}

impl ListQuery {
    /// Creates a query for one page of `limit` records after `skip`.
    pub fn page(limit: usize, skip: usize) -> Self {
        Self {
            window: Window::Page { limit, skip },
            order_by: None,
            filters: Vec::new(),
        }
    }

    /// Creates a query for the whole collection.
    pub fn all() -> Self {
        Self {
            window: Window::All,
            order_by: None,
            filters: Vec::new(),
        }
    }

    /// Sets the ordering of results.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    /// Adds a field constraint, switching the request to the filter route.
    pub fn filter(mut self, filter: FieldFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Returns the requested window.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Returns the ordering, if set.
    pub fn ordering(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    /// Returns the field constraints.
    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// Builds the request URL against the endpoint's base URL.
    pub fn build_url(&self, base: &Url) -> Result<Url, ApiError> {
        let route = if self.filters.is_empty() {
            "users"
        } else {
            "users/filter"
        };
        let mut url = Url::parse(&format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            route
        ))?;

        {
            let mut params = url.query_pairs_mut();

            match self.window {
                Window::Page { limit, skip } => {
                    params.append_pair("limit", &limit.to_string());
                    params.append_pair("skip", &skip.to_string());
                }
                Window::All => {
                    params.append_pair("limit", &FETCH_ALL_LIMIT.to_string());
                }
            }

            if let Some(ref order) = self.order_by {
                params.append_pair("sortBy", order.field());
                params.append_pair("order", order.direction().as_str());
            }

            for filter in &self.filters {
                params.append_pair("key", filter.key());
                params.append_pair("value", filter.value());
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://dummyjson.com/").unwrap()
    }

    #[test]
    fn test_page_window() {
        let url = ListQuery::page(10, 0).build_url(&base()).unwrap();
        assert_eq!(url.as_str(), "https://dummyjson.com/users?limit=10&skip=0");
    }

    #[test]
    fn test_fetch_all_sentinel() {
        let url = ListQuery::all().build_url(&base()).unwrap();
        assert_eq!(url.as_str(), "https://dummyjson.com/users?limit=0");
    }

    #[test]
    fn test_filter_route_with_repeated_pairs() {
        let url = ListQuery::all()
            .filter(FieldFilter::eq("address.country", "United States"))
            .filter(FieldFilter::eq("gender", "male"))
            .build_url(&base())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://dummyjson.com/users/filter?limit=0&key=address.country&value=United+States&key=gender&value=male"
        );
    }

    #[test]
    fn test_base_with_path_keeps_prefix() {
        let base = Url::parse("http://localhost:8080/api").unwrap();
        let url = ListQuery::page(5, 5)
            .order_by(OrderBy::asc("email"))
            .build_url(&base)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/users?limit=5&skip=5&sortBy=email&order=asc"
        );
    }
}
