//! Query builder for the users list endpoint.
//!
//! # Shared Types
//!
//! - [`FieldFilter`] - One `key`/`value` constraint for the endpoint's filter mode
//! - [`OrderBy`] - Ordering specification for query results
//! - [`ListQuery`] - Window, ordering and filters of one list request

mod filter;
mod list;
mod order;

pub use filter::FieldFilter;
pub use list::ListQuery;
pub use list::Window;
pub use order::Direction;
pub use order::OrderBy;
