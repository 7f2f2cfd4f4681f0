//! Client-side grid state engine.
//!
//! [`GridController`] composes the pieces in this module: filter text goes
//! through a [`Debouncer`], the [`plan`] decides whether the endpoint or the
//! local [`FilterMatcher`] and [`compare`] do the work, the
//! [`RequestCoordinator`] keeps a single request alive, and [`PageState`]
//! keeps the page inside the result.

mod collate;
mod config;
mod controller;
mod coordinator;
mod debounce;
mod filter;
mod pagination;
mod sort;
mod widths;

pub use collate::*;
pub use config::*;
pub use controller::*;
pub use coordinator::*;
pub use debounce::*;
pub use filter::*;
pub use pagination::*;
pub use sort::*;
pub use widths::*;
