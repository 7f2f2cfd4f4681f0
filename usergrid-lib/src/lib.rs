//! User grid engine
//!
//! A Rust async state engine for browsing a remote, paginated list of user
//! records: sorting, filtering, paging, column resizing and record inspection.

pub mod api;
pub mod error;
pub mod grid;
pub mod model;
pub mod settings;

mod client;

pub use client::*;
