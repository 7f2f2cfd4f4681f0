//! Users endpoint access

mod payload;
pub mod query;
mod source;

pub use payload::parse_list_payload;
pub use source::*;
