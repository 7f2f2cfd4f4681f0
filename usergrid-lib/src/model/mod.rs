//! Typed models

mod column;
mod detail;
mod field;
mod gender;
mod lenient;
mod user;

pub use column::*;
pub use detail::*;
pub use field::*;
pub use gender::*;
pub use user::*;
