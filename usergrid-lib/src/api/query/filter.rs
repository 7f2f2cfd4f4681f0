//! Field constraints for the endpoint's filter mode.

/// A single `key`/`value` constraint.
///
/// Nested fields are addressed with dotted paths such as `address.country`.
/// Constraints are combined with logical AND by the endpoint.
///
/// # Example
///
/// ```
/// use usergrid_lib::api::query::FieldFilter;
///
/// let filter = FieldFilter::eq("address.city", "Phoenix");
/// assert_eq!(filter.key(), "address.city");
/// assert_eq!(filter.value(), "Phoenix");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    key: String,
    value: String,
}

impl FieldFilter {
    /// Creates an equality constraint: `key == value`.
    pub fn eq(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the field path.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the expected value.
    pub fn value(&self) -> &str {
        &self.value
    }
}
