//! Declared grid columns

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::GridError;

/// A logical grid column.
///
/// The set is fixed: filter state, column widths and sort keys are all keyed
/// by these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    /// Last name, first name and patronymic.
    FullName,
    Age,
    Gender,
    Phone,
    Email,
    /// `address.country`
    Country,
    /// `address.city`
    City,
}

impl ColumnKey {
    /// All columns in display order.
    pub const ALL: [ColumnKey; 7] = [
        ColumnKey::FullName,
        ColumnKey::Age,
        ColumnKey::Gender,
        ColumnKey::Phone,
        ColumnKey::Email,
        ColumnKey::Country,
        ColumnKey::City,
    ];

    /// Stable identifier, also used as the persisted width key.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKey::FullName => "fullName",
            ColumnKey::Age => "age",
            ColumnKey::Gender => "gender",
            ColumnKey::Phone => "phone",
            ColumnKey::Email => "email",
            ColumnKey::Country => "country",
            ColumnKey::City => "city",
        }
    }

    /// Header text.
    pub fn label(self) -> &'static str {
        match self {
            ColumnKey::FullName => "Full name",
            ColumnKey::Age => "Age",
            ColumnKey::Gender => "Gender",
            ColumnKey::Phone => "Phone",
            ColumnKey::Email => "Email",
            ColumnKey::Country => "Country",
            ColumnKey::City => "City",
        }
    }

    /// Field path the endpoint's filter mode understands, if any.
    ///
    /// Nested address fields use dotted paths. The composite name has no
    /// single field on the endpoint.
    pub fn filter_path(self) -> Option<&'static str> {
        match self {
            ColumnKey::FullName => None,
            ColumnKey::Age => Some("age"),
            ColumnKey::Gender => Some("gender"),
            ColumnKey::Phone => Some("phone"),
            ColumnKey::Email => Some("email"),
            ColumnKey::Country => Some("address.country"),
            ColumnKey::City => Some("address.city"),
        }
    }

    /// Field the endpoint can order by with the same result as local sorting.
    ///
    /// The composite name, the categorical gender order and nested address
    /// fields are sorted locally.
    pub fn sort_field(self) -> Option<&'static str> {
        match self {
            ColumnKey::Age => Some("age"),
            ColumnKey::Phone => Some("phone"),
            ColumnKey::Email => Some("email"),
            ColumnKey::FullName | ColumnKey::Gender | ColumnKey::Country | ColumnKey::City => None,
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnKey {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GridError::UnknownColumn(s.to_string()))
    }
}
