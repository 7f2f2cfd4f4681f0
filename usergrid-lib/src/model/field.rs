//! Column value resolution

use std::borrow::Cow;

use super::ColumnKey;
use super::User;

/// Placeholder shown when a record has no patronymic.
pub const MISSING_PATRONYMIC: &str = "-";

/// Resolves the display value of `key` on `user`.
///
/// Nested address fields come back empty when absent. Never fails.
///
/// # Example
///
/// ```
/// use usergrid_lib::model::{field_value, ColumnKey, User};
///
/// let mut user = User::default();
/// user.last_name = "Ivanova".into();
/// user.first_name = "Maria".into();
///
/// assert_eq!(field_value(&user, ColumnKey::FullName), "Ivanova Maria -");
/// assert_eq!(field_value(&user, ColumnKey::City), "");
/// ```
pub fn field_value(user: &User, key: ColumnKey) -> Cow<'_, str> {
    match key {
        ColumnKey::FullName => Cow::Owned(full_name(user)),
        ColumnKey::Age => Cow::Owned(user.age.to_string()),
        ColumnKey::Gender => Cow::Borrowed(&user.gender),
        ColumnKey::Phone => Cow::Borrowed(&user.phone),
        ColumnKey::Email => Cow::Borrowed(&user.email),
        ColumnKey::Country => Cow::Borrowed(&user.address.country),
        ColumnKey::City => Cow::Borrowed(&user.address.city),
    }
}

/// The patronymic-equivalent name, falling back from middle to maiden name.
///
/// Returns [`MISSING_PATRONYMIC`] when neither is set.
pub fn patronymic(user: &User) -> &str {
    patronymic_source(user).unwrap_or(MISSING_PATRONYMIC)
}

/// Display form of the full name: `last first patronymic`.
pub fn full_name(user: &User) -> String {
    join_names([
        user.last_name.as_str(),
        user.first_name.as_str(),
        patronymic(user),
    ])
}

/// Composite name used for ordering, without the placeholder.
pub fn sort_name(user: &User) -> String {
    join_names([
        user.last_name.as_str(),
        user.first_name.as_str(),
        patronymic_source(user).unwrap_or_default(),
    ])
}

fn patronymic_source(user: &User) -> Option<&str> {
    [user.middle_name.trim(), user.maiden_name.trim()]
        .into_iter()
        .find(|name| !name.is_empty())
}

fn join_names<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
