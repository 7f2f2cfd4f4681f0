//! Per-column filter state and matching.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::api::query::FieldFilter;
use crate::model::ColumnKey;
use crate::model::Gender;
use crate::model::User;
use crate::model::field_value;
use crate::model::sort_name;

/// Free-text query per declared column.
///
/// Every column always has an entry; an empty (or whitespace-only) entry
/// imposes no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    values: BTreeMap<ColumnKey, String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            values: ColumnKey::ALL
                .into_iter()
                .map(|key| (key, String::new()))
                .collect(),
        }
    }
}

impl FilterState {
    /// Returns the query text for a column.
    pub fn get(&self, key: ColumnKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or_default()
    }

    /// Replaces the query text for a column.
    pub fn set(&mut self, key: ColumnKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Empties every query.
    pub fn clear(&mut self) {
        self.values.values_mut().for_each(String::clear);
    }

    /// Returns `true` if at least one query constrains the result.
    pub fn is_active(&self) -> bool {
        self.values.values().any(|v| !v.trim().is_empty())
    }

    /// Iterates the constraining queries, trimmed.
    pub fn active(&self) -> impl Iterator<Item = (ColumnKey, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (*key, value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }

    /// Iterates all entries in column order.
    pub fn iter(&self) -> impl Iterator<Item = (ColumnKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Translates the active queries into endpoint constraints.
    ///
    /// Returns `None` if any active query targets a column the endpoint cannot
    /// filter on, or names no known gender. Gender queries are sent in
    /// canonical form.
    pub fn to_field_filters(&self) -> Option<Vec<FieldFilter>> {
        self.active()
            .map(|(key, query)| {
                let path = key.filter_path()?;
                let value = match key {
                    ColumnKey::Gender => Gender::canonicalize(query)?.as_str(),
                    _ => query,
                };
                Some(FieldFilter::eq(path, value))
            })
            .collect()
    }
}

/// A [`FilterState`] prepared for repeated matching.
///
/// Queries are trimmed and lowercased once; gender queries are
/// canonicalized once.
#[derive(Debug, Clone)]
pub struct FilterMatcher {
    needles: Vec<(ColumnKey, Needle)>,
}

#[derive(Debug, Clone)]
enum Needle {
    /// Case-insensitive substring.
    Text(String),
    /// Exact category; `None` if the query named no known category.
    Category(Option<Gender>),
}

impl FilterMatcher {
    /// Compiles the active queries of `filters`.
    pub fn new(filters: &FilterState) -> Self {
        let needles = filters
            .active()
            .map(|(key, query)| {
                let needle = match key {
                    ColumnKey::Gender => Needle::Category(Gender::canonicalize(query)),
                    _ => Needle::Text(query.to_lowercase()),
                };
                (key, needle)
            })
            .collect();
        Self { needles }
    }

    /// Returns `true` if no query is active.
    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    /// Returns `true` if `user` satisfies every active query.
    pub fn matches(&self, user: &User) -> bool {
        self.needles.iter().all(|(key, needle)| match needle {
            Needle::Category(wanted) => {
                wanted.is_some() && Gender::canonicalize(&user.gender) == *wanted
            }
            Needle::Text(text) => haystack(user, *key).to_lowercase().contains(text.as_str()),
        })
    }
}

/// Text a query is matched against. Names are matched without the
/// missing-patronymic placeholder.
fn haystack(user: &User, key: ColumnKey) -> Cow<'_, str> {
    match key {
        ColumnKey::FullName => Cow::Owned(sort_name(user)),
        _ => field_value(user, key),
    }
}

/// Returns `true` if `user` satisfies every active query of `filters`.
pub fn matches(user: &User, filters: &FilterState) -> bool {
    FilterMatcher::new(filters).matches(user)
}

/// Keeps the users that satisfy `filters`, preserving order.
///
/// With no active query the input is returned untouched, without a scan.
pub fn apply_filters(mut users: Vec<User>, filters: &FilterState) -> Vec<User> {
    let matcher = FilterMatcher::new(filters);
    if matcher.is_empty() {
        return users;
    }
    users.retain(|user| matcher.matches(user));
    users
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, last: &str, gender: &str, city: &str) -> User {
        let mut user = User {
            id,
            last_name: last.into(),
            first_name: "X".into(),
            gender: gender.into(),
            ..User::default()
        };
        user.address.city = city.into();
        user
    }

    fn sample() -> Vec<User> {
        vec![
            user(1, "Smith", "male", "Phoenix"),
            user(2, "Johnson", "female", "Houston"),
            user(3, "Brown", "male", "Houston"),
            user(4, "Ivanova", "", "Kazan"),
        ]
    }

    fn ids(users: &[User]) -> Vec<u64> {
        users.iter().map(|u| u.id).collect()
    }

    #[test]
    fn test_default_has_every_column() {
        let filters = FilterState::default();
        assert_eq!(filters.iter().count(), ColumnKey::ALL.len());
        assert!(!filters.is_active());
    }

    #[test]
    fn test_empty_filters_accept_everything() {
        let filters = FilterState::default();
        for u in sample() {
            assert!(matches(&u, &filters));
        }
        assert_eq!(ids(&apply_filters(sample(), &filters)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_whitespace_only_is_inactive() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::City, "   ");
        assert!(!filters.is_active());
    }

    #[test]
    fn test_russian_gender_letter_selects_males() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::Gender, "м");
        assert_eq!(ids(&apply_filters(sample(), &filters)), vec![1, 3]);
    }

    #[test]
    fn test_gender_is_exact_not_substring() {
        // "male" is a substring of "female" but must not match it
        let mut filters = FilterState::default();
        filters.set(ColumnKey::Gender, "male");
        assert_eq!(ids(&apply_filters(sample(), &filters)), vec![1, 3]);
    }

    #[test]
    fn test_unknown_gender_query_matches_nothing() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::Gender, "q");
        assert!(apply_filters(sample(), &filters).is_empty());
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::FullName, "SON");
        assert_eq!(ids(&apply_filters(sample(), &filters)), vec![2]);

        filters.set(ColumnKey::FullName, "иван");
        let mut users = sample();
        users[3].last_name = "Иванова".into();
        assert_eq!(ids(&apply_filters(users, &filters)), vec![4]);
    }

    #[test]
    fn test_name_placeholder_is_not_matched() {
        let mut users = sample();
        users[0].middle_name = "Lee-Ann".into();

        let mut filters = FilterState::default();
        filters.set(ColumnKey::FullName, "-");
        assert_eq!(ids(&apply_filters(users.clone(), &filters)), vec![1]);

        filters.set(ColumnKey::FullName, "smith x lee");
        assert_eq!(ids(&apply_filters(users, &filters)), vec![1]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::City, "hou");
        filters.set(ColumnKey::Gender, "M");
        assert_eq!(ids(&apply_filters(sample(), &filters)), vec![3]);
    }

    #[test]
    fn test_clear() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::Email, "gmail");
        filters.clear();
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn test_field_filters_translate_paths_and_gender() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::City, " Houston ");
        filters.set(ColumnKey::Gender, "ж");

        let translated = filters.to_field_filters().unwrap();
        assert_eq!(
            translated,
            vec![
                FieldFilter::eq("gender", "female"),
                FieldFilter::eq("address.city", "Houston"),
            ]
        );
    }

    #[test]
    fn test_field_filters_refuse_unknown_gender() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::City, "Houston");
        filters.set(ColumnKey::Gender, "q");
        assert_eq!(filters.to_field_filters(), None);
    }

    #[test]
    fn test_field_filters_refuse_composite_name() {
        let mut filters = FilterState::default();
        filters.set(ColumnKey::FullName, "Smith");
        assert_eq!(filters.to_field_filters(), None);
    }
}
