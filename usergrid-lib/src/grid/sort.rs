//! Sort state and record ordering.

use std::cmp::Ordering;
use std::cmp::Reverse;

use serde::Deserialize;
use serde::Serialize;

use super::collate::CollationKey;
use crate::api::query::Direction;
use crate::api::query::OrderBy;
use crate::model::ColumnKey;
use crate::model::Gender;
use crate::model::User;
use crate::model::field_value;
use crate::model::sort_name;

/// The active sort column and direction, if any.
///
/// A column and a direction are always set together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    active: Option<(ColumnKey, Direction)>,
}

impl SortState {
    /// No ordering; rows keep the endpoint's order.
    pub fn none() -> Self {
        Self { active: None }
    }

    /// Ascending on `key`.
    pub fn asc(key: ColumnKey) -> Self {
        Self {
            active: Some((key, Direction::Asc)),
        }
    }

    /// Descending on `key`.
    pub fn desc(key: ColumnKey) -> Self {
        Self {
            active: Some((key, Direction::Desc)),
        }
    }

    /// Returns the sorted column.
    pub fn key(&self) -> Option<ColumnKey> {
        self.active.map(|(key, _)| key)
    }

    /// Returns the direction.
    pub fn order(&self) -> Option<Direction> {
        self.active.map(|(_, direction)| direction)
    }

    /// Returns `true` if no column is sorted.
    pub fn is_none(&self) -> bool {
        self.active.is_none()
    }

    /// The state after clicking the header of `key`.
    ///
    /// The clicked column cycles none → asc → desc → none; clicking a
    /// different column starts it at asc.
    pub fn toggled(self, key: ColumnKey) -> Self {
        match self.active {
            Some((current, Direction::Asc)) if current == key => Self::desc(key),
            Some((current, Direction::Desc)) if current == key => Self::none(),
            _ => Self::asc(key),
        }
    }

    /// The equivalent endpoint ordering, if the endpoint can express it.
    ///
    /// `Ok(None)` means no ordering is requested; `Err(())` means the sort
    /// has to happen locally.
    pub(crate) fn to_order_by(self) -> Result<Option<OrderBy>, ()> {
        match self.active {
            None => Ok(None),
            Some((key, direction)) => key
                .sort_field()
                .map(|field| Some(OrderBy::new(field, direction)))
                .ok_or(()),
        }
    }
}

/// Comparable projection of one record for one column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Number(u32),
    Rank(u8),
    Text(CollationKey),
}

impl SortKey {
    fn of(user: &User, key: ColumnKey) -> Self {
        match key {
            ColumnKey::Age => SortKey::Number(user.age),
            ColumnKey::Gender => SortKey::Rank(Gender::rank(&user.gender)),
            ColumnKey::FullName => SortKey::Text(CollationKey::new(&sort_name(user))),
            _ => SortKey::Text(CollationKey::new(&field_value(user, key))),
        }
    }
}

/// Orders two records by `key` in `direction`.
///
/// Ages compare numerically, gender by category (unknown values first), the
/// full name by its `last first patronymic` composite and everything else
/// by collated text. `Desc` is exactly the reverse of `Asc`.
pub fn compare(a: &User, b: &User, key: ColumnKey, direction: Direction) -> Ordering {
    let ordering = SortKey::of(a, key).cmp(&SortKey::of(b, key));
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

/// Sorts `users` in place by `sort`. Stable; a `none` sort leaves the order as is.
pub fn sort_users(users: &mut [User], sort: SortState) {
    let Some((key, direction)) = sort.active else {
        return;
    };
    match direction {
        Direction::Asc => users.sort_by_cached_key(|user| SortKey::of(user, key)),
        Direction::Desc => users.sort_by_cached_key(|user| Reverse(SortKey::of(user, key))),
    }
}
