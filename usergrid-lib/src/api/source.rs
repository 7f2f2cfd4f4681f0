//! Source of user pages

use std::sync::Arc;

use async_trait::async_trait;

use super::query::ListQuery;
use crate::error::ApiError;
use crate::model::User;

/// One response of the list endpoint.
///
/// `total` is the number of records matching the query before the window was
/// applied, as reported by the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPage {
    users: Vec<User>,
    total: Option<usize>,
}

impl UserPage {
    /// Creates a page from records, with the total defaulting to their count.
    pub fn new(users: Vec<User>) -> Self {
        Self { users, total: None }
    }

    /// Sets the reported total.
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    /// Returns the records of this page.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Consumes the page and returns the records.
    pub fn into_users(self) -> Vec<User> {
        self.users
    }

    /// Returns the reported total, or the record count when none was reported.
    pub fn total(&self) -> usize {
        self.total.unwrap_or(self.users.len())
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.users.len()
    }
}

/// Anything that can answer a [`ListQuery`].
///
/// [`UsersClient`](crate::UsersClient) is the HTTP implementation; tests and
/// embedders can supply their own.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Executes one list query.
    async fn list_users(&self, query: &ListQuery) -> Result<UserPage, ApiError>;
}

#[async_trait]
impl<T: UserSource + ?Sized> UserSource for Arc<T> {
    async fn list_users(&self, query: &ListQuery) -> Result<UserPage, ApiError> {
        (**self).list_users(query).await
    }
}
