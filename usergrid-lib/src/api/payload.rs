//! Response normalization

use serde::Deserialize;
use serde_json::Value;

use super::UserPage;
use crate::error::ApiError;
use crate::model::User;

/// The two payload shapes the endpoint may answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListPayload {
    Wrapped {
        users: Vec<Value>,
        #[serde(default)]
        total: Value,
    },
    Bare(Vec<Value>),
}

/// Parses a list response body into a [`UserPage`].
///
/// Accepts `{ "users": [...], "total": n }` or a bare array. Entries that are
/// not objects are skipped; partial records are completed with defaults.
/// A missing or unreadable `total` falls back to the record count.
pub fn parse_list_payload(body: &str) -> Result<UserPage, ApiError> {
    let payload: ListPayload = serde_json::from_str(body)
        .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;

    let (raw, total) = match payload {
        ListPayload::Wrapped { users, total } => (users, total.as_u64()),
        ListPayload::Bare(users) => (users, None),
    };

    let received = raw.len();
    let users: Vec<User> = raw.into_iter().filter_map(User::from_json).collect();
    if users.len() < received {
        log::warn!(
            "skipped {} malformed user entries out of {}",
            received - users.len(),
            received
        );
    }

    let page = UserPage::new(users);
    Ok(match total.and_then(|t| usize::try_from(t).ok()) {
        Some(total) => page.with_total(total),
        None => page,
    })
}
