//! Single-record detail view

use serde::Serialize;

use super::User;
use super::field::full_name;
use super::field::patronymic;

/// Labelled fields of one record, in display order.
///
/// Built from a loaded [`User`] when the operator inspects a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDetail {
    /// Identifier of the inspected record.
    pub id: u64,
    /// Heading, the record's full name.
    pub title: String,
    /// `(label, value)` pairs.
    pub fields: Vec<(&'static str, String)>,
}

impl RecordDetail {
    /// Looks up a field value by label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

impl From<&User> for RecordDetail {
    fn from(user: &User) -> Self {
        let address = &user.address;
        Self {
            id: user.id,
            title: full_name(user),
            fields: vec![
                ("Username", user.username.clone()),
                ("Last name", user.last_name.clone()),
                ("First name", user.first_name.clone()),
                ("Patronymic", patronymic(user).to_string()),
                ("Age", user.age.to_string()),
                ("Gender", user.gender.clone()),
                ("Phone", user.phone.clone()),
                ("Email", user.email.clone()),
                ("Country", address.country.clone()),
                ("City", address.city.clone()),
                ("Street", address.address.clone()),
                ("State", address.state.clone()),
                ("Postal code", address.postal_code.clone()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_includes_full_address() {
        let mut user = User {
            id: 9,
            first_name: "Oleg".into(),
            last_name: "Sidorov".into(),
            ..User::default()
        };
        user.address.address = "12 Lenina".into();
        user.address.postal_code = "620000".into();

        let detail = RecordDetail::from(&user);

        assert_eq!(detail.id, 9);
        assert_eq!(detail.title, "Sidorov Oleg -");
        assert_eq!(detail.get("Street"), Some("12 Lenina"));
        assert_eq!(detail.get("Postal code"), Some("620000"));
        assert_eq!(detail.get("Patronymic"), Some("-"));
        assert_eq!(detail.get("Salary"), None);
    }
}
