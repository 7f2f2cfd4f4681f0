//! User record returned by the list endpoint

use serde::Deserialize;
use serde::Serialize;

use super::lenient;

/// A user record as served by the remote endpoint.
///
/// Every field is optional on the wire. Missing or `null` scalars become
/// zero or the empty string, so downstream code never has to deal with
/// absent values.
///
/// # Example
///
/// ```
/// use usergrid_lib::model::User;
///
/// let user: User = serde_json::from_value(serde_json::json!({
///     "id": 7,
///     "firstName": "Anna",
///     "age": null,
///     "address": { "city": "Kazan" }
/// }))
/// .unwrap();
///
/// assert_eq!(user.first_name, "Anna");
/// assert_eq!(user.age, 0);
/// assert_eq!(user.address.city, "Kazan");
/// assert_eq!(user.address.country, "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(deserialize_with = "lenient::number")]
    pub id: u64,
    #[serde(deserialize_with = "lenient::string")]
    pub username: String,
    #[serde(deserialize_with = "lenient::string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub last_name: String,
    /// Alternate source for the patronymic column.
    #[serde(deserialize_with = "lenient::string")]
    pub maiden_name: String,
    /// Preferred source for the patronymic column.
    #[serde(deserialize_with = "lenient::string")]
    pub middle_name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub age: u32,
    /// Raw gender token, usually `male` or `female`.
    #[serde(deserialize_with = "lenient::string")]
    pub gender: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::object")]
    pub address: Address,
}

/// Postal address nested inside a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Street line.
    #[serde(deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(deserialize_with = "lenient::string")]
    pub state: String,
    #[serde(deserialize_with = "lenient::string")]
    pub postal_code: String,
    #[serde(deserialize_with = "lenient::string")]
    pub country: String,
}

impl User {
    /// Converts one raw payload entry into a record.
    ///
    /// Returns `None` only when the entry is not a JSON object at all.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_record() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "emilys",
            "firstName": "Emily",
            "lastName": "Johnson",
            "maidenName": "Smith",
            "age": 28,
            "gender": "female",
            "phone": "+81 965-431-3024",
            "email": "emily.johnson@x.dummyjson.com",
            "address": {
                "address": "626 Main Street",
                "city": "Phoenix",
                "state": "Mississippi",
                "postalCode": "29112",
                "country": "United States"
            }
        }))
        .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.last_name, "Johnson");
        assert_eq!(user.maiden_name, "Smith");
        assert_eq!(user.middle_name, "");
        assert_eq!(user.age, 28);
        assert_eq!(user.address.postal_code, "29112");
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let user: User = serde_json::from_value(json!({
            "firstName": null,
            "age": null,
            "address": null
        }))
        .unwrap();

        assert_eq!(user, User::default());
    }

    #[test]
    fn test_numeric_strings_and_numbers_coerced() {
        let user: User = serde_json::from_value(json!({
            "id": "42",
            "age": "31",
            "phone": 5551234
        }))
        .unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.age, 31);
        assert_eq!(user.phone, "5551234");
    }

    #[test]
    fn test_negative_or_garbage_age_is_zero() {
        let user: User = serde_json::from_value(json!({ "age": -4 })).unwrap();
        assert_eq!(user.age, 0);

        let user: User = serde_json::from_value(json!({ "age": "old" })).unwrap();
        assert_eq!(user.age, 0);
    }

    #[test]
    fn test_wrongly_shaped_address_is_default() {
        let user: User = serde_json::from_value(json!({ "address": "somewhere" })).unwrap();
        assert_eq!(user.address, Address::default());
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(User::from_json(json!(null)).is_none());
        assert!(User::from_json(json!([1, 2])).is_none());
        assert!(User::from_json(json!({})).is_some());
    }
}
