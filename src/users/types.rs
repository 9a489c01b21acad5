//! User record types.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A user as exchanged with the upstream API.
///
/// Decoding is lenient in the same places on both sides of the proxy:
/// keys match case-insensitively, `null` leaves a field at its zero value,
/// missing fields default and unknown fields are dropped. Re-encoding a
/// decoded payload therefore projects it onto exactly these four keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
}

impl User {
    /// Decode the first JSON value of a request body. Anything after it is
    /// not read.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let mut de = serde_json::Deserializer::from_slice(bytes);
        User::deserialize(&mut de)
    }

    /// Decode an upstream users list. A `null` body decodes to `None`.
    pub fn list_from_json(bytes: &[u8]) -> Result<Option<Vec<Self>>, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UserVisitor)
    }
}

struct UserVisitor;

impl<'de> Visitor<'de> for UserVisitor {
    type Value = User;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a user object")
    }

    fn visit_unit<E: de::Error>(self) -> Result<User, E> {
        Ok(User::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<User, A::Error> {
        let mut user = User::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.to_lowercase().as_str() {
                "id" => assign(&mut user.id, map.next_value()?),
                "name" => assign(&mut user.name, map.next_value()?),
                "username" => assign(&mut user.username, map.next_value()?),
                "email" => assign(&mut user.email, map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(user)
    }
}

// null keeps whatever the field already holds
fn assign<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}
