use serde::{Deserialize, Deserializer, Serialize};

/// One account as stored in the backing file and returned on the wire.
///
/// `email` is the lookup key and is compared byte-for-byte. Every other field is
/// opaque text; `created_at` is never parsed. A missing or `null` email decodes as `""`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// Fields of this record that an update request may change.
    pub fn patch(&self) -> UserPatch {
        UserPatch {
            name: self.name.clone(),
            surname: self.surname.clone(),
            role: self.role.clone(),
        }
    }
}

/// The persisted document: `{ "users": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCollection {
    #[serde(default)]
    pub users: Vec<User>,
}

impl UserCollection {
    pub fn find(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn find_mut(&mut self, email: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.email == email)
    }
}

/// Partial update for an existing user.
///
/// A field is applied only when it is present and non-empty, so an update can never
/// clear a stored value back to empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub role: Option<String>,
}

impl UserPatch {
    pub fn apply_to(&self, user: &mut User) {
        if let Some(role) = non_empty(&self.role) {
            user.role = Some(role.to_owned());
        }
        if let Some(name) = non_empty(&self.name) {
            user.name = Some(name.to_owned());
        }
        if let Some(surname) = non_empty(&self.surname) {
            user.surname = Some(surname.to_owned());
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}
