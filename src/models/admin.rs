use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An administrator as exchanged between the auth service and its callers.
///
/// The record is a passive container: nothing here validates the email,
/// checks that `id` is unique, or requires any field to be set. `id` is
/// `None` until a store assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct AdministratorRecord {
    id: Option<i64>,
    email: String,
    name: String,
}

impl AdministratorRecord {
    pub fn new(id: Option<i64>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Consumes the record, returning `(id, email, name)`.
    pub fn into_parts(self) -> (Option<i64>, String, String) {
        (self.id, self.email, self.name)
    }
}

impl From<(Option<i64>, String, String)> for AdministratorRecord {
    fn from((id, email, name): (Option<i64>, String, String)) -> Self {
        Self { id, email, name }
    }
}

impl fmt::Display for AdministratorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdministratorRecord(id=")?;
        match self.id {
            Some(id) => write!(f, "{}", id)?,
            None => write!(f, "null")?,
        }
        write!(f, ", email={}, name={})", self.email, self.name)
    }
}
