//! Admin panel users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::field_types;
use crate::query::schema::FieldTypeMap;

/// A staff member with access to the admin panel
///
/// Credential material lives with the auth provider, not here; the
/// repository only manages the profile the admin grid works with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,

    /// Coarse role: "admin" or "clerk"
    pub role: String,

    /// Inactive users keep their history but cannot sign in
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, email: &str, first_name: &str, last_name: &str, role: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: role.to_string(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for User {
    fn resource_name() -> &'static str {
        "users"
    }

    fn resource_name_singular() -> &'static str {
        "user"
    }

    fn field_types() -> FieldTypeMap {
        field_types! {
            "id" => Number,
            "email" => String,
            "first_name" => String,
            "last_name" => String,
            "role" => String,
            "active" => Boolean,
            "created_at" => Date,
            "updated_at" => Date,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::schema::FieldKind;

    #[test]
    fn test_new_user_is_active() {
        let user = User::new(1, "a@chancery.example", "Anna", "Albrecht", "admin");
        assert!(user.active);
        assert_eq!(user.role, "admin");
    }

    #[test]
    fn test_active_is_boolean_typed() {
        assert_eq!(User::field_types().kind_of("active"), FieldKind::Boolean);
    }
}
