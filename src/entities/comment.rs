//! Staff comments attached to orders

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::field_types;
use crate::query::schema::FieldTypeMap;

/// A comment left on an order in the admin panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,

    /// The order this comment belongs to
    pub order_id: i64,

    /// Display name of the author
    pub author: String,

    pub body: String,

    /// Published comments are visible to the client on the status page
    pub published: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: i64, order_id: i64, author: &str, body: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            order_id,
            author: author.to_string(),
            body: body.to_string(),
            published: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Comment {
    fn resource_name() -> &'static str {
        "comments"
    }

    fn resource_name_singular() -> &'static str {
        "comment"
    }

    fn field_types() -> FieldTypeMap {
        field_types! {
            "id" => Number,
            "order_id" => Number,
            "author" => String,
            "body" => String,
            "published" => Boolean,
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
