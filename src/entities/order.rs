//! Service orders placed through the public site

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::entity::Entity;
use crate::field_types;
use crate::query::schema::FieldTypeMap;

/// Order status lifecycle: 0 = received, 1 = confirmed, 2 = closed
pub mod status {
    pub const RECEIVED: i64 = 0;
    pub const CONFIRMED: i64 = 1;
    pub const CLOSED: i64 = 2;
}

/// A client's request for a legal service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique identifier
    pub id: i64,

    /// Opaque reference quoted in client correspondence
    pub reference: Uuid,

    /// Requested service slug (e.g. "contract-review", "inheritance")
    pub service: String,

    /// Client contact details
    pub client_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Lifecycle status (see [`status`])
    pub status: i64,

    /// Quoted fee in the office's billing currency
    pub amount: f64,

    /// Free-form note left by the client with the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a freshly received order
    pub fn new(id: i64, service: &str, client_name: &str, email: &str, amount: f64) -> Self {
        let now = Utc::now();
        Self {
            id,
            reference: Uuid::new_v4(),
            service: service.to_string(),
            client_name: client_name.to_string(),
            email: email.to_string(),
            phone: None,
            status: status::RECEIVED,
            amount,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Order {
    fn resource_name() -> &'static str {
        "orders"
    }

    fn resource_name_singular() -> &'static str {
        "order"
    }

    fn field_types() -> FieldTypeMap {
        field_types! {
            "id" => Number,
            "reference" => String,
            "service" => String,
            "client_name" => String,
            "email" => String,
            "phone" => String,
            "status" => Number,
            "amount" => Number,
            "note" => String,
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
