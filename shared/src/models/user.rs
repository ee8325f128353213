//! User account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A farmer account, identified by phone number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(phone_number: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number,
            created_at: Utc::now(),
        }
    }
}
