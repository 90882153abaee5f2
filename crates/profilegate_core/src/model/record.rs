//! Remote list record model.

use serde::{Deserialize, Serialize};

/// One row of the remotely fetched collection.
///
/// The owner id arrives on the wire as `userId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub owner_id: i64,
}

impl ListRecord {
    pub fn new(id: i64, owner_id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            owner_id,
        }
    }
}
