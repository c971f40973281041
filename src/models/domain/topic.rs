use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Read-only view of a topic owned by the course catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Topic {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<ObjectId>,
}
