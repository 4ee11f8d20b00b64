use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

/// Acknowledgement for a single insert, shaped like the Node driver's result
/// so existing clients keep reading `insertedId`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    /// Hex ObjectId when the database assigned one
    #[schema(value_type = String)]
    pub inserted_id: serde_json::Value,
}

impl InsertAck {
    pub fn new(inserted_id: Bson) -> Self {
        Self {
            acknowledged: true,
            inserted_id: crate::utils::bson_to_json(inserted_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<serde_json::Value>,
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

impl From<mongodb::results::InsertOneResult> for InsertAck {
    fn from(result: mongodb::results::InsertOneResult) -> Self {
        InsertAck::new(result.inserted_id)
    }
}

impl From<mongodb::results::UpdateResult> for UpdateAck {
    fn from(result: mongodb::results::UpdateResult) -> Self {
        UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id.map(crate::utils::bson_to_json),
        }
    }
}

impl From<mongodb::results::DeleteResult> for DeleteAck {
    fn from(result: mongodb::results::DeleteResult) -> Self {
        DeleteAck::new(result.deleted_count)
    }
}
