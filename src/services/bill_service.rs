use crate::database::{Collection, DocumentStore};
use crate::models::BillQuery;
use crate::utils::AppError;
use mongodb::bson::{doc, oid::ObjectId, Document};

/// Parses a path id into an ObjectId. Malformed ids never reach the store.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

/// GET /bills - every bill, optionally narrowed to one category and capped.
pub async fn list_bills(
    store: &dyn DocumentStore,
    query: &BillQuery,
) -> Result<Vec<Document>, AppError> {
    let mut filter = Document::new();
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        filter.insert("category", category);
    }

    store
        .find(Collection::Bills, filter, query.parsed_limit())
        .await
}

/// GET /bills/{id}
pub async fn get_bill(store: &dyn DocumentStore, id: &str) -> Result<Document, AppError> {
    let object_id = parse_object_id(id)?;

    store
        .find_one(Collection::Bills, doc! { "_id": object_id })
        .await?
        .ok_or(AppError::BillNotFound)
}
