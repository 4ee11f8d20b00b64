use crate::database::{Collection, DocumentStore};
use crate::models::{DeleteAck, InsertAck, UpdateAck};
use crate::services::bill_service::parse_object_id;
use crate::utils::AppError;
use mongodb::bson::{doc, Document};

/// GET /payment - paid entries recorded under the caller's email.
pub async fn list_payments(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Vec<Document>, AppError> {
    store
        .find(Collection::PaidBills, doc! { "email": email }, None)
        .await
}

/// POST /payment - stores the body exactly as received.
pub async fn create_payment(
    store: &dyn DocumentStore,
    payment: Document,
) -> Result<InsertAck, AppError> {
    store.insert_one(Collection::PaidBills, payment).await
}

/// PATCH /payment/{id} - merges the given fields, leaving the rest intact.
pub async fn update_payment(
    store: &dyn DocumentStore,
    id: &str,
    fields: Document,
) -> Result<UpdateAck, AppError> {
    let object_id = parse_object_id(id)?;
    store
        .update_one(Collection::PaidBills, doc! { "_id": object_id }, fields)
        .await
}

/// DELETE /payment/{id}
pub async fn delete_payment(store: &dyn DocumentStore, id: &str) -> Result<DeleteAck, AppError> {
    let object_id = parse_object_id(id)?;
    store
        .delete_one(Collection::PaidBills, doc! { "_id": object_id })
        .await
}
