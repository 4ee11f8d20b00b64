use crate::api::log_failure;
use crate::database::DocumentStore;
use crate::models::{AuthenticatedUser, DeleteAck, InsertAck, UpdateAck};
use crate::services::payment_service;
use crate::utils::{document_from_json, documents_to_json, AppError};
use actix_web::{web, HttpResponse};

#[utoipa::path(
    get,
    path = "/payment",
    tag = "Payments",
    responses(
        (status = 200, description = "Paid bills recorded under the caller's email"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_payments(
    user: web::ReqData<AuthenticatedUser>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, AppError> {
    log::info!("💳 GET /payment - user: {}", user.email);

    let payments = payment_service::list_payments(store.get_ref(), &user.email)
        .await
        .inspect_err(log_failure("fetching payments"))?;

    Ok(HttpResponse::Ok().json(documents_to_json(payments)))
}

/// The body is stored exactly as received.
#[utoipa::path(
    post,
    path = "/payment",
    tag = "Payments",
    responses(
        (status = 201, description = "Paid bill recorded", body = InsertAck),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_payment(
    user: web::ReqData<AuthenticatedUser>,
    store: web::Data<dyn DocumentStore>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("💳 POST /payment - user: {}", user.email);

    let payment =
        document_from_json(body.into_inner()).inspect_err(log_failure("creating payment"))?;
    let ack = payment_service::create_payment(store.get_ref(), payment)
        .await
        .inspect_err(log_failure("creating payment"))?;

    Ok(HttpResponse::Created().json(ack))
}

/// `$set`-merges the body into the stored document.
#[utoipa::path(
    patch,
    path = "/payment/{id}",
    tag = "Payments",
    params(("id" = String, Path, description = "Paid bill ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateAck),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_payment(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PATCH /payment/{}", id);

    let fields =
        document_from_json(body.into_inner()).inspect_err(log_failure("updating payment"))?;
    let ack = payment_service::update_payment(store.get_ref(), &id, fields)
        .await
        .inspect_err(log_failure("updating payment"))?;

    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    delete,
    path = "/payment/{id}",
    tag = "Payments",
    params(("id" = String, Path, description = "Paid bill ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Delete acknowledgement", body = DeleteAck),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_payment(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /payment/{}", id);

    let ack = payment_service::delete_payment(store.get_ref(), &id)
        .await
        .inspect_err(log_failure("deleting payment"))?;

    Ok(HttpResponse::Ok().json(ack))
}
