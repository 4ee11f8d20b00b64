use crate::api::log_failure;
use crate::database::DocumentStore;
use crate::models::BillQuery;
use crate::services::bill_service;
use crate::utils::{document_to_json, documents_to_json, AppError};
use actix_web::{web, HttpResponse};

#[utoipa::path(
    get,
    path = "/bills",
    tag = "Bills",
    params(BillQuery),
    responses(
        (status = 200, description = "Matching bills, as stored"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_bills(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<BillQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "📋 GET /bills - category: {:?}, limit: {:?}",
        query.category,
        query.limit
    );

    let bills = bill_service::list_bills(store.get_ref(), &query)
        .await
        .inspect_err(log_failure("fetching bills"))?;

    log::debug!("✅ Returning {} bills", bills.len());
    Ok(HttpResponse::Ok().json(documents_to_json(bills)))
}

#[utoipa::path(
    get,
    path = "/bills/{id}",
    tag = "Bills",
    params(("id" = String, Path, description = "Bill ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "The bill"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Bill not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_bill(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🧾 GET /bills/{}", id);

    let bill = bill_service::get_bill(store.get_ref(), &id)
        .await
        .inspect_err(log_failure("fetching bill"))?;

    Ok(HttpResponse::Ok().json(document_to_json(bill)))
}
