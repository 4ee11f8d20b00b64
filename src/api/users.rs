use crate::api::log_failure;
use crate::database::DocumentStore;
use crate::models::{InsertAck, MessageResponse};
use crate::services::user_service::{self, RegisterOutcome, USER_EXISTS_MESSAGE};
use crate::utils::{document_from_json, AppError};
use actix_web::{web, HttpResponse};

/// Inserts the body as a user unless one with the same `email` exists.
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    responses(
        (status = 201, description = "User created", body = InsertAck),
        (status = 200, description = "A user with this email already exists", body = MessageResponse),
        (status = 400, description = "Email is required", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register_user(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 POST /user");

    let user = document_from_json(body.into_inner()).inspect_err(log_failure("creating user"))?;
    let outcome = user_service::register_user(store.get_ref(), user)
        .await
        .inspect_err(log_failure("creating user"))?;

    Ok(match outcome {
        RegisterOutcome::Created(ack) => HttpResponse::Created().json(ack),
        RegisterOutcome::AlreadyExists => {
            HttpResponse::Ok().json(MessageResponse::new(USER_EXISTS_MESSAGE))
        }
    })
}
