use crate::database::{Collection, DocumentStore};
use crate::models::InsertAck;
use crate::utils::AppError;
use mongodb::bson::{doc, Bson, Document};

pub const USER_EXISTS_MESSAGE: &str = "User already exists. Do not need to insert again";

#[derive(Debug)]
pub enum RegisterOutcome {
    Created(InsertAck),
    AlreadyExists,
}

/// POST /user - inserts the user unless one with the same email exists.
/// A falsy email (absent, null, false, empty, zero) is rejected.
/// The lookup is not atomic with the insert; uniqueness is by convention.
pub async fn register_user(
    store: &dyn DocumentStore,
    user: Document,
) -> Result<RegisterOutcome, AppError> {
    let email = match user.get("email") {
        None | Some(Bson::Null) | Some(Bson::Boolean(false)) => return Err(AppError::MissingEmail),
        Some(Bson::String(s)) if s.is_empty() => return Err(AppError::MissingEmail),
        Some(Bson::Int32(0)) | Some(Bson::Int64(0)) => return Err(AppError::MissingEmail),
        Some(Bson::Double(n)) if *n == 0.0 || n.is_nan() => return Err(AppError::MissingEmail),
        Some(value) => value.clone(),
    };

    let existing = store
        .find_one(Collection::Users, doc! { "email": email.clone() })
        .await?;

    if existing.is_some() {
        log::info!("👤 User {} already registered", email);
        return Ok(RegisterOutcome::AlreadyExists);
    }

    let ack = store.insert_one(Collection::Users, user).await?;
    Ok(RegisterOutcome::Created(ack))
}
