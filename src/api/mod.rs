pub mod bills;
pub mod health;
pub mod index;
pub mod payments;
pub mod routes;
pub mod swagger;
pub mod users;

use crate::utils::AppError;
use actix_web::ResponseError;

/// Logs a handler failure: server-side faults as errors, client faults as warnings.
pub(crate) fn log_failure(context: &'static str) -> impl Fn(&AppError) {
    move |e: &AppError| {
        if e.status_code().is_server_error() {
            log::error!("❌ Error {}: {}", context, e);
        } else {
            log::warn!("⚠️ {} rejected: {}", context, e);
        }
    }
}
