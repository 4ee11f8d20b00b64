use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bill Tracker API",
        version = "1.0.0",
        description = "Household bill tracking: list bills, record paid bills and register users.\n\n**Authentication:** `GET /bills/{id}`, `GET /payment` and `POST /payment` require a Firebase ID token as a Bearer token."
    ),
    paths(
        crate::api::index::index,
        crate::api::health::health_check,
        crate::api::bills::list_bills,
        crate::api::bills::get_bill,
        crate::api::payments::list_payments,
        crate::api::payments::create_payment,
        crate::api::payments::update_payment,
        crate::api::payments::delete_payment,
        crate::api::users::register_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::InsertAck,
            crate::models::UpdateAck,
            crate::models::DeleteAck,
            crate::models::MessageResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database connectivity."),
        (name = "Bills", description = "Bills catalog, read only."),
        (name = "Payments", description = "Paid bill records of the authenticated user."),
        (name = "Users", description = "User registration, idempotent by email."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Firebase ID token"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in ["/", "/health", "/bills", "/bills/{id}", "/payment", "/payment/{id}", "/user"] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {} in {:?}",
                expected,
                paths
            );
        }
        assert!(doc
            .components
            .as_ref()
            .unwrap()
            .security_schemes
            .contains_key("bearer_auth"));
    }
}
