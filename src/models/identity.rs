use serde::{Deserialize, Serialize};

/// Identity attached to a request once its bearer token has been verified.
/// Handlers read it through `web::ReqData<AuthenticatedUser>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uid: String,
    pub email: String,
}
