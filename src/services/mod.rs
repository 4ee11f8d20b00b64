pub mod bill_service;
pub mod firebase_auth;
pub mod payment_service;
pub mod user_service;

pub use firebase_auth::{FirebaseVerifier, ServiceAccount, TokenVerifier};
