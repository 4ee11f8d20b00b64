use crate::services::TokenVerifier;
use crate::utils::AppError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

/// Requires a verified bearer token. On success the `AuthenticatedUser` is
/// placed in the request extensions; on failure the wrapped handler never runs.
pub struct AuthMiddleware {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthMiddleware {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    verifier: Arc<dyn TokenVerifier>,
}

/// Extracts the token from `Authorization: Bearer <token>`.
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let header_str = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header_str.trim().split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn reject<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    req.into_response(AppError::Unauthorized.error_response())
        .map_into_right_body()
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let verifier = self.verifier.clone();

        Box::pin(async move {
            let Some(token) = bearer_token(&req) else {
                log::warn!("🔒 {} {} - missing bearer token", req.method(), req.path());
                return Ok(reject(req));
            };

            match verifier.verify(&token).await {
                Ok(user) => {
                    log::debug!("🔓 {} {} - authenticated {}", req.method(), req.path(), user.uid);
                    req.extensions_mut().insert(user);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    log::warn!("🔒 Token verification error: {}", e);
                    Ok(reject(req))
                }
            }
        })
    }
}
