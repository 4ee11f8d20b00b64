// One table for every endpoint: method, path, auth requirement, handler.

use crate::api::{bills, health, index, payments, users};
use crate::middleware::AuthMiddleware;
use crate::services::TokenVerifier;
use actix_web::{guard, http::Method, web, Route};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Bearer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Index,
    Health,
    ListBills,
    GetBill,
    ListPayments,
    CreatePayment,
    UpdatePayment,
    DeletePayment,
    RegisterUser,
}

impl Endpoint {
    fn route(self) -> Route {
        match self {
            Endpoint::Index => web::route().to(index::index),
            Endpoint::Health => web::route().to(health::health_check),
            Endpoint::ListBills => web::route().to(bills::list_bills),
            Endpoint::GetBill => web::route().to(bills::get_bill),
            Endpoint::ListPayments => web::route().to(payments::list_payments),
            Endpoint::CreatePayment => web::route().to(payments::create_payment),
            Endpoint::UpdatePayment => web::route().to(payments::update_payment),
            Endpoint::DeletePayment => web::route().to(payments::delete_payment),
            Endpoint::RegisterUser => web::route().to(users::register_user),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub verb: Verb,
    pub path: &'static str,
    pub access: Access,
    pub endpoint: Endpoint,
}

const fn entry(verb: Verb, path: &'static str, access: Access, endpoint: Endpoint) -> RouteEntry {
    RouteEntry {
        verb,
        path,
        access,
        endpoint,
    }
}

pub const ROUTES: &[RouteEntry] = &[
    entry(Verb::Get, "/", Access::Public, Endpoint::Index),
    entry(Verb::Get, "/health", Access::Public, Endpoint::Health),
    entry(Verb::Get, "/bills", Access::Public, Endpoint::ListBills),
    entry(Verb::Get, "/bills/{id}", Access::Bearer, Endpoint::GetBill),
    entry(Verb::Get, "/payment", Access::Bearer, Endpoint::ListPayments),
    entry(Verb::Post, "/payment", Access::Bearer, Endpoint::CreatePayment),
    entry(Verb::Patch, "/payment/{id}", Access::Public, Endpoint::UpdatePayment),
    entry(Verb::Delete, "/payment/{id}", Access::Public, Endpoint::DeletePayment),
    entry(Verb::Post, "/user", Access::Public, Endpoint::RegisterUser),
];

/// Registers every entry of `ROUTES`. Each entry gets its own resource with a
/// method guard, so entries sharing a path can differ in auth.
pub fn configure(cfg: &mut web::ServiceConfig, verifier: Arc<dyn TokenVerifier>) {
    for entry in ROUTES {
        let resource = web::resource(entry.path)
            .guard(guard::Method(entry.verb.method()))
            .route(entry.endpoint.route());

        match entry.access {
            Access::Public => cfg.service(resource),
            Access::Bearer => cfg.service(resource.wrap(AuthMiddleware::new(verifier.clone()))),
        };
    }
}
