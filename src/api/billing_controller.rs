use actix_web::{web, HttpResponse};
use log::info;
use uuid::Uuid;

use crate::{
    constants,
    error::ServiceError,
    models::billing::Billing,
    services::billing_service::BillingService,
};

fn parse_billing_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::bad_request(constants::MESSAGE_INVALID_BILLING_ID))
}

// POST billing
pub async fn insert(
    billing: web::Json<Billing>,
    service: web::Data<BillingService>,
) -> Result<HttpResponse, ServiceError> {
    info!("Processing billing insert request");
    let saved = service.save(billing.into_inner())?;
    Ok(HttpResponse::Ok().json(saved))
}

// GET billing
pub async fn find_all(service: web::Data<BillingService>) -> Result<HttpResponse, ServiceError> {
    let billings = service.find_all()?;
    Ok(HttpResponse::Ok().json(billings))
}

// GET billing/{id}
pub async fn find_by_id(
    id: web::Path<String>,
    service: web::Data<BillingService>,
) -> Result<HttpResponse, ServiceError> {
    let id = parse_billing_id(&id)?;
    let billing = service.find_by_id(id)?;
    Ok(HttpResponse::Ok().json(billing))
}

// PUT billing/{id}
pub async fn update(
    id: web::Path<String>,
    billing: web::Json<Billing>,
    service: web::Data<BillingService>,
) -> Result<HttpResponse, ServiceError> {
    let id = parse_billing_id(&id)?;
    info!("Processing billing update request for {}", id);
    let updated = service.update(id, billing.into_inner())?;
    Ok(HttpResponse::Ok().json(updated))
}

// DELETE billing/{id}
pub async fn delete(
    id: web::Path<String>,
    service: web::Data<BillingService>,
) -> Result<HttpResponse, ServiceError> {
    let id = parse_billing_id(&id)?;
    service.delete(id)?;
    Ok(HttpResponse::Ok().finish())
}
