use actix_web::web;
use log::info;

use crate::api::billing_controller;

pub fn config_services(cfg: &mut web::ServiceConfig) {
    info!("Configuring routes...");
    cfg.service(
        web::scope("/billing")
            .service(
                web::resource("")
                    .route(web::get().to(billing_controller::find_all))
                    .route(web::post().to(billing_controller::insert)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(billing_controller::find_by_id))
                    .route(web::put().to(billing_controller::update))
                    .route(web::delete().to(billing_controller::delete)),
            ),
    );
}
