use std::io;

use actix_web::{web, App, HttpServer};
use log::info;
use tracing_actix_web::TracingLogger;

use billing_validator::{
    config::{app::config_services, settings::AppConfig},
    services::billing_service::BillingService,
    utils::logging::init_logging,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    init_logging(config.log_format);

    let service = web::Data::new(BillingService::in_memory());
    let (host, port) = config.bind_address();
    info!("Starting billing server at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(service.clone())
            .configure(config_services)
    })
    .bind((host, port))?
    .run()
    .await
}
