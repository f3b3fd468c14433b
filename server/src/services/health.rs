use actix_web::{get, web, HttpResponse, Responder};
use log::error;

use crate::{directory::UserDirectory, services::run};

#[get("/health")]
pub async fn health_check(directory: web::Data<UserDirectory>) -> impl Responder {
    match run(&directory, |d| d.ping()).await {
        Ok(()) => HttpResponse::Ok().body("Healthy"),
        Err(why) => {
            error!("Health check failed: {}", why);
            HttpResponse::ServiceUnavailable().body("Unhealthy")
        }
    }
}
