use actix_web::{
    error::InternalError,
    http::{header::ContentType, StatusCode},
    web, HttpResponse,
};
use log::warn;

use crate::{directory::UserDirectory, error::DirectoryError, views};

pub mod health;
pub mod users;

/// Runs a directory call on the blocking pool; the stores are synchronous.
pub(crate) async fn run<T, F>(
    directory: &web::Data<UserDirectory>,
    f: F,
) -> Result<T, DirectoryError>
where
    F: FnOnce(&UserDirectory) -> Result<T, DirectoryError> + Send + 'static,
    T: Send + 'static,
{
    let directory = directory.get_ref().clone();
    web::block(move || f(&directory)).await?
}

pub(crate) fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|why, _req| {
        warn!("Rejected form submission: {}", why);
        let response = html(
            StatusCode::BAD_REQUEST,
            views::error_page("Invalid form submission"),
        );
        InternalError::from_response(why, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .service(health::health_check)
        .service(users::root)
        .service(users::index)
        .service(users::create)
        .service(users::store)
        .service(users::show)
        .service(users::edit)
        .service(users::update)
        .service(users::destroy);
}
