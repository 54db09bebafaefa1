use actix_web::http::StatusCode;
use actix_web::{HttpResponse, error, web};
use serde::Serialize;

pub mod categories;
pub mod products;
pub mod tags;

/// Body returned with every error response.
#[derive(Debug, Serialize)]
pub struct ErrorMessage<'a> {
    pub message: &'a str,
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorMessage { message })
}

/// Registers every `/api` route on the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .service(categories::list_categories)
            .service(categories::show_category)
            .service(categories::add_category)
            .service(categories::edit_category)
            .service(categories::delete_category)
            .service(products::list_products)
            .service(products::show_product)
            .service(products::add_product)
            .service(products::edit_product)
            .service(products::delete_product)
            .service(tags::list_tags)
            .service(tags::show_tag)
            .service(tags::add_tag)
            .service(tags::edit_tag)
            .service(tags::delete_tag),
    );
}

/// Malformed JSON bodies are answered with `400` and an error message.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = error_response(StatusCode::BAD_REQUEST, &err.to_string());
        error::InternalError::from_response(err, response).into()
    })
}
