use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{ServiceError, products};

const NOT_FOUND: &str = "Product not found";

#[get("/products")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match products::load_products(repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => {
            log::error!("Failed to list products: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list products")
        }
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::load_product(repo.get_ref(), product_id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(ServiceError::NotFound) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load product")
        }
    }
}

#[post("/products")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(ServiceError::Form(message)) | Err(ServiceError::Conflict(message)) => {
            error_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create product")
        }
    }
}

/// Updates product fields and reconciles its tags with `tagIds` when present.
#[put("/products/{product_id}")]
pub async fn edit_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::modify_product(repo.get_ref(), product_id, form.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(ServiceError::NotFound) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(ServiceError::Form(message)) | Err(ServiceError::Conflict(message)) => {
            error_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(err) => {
            log::error!("Failed to modify product {product_id}: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to modify product")
        }
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::remove_product(repo.get_ref(), product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete product")
        }
    }
}
