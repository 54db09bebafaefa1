use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::categories::CategoryForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::categories::{
    create_category, load_categories, load_category, modify_category, remove_category,
};

const NOT_FOUND: &str = "Category not found";

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match load_categories(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list categories")
        }
    }
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match load_category(repo.get_ref(), category_id) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(ServiceError::NotFound) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(err) => {
            log::error!("Failed to load category {category_id}: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load category")
        }
    }
}

#[post("/categories")]
pub async fn add_category(
    repo: web::Data<DieselRepository>,
    form: web::Json<CategoryForm>,
) -> impl Responder {
    match create_category(repo.get_ref(), form.into_inner()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(ServiceError::Form(message)) | Err(ServiceError::Conflict(message)) => {
            error_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(err) => {
            log::error!("Failed to create category: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create category")
        }
    }
}

#[put("/categories/{category_id}")]
pub async fn edit_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<CategoryForm>,
) -> impl Responder {
    let category_id = path.into_inner();

    match modify_category(repo.get_ref(), category_id, form.into_inner()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(ServiceError::NotFound) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(ServiceError::Form(message)) | Err(ServiceError::Conflict(message)) => {
            error_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(err) => {
            log::error!("Failed to modify category {category_id}: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to modify category")
        }
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match remove_category(repo.get_ref(), category_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(err) => {
            log::error!("Failed to delete category {category_id}: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete category")
        }
    }
}
