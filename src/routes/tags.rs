use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::tags::TagForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::tags::{create_tag, load_tag, load_tags, modify_tag, remove_tag};

const NOT_FOUND: &str = "Tag not found";

#[get("/tags")]
pub async fn list_tags(repo: web::Data<DieselRepository>) -> impl Responder {
    match load_tags(repo.get_ref()) {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(err) => {
            log::error!("Failed to list tags: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list tags")
        }
    }
}

#[get("/tags/{tag_id}")]
pub async fn show_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let tag_id = path.into_inner();

    match load_tag(repo.get_ref(), tag_id) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(ServiceError::NotFound) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(err) => {
            log::error!("Failed to load tag {tag_id}: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load tag")
        }
    }
}

#[post("/tags")]
pub async fn add_tag(
    repo: web::Data<DieselRepository>,
    form: web::Json<TagForm>,
) -> impl Responder {
    match create_tag(repo.get_ref(), form.into_inner()) {
        Ok(tag) => HttpResponse::Created().json(tag),
        Err(ServiceError::Form(message)) | Err(ServiceError::Conflict(message)) => {
            error_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(err) => {
            log::error!("Failed to create tag: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create tag")
        }
    }
}

#[put("/tags/{tag_id}")]
pub async fn edit_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<TagForm>,
) -> impl Responder {
    let tag_id = path.into_inner();

    match modify_tag(repo.get_ref(), tag_id, form.into_inner()) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(ServiceError::NotFound) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(ServiceError::Form(message)) | Err(ServiceError::Conflict(message)) => {
            error_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(err) => {
            log::error!("Failed to modify tag {tag_id}: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to modify tag")
        }
    }
}

#[delete("/tags/{tag_id}")]
pub async fn delete_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let tag_id = path.into_inner();

    match remove_tag(repo.get_ref(), tag_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(err) => {
            log::error!("Failed to delete tag {tag_id}: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete tag")
        }
    }
}
