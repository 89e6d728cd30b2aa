//! HTTP handlers and the mapping from service errors to responses.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse, web};

use crate::dto::users::StatusResponse;
use crate::services::ServiceError;

pub mod users;

pub const USER_NOT_FOUND: &str = "User not found";

/// Maps a service failure onto a status code and the standard error body.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(StatusResponse::error(USER_NOT_FOUND)),
        ServiceError::InvalidFilter(_)
        | ServiceError::InvalidPage(_)
        | ServiceError::Form(_)
        | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(StatusResponse::error(err.to_string()))
        }
        ServiceError::Conflict(_) => {
            HttpResponse::Conflict().json(StatusResponse::error("User already exists"))
        }
        ServiceError::Repository(_) | ServiceError::Internal(_) => {
            HttpResponse::InternalServerError().json(StatusResponse::error("Internal server error"))
        }
    }
}

fn bad_request(message: String) -> Error {
    let response = HttpResponse::build(StatusCode::BAD_REQUEST).json(StatusResponse::error(&message));
    InternalError::from_response(message, response).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    log::warn!("Rejected query string: {err}");
    bad_request(err.to_string())
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    log::warn!("Rejected JSON body: {err}");
    bad_request(err.to_string())
}

/// Registers the users API and the extractor error handlers under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .service(users::list_users)
                .service(users::list_users_paginated)
                .service(users::create_user)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user),
        );
}
