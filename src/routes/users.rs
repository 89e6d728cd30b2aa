use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::users::{PaginatedUsersResponse, StatusResponse, UsersPageQuery};
use crate::forms::users::{CreateUserForm, UpdateUserForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::users as users_service;

#[get("/users")]
pub async fn list_users(repo: web::Data<DieselRepository>) -> impl Responder {
    match users_service::list_all_users(repo.get_ref()) {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(err) => error_response(&err),
    }
}

#[get("/users/paginated")]
pub async fn list_users_paginated(
    params: web::Query<UsersPageQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users_service::list_users_paginated(repo.get_ref(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok()
            .insert_header(CacheControl(vec![CacheDirective::NoStore]))
            .json(PaginatedUsersResponse::from(page)),
        Err(err) => error_response(&err),
    }
}

#[post("/users")]
pub async fn create_user(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<CreateUserForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let bcrypt_cost = server_config.bcrypt_cost;

    // Hashing is CPU bound; keep it off the worker thread.
    let result = web::block(move || users_service::create_user(repo.as_ref(), form, bcrypt_cost))
        .await
        .unwrap_or_else(|err| Err(ServiceError::Internal(err.to_string())));

    match result {
        Ok(user) => {
            log::info!("Created user {}", user.id);
            HttpResponse::Created().json(user)
        }
        Err(err) => {
            log::error!("Failed to create user: {err}");
            error_response(&err)
        }
    }
}

#[get("/users/{user_id}")]
pub async fn get_user(
    user_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users_service::get_user(repo.get_ref(), &user_id) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => error_response(&err),
    }
}

#[put("/users/{user_id}")]
pub async fn update_user(
    user_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<UpdateUserForm>,
) -> impl Responder {
    let user_id = user_id.into_inner();
    let repo = repo.into_inner();
    let bcrypt_cost = server_config.bcrypt_cost;

    let id = user_id.clone();
    let result = web::block(move || {
        users_service::update_user(repo.as_ref(), &id, form, bcrypt_cost)
    })
    .await
    .unwrap_or_else(|err| Err(ServiceError::Internal(err.to_string())));

    match result {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => {
            log::error!("Failed to update user {user_id}: {err}");
            error_response(&err)
        }
    }
}

#[delete("/users/{user_id}")]
pub async fn delete_user(
    user_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users_service::delete_user(repo.get_ref(), &user_id) {
        Ok(()) => {
            log::info!("Deleted user {user_id}");
            HttpResponse::Ok().json(StatusResponse::ok("User deleted successfully"))
        }
        Err(err) => error_response(&err),
    }
}
