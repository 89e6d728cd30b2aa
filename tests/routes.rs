use actix_web::http::StatusCode;
use actix_web::http::header::CACHE_CONTROL;
use actix_web::{App, test, web};
use chitfund_users::domain::types::UserId;
use chitfund_users::dto::users::{PaginatedUsersResponse, StatusResponse};
use chitfund_users::models::config::ServerConfig;
use chitfund_users::repository::{DieselRepository, UserWriter};
use chitfund_users::routes;
use chitfund_users::schema::users;
use diesel::prelude::*;
use serde_json::{Value, json};

mod common;

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        bcrypt_cost: 4,
    }
}

macro_rules! app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .configure(routes::configure)
                .app_data(web::Data::new($repo.clone()))
                .app_data(web::Data::new(server_config())),
        )
        .await
    };
}

fn seeded(name: &str, count: usize) -> (common::TestDb, DieselRepository) {
    let test_db = common::TestDb::new(name);
    let repo = DieselRepository::new(test_db.pool());
    for user in common::members(count) {
        repo.create_user(&user).unwrap();
    }
    (test_db, repo)
}

#[actix_web::test]
async fn test_paginated_listing_reports_metadata() {
    let (_db, repo) = seeded("routes_paginated_metadata.db", 25);
    let app = app!(repo);

    let req = test::TestRequest::get()
        .uri("/api/users/paginated?page=2&limit=10")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(CACHE_CONTROL).unwrap().to_str().unwrap(),
        "no-store"
    );
    let body: PaginatedUsersResponse = test::read_body_json(resp).await;
    assert!(body.success);
    assert_eq!(body.page, 2);
    assert_eq!(body.limit, 10);
    assert_eq!(body.total_pages, 3);
    assert_eq!(body.total_records, 25);
    assert_eq!(body.users.len(), 10);
    assert_eq!(body.users[0].name, "Member 14");
}

#[actix_web::test]
async fn test_paginated_listing_defaults_and_filter() {
    let (_db, repo) = seeded("routes_paginated_filter.db", 25);
    let app = app!(repo);

    let req = test::TestRequest::get()
        .uri("/api/users/paginated?q=MEMBER%202&filter=name")
        .to_request();
    let body: PaginatedUsersResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.page, 1);
    assert_eq!(body.limit, 10);
    assert_eq!(body.total_records, 5);
    assert!(body.users.iter().all(|user| user.name.starts_with("Member 2")));
}

#[actix_web::test]
async fn test_paginated_listing_rejects_bad_parameters() {
    let (_db, repo) = seeded("routes_paginated_rejects.db", 0);
    let app = app!(repo);

    for uri in [
        "/api/users/paginated?q=x&filter=password",
        "/api/users/paginated?limit=0",
        "/api/users/paginated?limit=101",
        "/api/users/paginated?page=0",
        "/api/users/paginated?page=abc",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body: StatusResponse = test::read_body_json(resp).await;
        assert!(!body.success, "{uri}");
    }
}

#[actix_web::test]
async fn test_page_beyond_end_is_empty() {
    let (_db, repo) = seeded("routes_page_beyond_end.db", 3);
    let app = app!(repo);

    let req = test::TestRequest::get()
        .uri("/api/users/paginated?page=9&limit=5")
        .to_request();
    let body: PaginatedUsersResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.total_records, 3);
    assert_eq!(body.total_pages, 1);
    assert!(body.users.is_empty());
}

#[actix_web::test]
async fn test_list_all_users() {
    let (_db, repo) = seeded("routes_list_all.db", 12);
    let app = app!(repo);

    let req = test::TestRequest::get().uri("/api/users").to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.len(), 12);
    assert_eq!(body[0]["name"], "Member 11");
}

#[actix_web::test]
async fn test_user_lifecycle() {
    let (_db, repo) = seeded("routes_user_lifecycle.db", 0);
    let app = app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "name": "Priya",
            "address": "12 Temple St",
            "email": "Priya@Example.com",
            "phone": "9876543210",
            "pincode": "600001",
            "username": "priya",
            "password": "s3cret!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["email"], "priya@example.com");
    assert_eq!(created["role"], "user");
    assert!(created.get("password").is_none());
    assert!(created.get("passwordHash").is_none());
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{id}"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["username"], "priya");

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{id}"))
        .set_json(json!({"phone": "9000000001"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["phone"], "9000000001");
    assert_eq!(updated["name"], "Priya");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{id}"))
        .to_request();
    let deleted: StatusResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted, StatusResponse::ok("User deleted successfully"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_duplicate_username_conflicts() {
    let (_db, repo) = seeded("routes_duplicate_username.db", 1);
    let app = app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "name": "Impostor",
            "email": "other@example.com",
            "username": "member0",
            "password": "x"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_invalid_bodies_are_rejected() {
    let (_db, repo) = seeded("routes_invalid_bodies.db", 0);
    let app = app!(repo);

    let missing_fields = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({"name": "No Email"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, missing_fields).await.status(),
        StatusCode::BAD_REQUEST
    );

    let bad_email = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "name": "Bad",
            "email": "not-an-email",
            "username": "bad",
            "password": "x"
        }))
        .to_request();
    let resp = test::call_service(&app, bad_email).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: StatusResponse = test::read_body_json(resp).await;
    assert!(!body.success);
}

#[actix_web::test]
async fn test_missing_and_malformed_ids_are_not_found() {
    let (_db, repo) = seeded("routes_missing_ids.db", 0);
    let app = app!(repo);
    let missing = UserId::new().to_string();

    for uri in [format!("/api/users/{missing}"), "/api/users/42".to_string()] {
        let get = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, get).await.status(), StatusCode::NOT_FOUND);

        let put = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"name": "Ghost"}))
            .to_request();
        assert_eq!(test::call_service(&app, put).await.status(), StatusCode::NOT_FOUND);

        let delete = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, delete).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: StatusResponse = test::read_body_json(resp).await;
        assert_eq!(body, StatusResponse::error("User not found"));
    }
}

#[actix_web::test]
async fn test_create_and_update_store_bcrypt_hashes() {
    let (db, repo) = seeded("routes_store_bcrypt_hashes.db", 0);
    let app = app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "name": "Kavya",
            "email": "kavya@example.com",
            "username": "kavya",
            "password": "first-secret"
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let stored_hash = |db: &common::TestDb| -> String {
        let mut conn = db.pool().get().unwrap();
        users::table
            .find(&id)
            .select(users::password_hash)
            .first::<String>(&mut conn)
            .unwrap()
    };
    assert!(bcrypt::verify("first-secret", &stored_hash(&db)).unwrap());

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{id}"))
        .set_json(json!({"password": "second-secret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let hash = stored_hash(&db);
    assert!(bcrypt::verify("second-secret", &hash).unwrap());
    assert!(!bcrypt::verify("first-secret", &hash).unwrap());
}
