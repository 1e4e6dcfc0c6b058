//! HTTP-level integration tests for the `/categories` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_product, delete, get, post_json, put_json};
use sqlx::PgPool;

async fn create_category(pool: &PgPool, name: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/categories",
        serde_json::json!({"name": name}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_category_returns_201(pool: PgPool) {
    let created = create_category(&pool, "Shoes").await;
    assert_eq!(created["name"], "Shoes");
    assert!(created["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_duplicate_category_returns_409(pool: PgPool) {
    create_category(&pool, "Shoes").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/categories",
        serde_json::json!({"name": "Shoes"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "ALREADY_EXISTS");
    assert_eq!(json["error"], "Category 'Shoes' already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_blank_category_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/categories",
        serde_json::json!({"name": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_categories_sorted_by_name(pool: PgPool) {
    create_category(&pool, "Shoes").await;
    create_category(&pool, "Coats").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/categories").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Coats", "Shoes"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_category_by_id_and_name(pool: PgPool) {
    let created = create_category(&pool, "Shoes").await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Shoes");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/categories/by-name/Shoes").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_category_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/categories/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/categories/by-name/Nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Category 'Nowhere' not found"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_category(pool: PgPool) {
    let created = create_category(&pool, "Shoes").await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/categories/{id}"),
        serde_json::json!({"name": "Footwear"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Footwear");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_category_onto_existing_name_returns_409(pool: PgPool) {
    create_category(&pool, "Shoes").await;
    let coats = create_category(&pool, "Coats").await;
    let id = coats["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/categories/{id}"),
        serde_json::json!({"name": "Shoes"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "ALREADY_EXISTS");
    assert_eq!(json["error"], "Category 'Shoes' already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_category_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/categories/999999",
        serde_json::json!({"name": "Footwear"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_category(pool: PgPool) {
    let created = create_category(&pool, "Shoes").await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_category_in_use_returns_409(pool: PgPool) {
    let product = create_product(&pool, "Runner", "Acme", "Shoes").await;
    let category_id = product["category"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/categories/{category_id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/categories/{category_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
