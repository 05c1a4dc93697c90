//! HTTP-level integration tests for the `/missions` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete, get, patch_json, post_json};
use serde_json::json;
use sqlx::PgPool;

struct Owners {
    planet: i64,
    scientist: i64,
}

async fn seed_owners(pool: &PgPool) -> Owners {
    let planet = create(
        pool,
        "/planets",
        json!({"name": "Moon", "distance_from_earth": 384400, "nearest_star": "Sun"}),
    )
    .await;
    let scientist = create(
        pool,
        "/scientists",
        json!({"name": "Katherine Johnson", "field_of_study": "Mathematics"}),
    )
    .await;
    Owners { planet, scientist }
}

async fn mission_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM missions")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_mission_nests_owners_without_collections(pool: PgPool) {
    let owners = seed_owners(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/missions",
        json!({"name": "Apollo", "planet_id": owners.planet, "scientist_id": owners.scientist}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Apollo");
    assert_eq!(json["planet_id"], owners.planet);
    assert_eq!(json["planet"]["name"], "Moon");
    assert_eq!(json["scientist"]["name"], "Katherine Johnson");
    assert!(json["planet"].get("missions").is_none());
    assert!(json["scientist"].get("missions").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_mission_with_null_planet_returns_400(pool: PgPool) {
    let owners = seed_owners(&pool).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/missions",
        json!({"name": "Apollo", "planet_id": null, "scientist_id": owners.scientist}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "planet_id");
    assert_eq!(mission_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_mission_with_zero_scientist_returns_400(pool: PgPool) {
    let owners = seed_owners(&pool).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/missions",
        json!({"name": "Apollo", "planet_id": owners.planet, "scientist_id": 0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "scientist_id");
    assert_eq!(mission_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_mission_with_string_planet_id_returns_400_json(pool: PgPool) {
    let owners = seed_owners(&pool).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/missions",
        json!({"name": "Apollo", "planet_id": "1", "scientist_id": owners.scientist}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["errors"].is_array());
    assert_eq!(mission_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_mission_with_missing_planet_returns_400(pool: PgPool) {
    let owners = seed_owners(&pool).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/missions",
        json!({"name": "Apollo", "planet_id": 999999, "scientist_id": owners.scientist}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");
    assert_eq!(mission_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_missions_renders_owners(pool: PgPool) {
    let owners = seed_owners(&pool).await;
    for name in ["Apollo 11", "Apollo 12"] {
        create(
            &pool,
            "/missions",
            json!({"name": name, "planet_id": owners.planet, "scientist_id": owners.scientist}),
        )
        .await;
    }

    let response = get(common::build_test_app(pool), "/missions").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let missions = json.as_array().unwrap();
    assert_eq!(missions.len(), 2);
    assert_eq!(missions[0]["name"], "Apollo 11");
    for mission in missions {
        assert_eq!(mission["planet"]["id"], owners.planet);
        assert_eq!(mission["scientist"]["id"], owners.scientist);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_missions_with_exclude_drops_owner(pool: PgPool) {
    let owners = seed_owners(&pool).await;
    let id = create(
        &pool,
        "/missions",
        json!({"name": "Artemis", "planet_id": owners.planet, "scientist_id": owners.scientist}),
    )
    .await;

    let response = get(common::build_test_app(pool), "/missions?exclude=-planet").await;

    let json = body_json(response).await;
    assert!(json[0].get("planet").is_none());
    assert_eq!(json[0]["id"], id);
    assert!(json[0]["scientist"].is_object());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_mission_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/missions/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Mission with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_mission_moves_to_other_planet(pool: PgPool) {
    let owners = seed_owners(&pool).await;
    let mars = create(&pool, "/planets", json!({"name": "Mars"})).await;
    let id = create(
        &pool,
        "/missions",
        json!({"name": "Artemis", "planet_id": owners.planet, "scientist_id": owners.scientist}),
    )
    .await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/missions/{id}"),
        json!({"planet_id": mars, "name": "Ares"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Ares");
    assert_eq!(json["planet"]["name"], "Mars");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_mission_to_missing_scientist_returns_400(pool: PgPool) {
    let owners = seed_owners(&pool).await;
    let id = create(
        &pool,
        "/missions",
        json!({"name": "Artemis", "planet_id": owners.planet, "scientist_id": owners.scientist}),
    )
    .await;

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/missions/{id}"),
        json!({"scientist_id": 999999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");

    let json = body_json(get(common::build_test_app(pool), &format!("/missions/{id}")).await).await;
    assert_eq!(json["scientist_id"], owners.scientist);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_mission_unknown_field_returns_400(pool: PgPool) {
    let owners = seed_owners(&pool).await;
    let id = create(
        &pool,
        "/missions",
        json!({"name": "Artemis", "planet_id": owners.planet, "scientist_id": owners.scientist}),
    )
    .await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/missions/{id}"),
        json!({"name": "Renamed", "budget": 10}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "UNKNOWN_FIELD");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_mission_leaves_owners(pool: PgPool) {
    let owners = seed_owners(&pool).await;
    let id = create(
        &pool,
        "/missions",
        json!({"name": "Artemis", "planet_id": owners.planet, "scientist_id": owners.scientist}),
    )
    .await;

    let response = delete(common::build_test_app(pool.clone()), &format!("/missions/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(common::build_test_app(pool.clone()), &format!("/missions/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let planet = body_json(
        get(common::build_test_app(pool), &format!("/planets/{}", owners.planet)).await,
    )
    .await;
    assert_eq!(planet["missions"], json!([]));
}
