//! Handlers for the `/planets` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use sqlx::PgConnection;
use stellar_core::entity::{EntityKind, Relation};
use stellar_core::patch::Patch;
use stellar_core::serialization::{render_many, SerializeRule};
use stellar_core::types::DbId;
use stellar_db::graph::RecordGraph;
use stellar_db::models::planet::{CreatePlanet, Planet};
use stellar_db::repositories::PlanetRepo;

use super::{not_found, plan_for, render_root};
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::query::RenderParams;
use crate::state::AppState;

async fn render_planet(
    conn: &mut PgConnection,
    params: &RenderParams,
    planet: Planet,
) -> AppResult<Value> {
    let plan = plan_for(EntityKind::Planet, params, &[])?;
    let id = planet.id;
    let graph = RecordGraph::from_planets(conn, &plan, vec![planet]).await?;
    render_root(&graph, &plan, id)
}

/// GET /planets
///
/// Lists render without the `missions` collection.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RenderParams>,
) -> AppResult<Json<Vec<Value>>> {
    let plan = plan_for(
        EntityKind::Planet,
        &params,
        &[SerializeRule::relation(EntityKind::Planet, &[Relation::PlanetMissions])],
    )?;
    let mut conn = state.pool.acquire().await?;
    let planets = PlanetRepo::list(&mut *conn).await?;
    let ids: Vec<DbId> = planets.iter().map(|p| p.id).collect();
    let graph = RecordGraph::from_planets(&mut conn, &plan, planets).await?;
    Ok(Json(render_many(&graph, &plan, &ids)))
}

/// POST /planets
pub async fn create(
    State(state): State<AppState>,
    Query(params): Query<RenderParams>,
    JsonBody(input): JsonBody<CreatePlanet>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let mut conn = state.pool.acquire().await?;
    let planet = PlanetRepo::create(&mut *conn, &input).await?;
    tracing::info!(planet_id = planet.id, "Planet created");
    let body = render_planet(&mut conn, &params, planet).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /planets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RenderParams>,
) -> AppResult<Json<Value>> {
    let mut conn = state.pool.acquire().await?;
    let planet = PlanetRepo::find_by_id(&mut *conn, id)
        .await?
        .ok_or(not_found(EntityKind::Planet, id))?;
    Ok(Json(render_planet(&mut conn, &params, planet).await?))
}

/// PATCH /planets/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RenderParams>,
    JsonBody(input): JsonBody<Patch>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let mut tx = state.pool.begin().await?;
    let mut planet = PlanetRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or(not_found(EntityKind::Planet, id))?;
    planet.apply_patch(&input)?;
    let planet = PlanetRepo::update(&mut *tx, &planet)
        .await?
        .ok_or(not_found(EntityKind::Planet, id))?;
    let body = render_planet(&mut tx, &params, planet).await?;
    tx.commit().await?;

    tracing::info!(planet_id = id, "Planet updated");
    Ok((StatusCode::ACCEPTED, Json(body)))
}

/// DELETE /planets/{id}
///
/// Removes the planet and every mission that targets it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let outcome = PlanetRepo::delete(&state.pool, id)
        .await?
        .ok_or(not_found(EntityKind::Planet, id))?;
    tracing::info!(
        planet_id = id,
        missions_removed = outcome.missions_removed,
        "Planet deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
