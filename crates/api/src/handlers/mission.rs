//! Handlers for the `/missions` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use sqlx::PgConnection;
use stellar_core::entity::EntityKind;
use stellar_core::patch::Patch;
use stellar_core::serialization::render_many;
use stellar_core::types::DbId;
use stellar_db::graph::RecordGraph;
use stellar_db::models::mission::{CreateMission, Mission, NewMission};
use stellar_db::repositories::MissionRepo;

use super::{not_found, plan_for, render_root};
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::query::RenderParams;
use crate::state::AppState;

async fn render_mission(
    conn: &mut PgConnection,
    params: &RenderParams,
    mission: Mission,
) -> AppResult<Value> {
    let plan = plan_for(EntityKind::Mission, params, &[])?;
    let id = mission.id;
    let graph = RecordGraph::from_missions(conn, &plan, vec![mission]).await?;
    render_root(&graph, &plan, id)
}

/// GET /missions
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RenderParams>,
) -> AppResult<Json<Vec<Value>>> {
    let plan = plan_for(EntityKind::Mission, &params, &[])?;
    let mut conn = state.pool.acquire().await?;
    let missions = MissionRepo::list(&mut *conn).await?;
    let ids: Vec<DbId> = missions.iter().map(|m| m.id).collect();
    let graph = RecordGraph::from_missions(&mut conn, &plan, missions).await?;
    Ok(Json(render_many(&graph, &plan, &ids)))
}

/// POST /missions
///
/// A `planet_id` or `scientist_id` that names no row fails the foreign key
/// and surfaces as 400 `INVALID_REFERENCE`.
pub async fn create(
    State(state): State<AppState>,
    Query(params): Query<RenderParams>,
    JsonBody(input): JsonBody<CreateMission>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let input = NewMission::try_from(input)?;
    let mut conn = state.pool.acquire().await?;
    let mission = MissionRepo::create(&mut *conn, &input).await?;
    tracing::info!(
        mission_id = mission.id,
        planet_id = mission.planet_id,
        scientist_id = mission.scientist_id,
        "Mission created"
    );
    let body = render_mission(&mut conn, &params, mission).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /missions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RenderParams>,
) -> AppResult<Json<Value>> {
    let mut conn = state.pool.acquire().await?;
    let mission = MissionRepo::find_by_id(&mut *conn, id)
        .await?
        .ok_or(not_found(EntityKind::Mission, id))?;
    Ok(Json(render_mission(&mut conn, &params, mission).await?))
}

/// PATCH /missions/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RenderParams>,
    JsonBody(input): JsonBody<Patch>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let mut tx = state.pool.begin().await?;
    let mut mission = MissionRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or(not_found(EntityKind::Mission, id))?;
    mission.apply_patch(&input)?;
    let mission = MissionRepo::update(&mut *tx, &mission)
        .await?
        .ok_or(not_found(EntityKind::Mission, id))?;
    let body = render_mission(&mut tx, &params, mission).await?;
    tx.commit().await?;

    tracing::info!(mission_id = id, "Mission updated");
    Ok((StatusCode::ACCEPTED, Json(body)))
}

/// DELETE /missions/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if MissionRepo::delete(&state.pool, id).await? {
        tracing::info!(mission_id = id, "Mission deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(EntityKind::Mission, id))
    }
}
