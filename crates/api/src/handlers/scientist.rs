//! Handlers for the `/scientists` resource.

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
use stellar_db::models::scientist::{CreateScientist, NewScientist, Scientist};
use stellar_db::repositories::ScientistRepo;

use super::{not_found, plan_for, render_root};
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::query::RenderParams;
use crate::state::AppState;

async fn render_scientist(
    conn: &mut PgConnection,
    params: &RenderParams,
    scientist: Scientist,
) -> AppResult<Value> {
    let plan = plan_for(EntityKind::Scientist, params, &[])?;
    let id = scientist.id;
    let graph = RecordGraph::from_scientists(conn, &plan, vec![scientist]).await?;
    render_root(&graph, &plan, id)
}

/// GET /scientists
///
/// Lists render without the `missions` collection.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RenderParams>,
) -> AppResult<Json<Vec<Value>>> {
    let plan = plan_for(
        EntityKind::Scientist,
        &params,
        &[SerializeRule::relation(
            EntityKind::Scientist,
            &[Relation::ScientistMissions],
        )],
    )?;
    let mut conn = state.pool.acquire().await?;
    let scientists = ScientistRepo::list(&mut *conn).await?;
    let ids: Vec<DbId> = scientists.iter().map(|s| s.id).collect();
    let graph = RecordGraph::from_scientists(&mut conn, &plan, scientists).await?;
    Ok(Json(render_many(&graph, &plan, &ids)))
}

/// POST /scientists
pub async fn create(
    State(state): State<AppState>,
    Query(params): Query<RenderParams>,
    JsonBody(input): JsonBody<CreateScientist>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let input = NewScientist::try_from(input)?;
    let mut conn = state.pool.acquire().await?;
    let scientist = ScientistRepo::create(&mut *conn, &input).await?;
    tracing::info!(scientist_id = scientist.id, "Scientist created");
    let body = render_scientist(&mut conn, &params, scientist).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /scientists/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RenderParams>,
) -> AppResult<Json<Value>> {
    let mut conn = state.pool.acquire().await?;
    let scientist = ScientistRepo::find_by_id(&mut *conn, id)
        .await?
        .ok_or(not_found(EntityKind::Scientist, id))?;
    Ok(Json(render_scientist(&mut conn, &params, scientist).await?))
}

/// PATCH /scientists/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RenderParams>,
    JsonBody(input): JsonBody<Patch>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let mut tx = state.pool.begin().await?;
    let mut scientist = ScientistRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or(not_found(EntityKind::Scientist, id))?;
    scientist.apply_patch(&input)?;
    let scientist = ScientistRepo::update(&mut *tx, &scientist)
        .await?
        .ok_or(not_found(EntityKind::Scientist, id))?;
    let body = render_scientist(&mut tx, &params, scientist).await?;
    tx.commit().await?;

    tracing::info!(scientist_id = id, "Scientist updated");
    Ok((StatusCode::ACCEPTED, Json(body)))
}

/// DELETE /scientists/{id}
///
/// Removes the scientist and every mission they ran.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let outcome = ScientistRepo::delete(&state.pool, id)
        .await?
        .ok_or(not_found(EntityKind::Scientist, id))?;
    tracing::info!(
        scientist_id = id,
        missions_removed = outcome.missions_removed,
        "Scientist deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
