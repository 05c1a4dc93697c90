pub mod mission;
pub mod planet;
pub mod scientist;

use serde_json::Value;
use stellar_core::entity::EntityKind;
use stellar_core::error::CoreError;
use stellar_core::serialization::{render, RecordSource, RenderPlan, SerializeRule};
use stellar_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::query::RenderParams;

/// Compile the render plan for `kind` from the query's `exclude` rules plus
/// any rules fixed by the endpoint itself.
pub(crate) fn plan_for(
    kind: EntityKind,
    params: &RenderParams,
    fixed: &[SerializeRule],
) -> AppResult<RenderPlan> {
    let mut rules = params.rules(kind)?;
    rules.extend_from_slice(fixed);
    Ok(RenderPlan::compile(kind, &rules))
}

/// Render one root record that the loader has just placed in `source`.
pub(crate) fn render_root<S: RecordSource>(
    source: &S,
    plan: &RenderPlan,
    id: DbId,
) -> AppResult<Value> {
    render(source, plan, id).ok_or_else(|| {
        AppError::InternalError(format!("{} {id} missing from loaded graph", plan.kind.name()))
    })
}

pub(crate) fn not_found(kind: EntityKind, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: kind.name(),
        id,
    })
}
