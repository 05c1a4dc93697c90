//! Rendering of a record graph along a [`RenderPlan`].

use serde_json::{Map, Value};

use crate::entity::{Cardinality, EntityKind, Relation};
use crate::serialization::plan::RenderPlan;
use crate::types::DbId;

/// Read access to the records a plan walks over.
///
/// Relations are resolved by id, so the cyclic Planet/Mission/Scientist
/// graph is held without any owning back-pointers.
pub trait RecordSource {
    /// Scalar columns of one record, or `None` if it is not available.
    fn fields(&self, kind: EntityKind, id: DbId) -> Option<Map<String, Value>>;

    /// Ids reached from one record through `relation`, in stable order.
    fn related(&self, kind: EntityKind, id: DbId, relation: Relation) -> Vec<DbId>;
}

/// Render one record. Returns `None` if the source does not hold it.
pub fn render<S: RecordSource + ?Sized>(source: &S, plan: &RenderPlan, id: DbId) -> Option<Value> {
    let mut ancestors = Vec::new();
    render_node(source, plan, id, &mut ancestors).map(Value::Object)
}

/// Render several records of the same kind, skipping any the source lacks.
pub fn render_many<S: RecordSource + ?Sized>(
    source: &S,
    plan: &RenderPlan,
    ids: &[DbId],
) -> Vec<Value> {
    ids.iter()
        .filter_map(|&id| render(source, plan, id))
        .collect()
}

fn render_node<S: RecordSource + ?Sized>(
    source: &S,
    plan: &RenderPlan,
    id: DbId,
    ancestors: &mut Vec<(EntityKind, DbId)>,
) -> Option<Map<String, Value>> {
    let mut out = source.fields(plan.kind, id)?;
    for field in &plan.omit {
        out.remove(*field);
    }

    ancestors.push((plan.kind, id));
    for (rel, child) in &plan.children {
        // A record is never rendered inside itself, whatever the plan says.
        let (cyclic, targets): (Vec<DbId>, Vec<DbId>) = source
            .related(plan.kind, id, *rel)
            .into_iter()
            .partition(|target| ancestors.contains(&(rel.target(), *target)));

        match rel.cardinality() {
            Cardinality::Many => {
                let items = targets
                    .iter()
                    .filter_map(|&t| render_node(source, child, t, ancestors))
                    .map(Value::Object)
                    .collect();
                out.insert(rel.name().to_string(), Value::Array(items));
            }
            Cardinality::One => {
                if !cyclic.is_empty() {
                    continue;
                }
                let value = targets
                    .first()
                    .and_then(|&t| render_node(source, child, t, ancestors))
                    .map_or(Value::Null, Value::Object);
                out.insert(rel.name().to_string(), value);
            }
        }
    }
    ancestors.pop();

    Some(out)
}
