//! Cycle-safe nested serialization.
//!
//! Rendering happens in two steps. [`RenderPlan::compile`] turns an entity
//! type's default [`SerializeRule`]s, plus any call-site rules, into a
//! finite tree of relations to expand. [`render`] then walks that tree over
//! a [`RecordSource`] and produces a JSON object per record.

pub mod plan;
pub mod render;
pub mod rules;

pub use plan::{RenderPlan, MAX_DEPTH};
pub use render::{render, render_many, RecordSource};
pub use rules::SerializeRule;
