//! Compilation of exclusion rules into a finite render tree.
//!
//! The plan is computed from the schema and the rules alone, before any
//! record is loaded. Each node activates its own type's default rules in
//! addition to whatever its parent passed down, and a relation is only
//! descended when no active rule excludes it and the depth limit has not
//! been reached. The resulting tree is finite whatever the data looks like.

use crate::entity::{EntityKind, Relation};
use crate::serialization::rules::SerializeRule;

/// Maximum number of relation hops below the root.
pub const MAX_DEPTH: usize = 3;

/// What to render for one entity type at one position in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub kind: EntityKind,
    /// Scalar fields dropped at this position.
    pub omit: Vec<&'static str>,
    /// Relations expanded at this position, in declaration order.
    pub children: Vec<(Relation, RenderPlan)>,
}

/// The unconsumed tail of a rule as it travels down the tree.
#[derive(Debug, Clone)]
struct Pending {
    path: Vec<Relation>,
    field: Option<&'static str>,
}

impl Pending {
    fn excludes_relation(&self, rel: Relation) -> bool {
        self.field.is_none() && self.path.len() == 1 && self.path[0] == rel
    }
}

impl From<SerializeRule> for Pending {
    fn from(rule: SerializeRule) -> Self {
        Self {
            path: rule.path,
            field: rule.field,
        }
    }
}

impl RenderPlan {
    /// Compile the plan for rendering a `kind` record with the type's
    /// default rules plus `extra`.
    ///
    /// Extra rules anchored on a different entity type are ignored.
    pub fn compile(kind: EntityKind, extra: &[SerializeRule]) -> Self {
        let inherited = extra
            .iter()
            .filter(|rule| rule.origin == kind)
            .cloned()
            .map(Pending::from)
            .collect();
        Self::build(kind, inherited, 0)
    }

    fn build(kind: EntityKind, inherited: Vec<Pending>, depth: usize) -> Self {
        let mut active = inherited;
        active.extend(SerializeRule::defaults(kind).into_iter().map(Pending::from));

        let mut omit: Vec<&'static str> = active
            .iter()
            .filter(|p| p.path.is_empty())
            .filter_map(|p| p.field)
            .collect();
        omit.sort_unstable();
        omit.dedup();

        let mut children = Vec::new();
        if depth < MAX_DEPTH {
            for &rel in kind.relations() {
                if active.iter().any(|p| p.excludes_relation(rel)) {
                    continue;
                }
                let below = active
                    .iter()
                    .filter(|p| p.path.first() == Some(&rel))
                    .map(|p| Pending {
                        path: p.path[1..].to_vec(),
                        field: p.field,
                    })
                    .collect();
                children.push((rel, Self::build(rel.target(), below, depth + 1)));
            }
        }

        Self {
            kind,
            omit,
            children,
        }
    }

    /// The sub-plan expanded through `rel`, if any.
    pub fn child(&self, rel: Relation) -> Option<&RenderPlan> {
        self.children
            .iter()
            .find(|(r, _)| *r == rel)
            .map(|(_, plan)| plan)
    }

    /// Whether the plan expands the relation path `path` from this node.
    pub fn expands(&self, path: &[Relation]) -> bool {
        match path.split_first() {
            None => true,
            Some((rel, rest)) => self.child(*rel).is_some_and(|c| c.expands(rest)),
        }
    }

    /// Number of relation hops in the deepest branch.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|(_, c)| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Relation::*;

    #[test]
    fn planet_missions_do_not_reexpand_planet() {
        let plan = RenderPlan::compile(EntityKind::Planet, &[]);
        assert!(plan.expands(&[PlanetMissions]));
        assert!(!plan.expands(&[PlanetMissions, MissionPlanet]));
        // The mission's own defaults stop the scientist from listing missions.
        assert!(plan.expands(&[PlanetMissions, MissionScientist]));
        assert!(!plan.expands(&[PlanetMissions, MissionScientist, ScientistMissions]));
        assert_eq!(plan.depth(), 2);
    }

    #[test]
    fn scientist_missions_do_not_reexpand_scientist() {
        let plan = RenderPlan::compile(EntityKind::Scientist, &[]);
        assert!(plan.expands(&[ScientistMissions, MissionPlanet]));
        assert!(!plan.expands(&[ScientistMissions, MissionScientist]));
        assert!(!plan.expands(&[ScientistMissions, MissionPlanet, PlanetMissions]));
    }

    #[test]
    fn mission_expands_owners_without_their_missions() {
        let plan = RenderPlan::compile(EntityKind::Mission, &[]);
        assert!(plan.expands(&[MissionPlanet]));
        assert!(plan.expands(&[MissionScientist]));
        assert!(!plan.expands(&[MissionPlanet, PlanetMissions]));
        assert!(!plan.expands(&[MissionScientist, ScientistMissions]));
        assert_eq!(plan.depth(), 1);
    }

    #[test]
    fn call_site_rule_drops_collection() {
        let extra = [SerializeRule::relation(EntityKind::Planet, &[PlanetMissions])];
        let plan = RenderPlan::compile(EntityKind::Planet, &extra);
        assert!(plan.children.is_empty());
        assert_eq!(plan.depth(), 0);
    }

    #[test]
    fn call_site_field_rule_is_applied_at_depth() {
        let extra = [SerializeRule::field(
            EntityKind::Mission,
            &[MissionPlanet],
            "nearest_star",
        )];
        let plan = RenderPlan::compile(EntityKind::Mission, &extra);
        assert_eq!(plan.child(MissionPlanet).unwrap().omit, vec!["nearest_star"]);
        assert!(plan.child(MissionScientist).unwrap().omit.is_empty());
        assert!(plan.omit.is_empty());
    }

    #[test]
    fn rules_for_another_origin_are_ignored() {
        let extra = [SerializeRule::relation(EntityKind::Scientist, &[ScientistMissions])];
        let plan = RenderPlan::compile(EntityKind::Planet, &extra);
        assert!(plan.expands(&[PlanetMissions]));
    }

    #[test]
    fn depth_never_exceeds_limit() {
        for kind in [EntityKind::Planet, EntityKind::Scientist, EntityKind::Mission] {
            assert!(RenderPlan::compile(kind, &[]).depth() <= MAX_DEPTH);
        }
    }
}
