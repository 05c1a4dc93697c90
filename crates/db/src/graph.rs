//! In-memory record graph for nested rendering.
//!
//! [`RecordGraph`] holds planets, scientists and missions keyed by id and
//! resolves relations through foreign keys, so the cyclic entity graph is
//! stored without back-pointers. [`RecordGraph::expand`] walks a compiled
//! [`RenderPlan`] and fetches exactly the records the plan will render,
//! one batched query per plan edge.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::PgConnection;
use stellar_core::entity::{EntityKind, Relation};
use stellar_core::serialization::{RecordSource, RenderPlan};
use stellar_core::types::DbId;

use crate::models::mission::Mission;
use crate::models::planet::Planet;
use crate::models::scientist::Scientist;
use crate::repositories::{MissionRepo, PlanetRepo, ScientistRepo};

#[derive(Debug, Default)]
pub struct RecordGraph {
    planets: BTreeMap<DbId, Planet>,
    scientists: BTreeMap<DbId, Scientist>,
    missions: BTreeMap<DbId, Mission>,
}

impl RecordGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_planet(&mut self, planet: Planet) {
        self.planets.insert(planet.id, planet);
    }

    pub fn insert_scientist(&mut self, scientist: Scientist) {
        self.scientists.insert(scientist.id, scientist);
    }

    pub fn insert_mission(&mut self, mission: Mission) {
        self.missions.insert(mission.id, mission);
    }

    /// Build a graph rooted at `planets`, loading whatever `plan` expands.
    pub async fn from_planets(
        conn: &mut PgConnection,
        plan: &RenderPlan,
        planets: Vec<Planet>,
    ) -> Result<Self, sqlx::Error> {
        let mut graph = Self::new();
        let roots: Vec<DbId> = planets.iter().map(|p| p.id).collect();
        planets.into_iter().for_each(|p| graph.insert_planet(p));
        graph.expand(conn, plan, roots).await?;
        Ok(graph)
    }

    /// Build a graph rooted at `scientists`, loading whatever `plan` expands.
    pub async fn from_scientists(
        conn: &mut PgConnection,
        plan: &RenderPlan,
        scientists: Vec<Scientist>,
    ) -> Result<Self, sqlx::Error> {
        let mut graph = Self::new();
        let roots: Vec<DbId> = scientists.iter().map(|s| s.id).collect();
        scientists.into_iter().for_each(|s| graph.insert_scientist(s));
        graph.expand(conn, plan, roots).await?;
        Ok(graph)
    }

    /// Build a graph rooted at `missions`, loading whatever `plan` expands.
    pub async fn from_missions(
        conn: &mut PgConnection,
        plan: &RenderPlan,
        missions: Vec<Mission>,
    ) -> Result<Self, sqlx::Error> {
        let mut graph = Self::new();
        let roots: Vec<DbId> = missions.iter().map(|m| m.id).collect();
        missions.into_iter().for_each(|m| graph.insert_mission(m));
        graph.expand(conn, plan, roots).await?;
        Ok(graph)
    }

    /// Load the records reachable from `roots` along `plan`.
    ///
    /// `roots` must already be in the graph. Collections are always fetched
    /// in full for the owners being expanded; single references are only
    /// fetched when not yet present.
    pub async fn expand(
        &mut self,
        conn: &mut PgConnection,
        plan: &RenderPlan,
        roots: Vec<DbId>,
    ) -> Result<(), sqlx::Error> {
        let mut pending: Vec<(&RenderPlan, Vec<DbId>)> = vec![(plan, roots)];

        while let Some((node, ids)) = pending.pop() {
            if ids.is_empty() {
                continue;
            }
            for (rel, child) in &node.children {
                let next = match rel {
                    Relation::PlanetMissions => {
                        let missions = MissionRepo::list_by_planets(&mut *conn, &ids).await?;
                        self.absorb_missions(missions)
                    }
                    Relation::ScientistMissions => {
                        let missions = MissionRepo::list_by_scientists(&mut *conn, &ids).await?;
                        self.absorb_missions(missions)
                    }
                    Relation::MissionPlanet => {
                        let wanted = self.referenced(&ids, |m| m.planet_id);
                        let missing: Vec<DbId> = wanted
                            .iter()
                            .copied()
                            .filter(|id| !self.planets.contains_key(id))
                            .collect();
                        if !missing.is_empty() {
                            for planet in PlanetRepo::find_by_ids(&mut *conn, &missing).await? {
                                self.insert_planet(planet);
                            }
                        }
                        wanted
                    }
                    Relation::MissionScientist => {
                        let wanted = self.referenced(&ids, |m| m.scientist_id);
                        let missing: Vec<DbId> = wanted
                            .iter()
                            .copied()
                            .filter(|id| !self.scientists.contains_key(id))
                            .collect();
                        if !missing.is_empty() {
                            for scientist in ScientistRepo::find_by_ids(&mut *conn, &missing).await? {
                                self.insert_scientist(scientist);
                            }
                        }
                        wanted
                    }
                };
                tracing::trace!(
                    relation = rel.name(),
                    from = ?node.kind,
                    loaded = next.len(),
                    "Expanded relation"
                );
                pending.push((child, next));
            }
        }

        Ok(())
    }

    fn absorb_missions(&mut self, missions: Vec<Mission>) -> Vec<DbId> {
        let ids = missions.iter().map(|m| m.id).collect();
        missions.into_iter().for_each(|m| self.insert_mission(m));
        ids
    }

    /// Distinct ids referenced by the given missions through `key`.
    fn referenced(&self, mission_ids: &[DbId], key: impl Fn(&Mission) -> DbId) -> Vec<DbId> {
        let mut ids: Vec<DbId> = mission_ids
            .iter()
            .filter_map(|id| self.missions.get(id))
            .map(key)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

fn to_fields<T: Serialize>(row: &T) -> Option<Map<String, Value>> {
    match serde_json::to_value(row) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

impl RecordSource for RecordGraph {
    fn fields(&self, kind: EntityKind, id: DbId) -> Option<Map<String, Value>> {
        match kind {
            EntityKind::Planet => self.planets.get(&id).and_then(to_fields),
            EntityKind::Scientist => self.scientists.get(&id).and_then(to_fields),
            EntityKind::Mission => self.missions.get(&id).and_then(to_fields),
        }
    }

    fn related(&self, _kind: EntityKind, id: DbId, relation: Relation) -> Vec<DbId> {
        match relation {
            Relation::PlanetMissions => self
                .missions
                .values()
                .filter(|m| m.planet_id == id)
                .map(|m| m.id)
                .collect(),
            Relation::ScientistMissions => self
                .missions
                .values()
                .filter(|m| m.scientist_id == id)
                .map(|m| m.id)
                .collect(),
            Relation::MissionPlanet => self
                .missions
                .get(&id)
                .map(|m| m.planet_id)
                .filter(|p| self.planets.contains_key(p))
                .into_iter()
                .collect(),
            Relation::MissionScientist => self
                .missions
                .get(&id)
                .map(|m| m.scientist_id)
                .filter(|s| self.scientists.contains_key(s))
                .into_iter()
                .collect(),
        }
    }
}
