//! The per-tick simulation pass
//!
//! Order within a tick: camera follow, per-entity behavior updates with
//! collision resolution, deferred spawns, reaping, then a depth re-sort.
//! Collision rules: a solid entity overlapping impassable terrain or
//! another solid snaps back to its pre-tick position; collider entities
//! additionally get a notification. Overlap means the two rounded grid
//! cells are equal.

use ahash::AHashSet;
use glam::Vec2;

use crate::core::types::{EntityId, GridPos};
use crate::entity::{Entity, EntityClass, EntityView, SpawnRequest, UpdateCtx};
use crate::sim::world::World;

/// Observable outcomes of one tick, in occurrence order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    Spawned { id: EntityId, class: EntityClass },
    Removed { id: EntityId, class: EntityClass },
    PlaySound { name: &'static str },
    /// A collider overlapped impassable terrain
    WorldCollision { id: EntityId },
    /// Two colliders overlapped; each pair reports once per tick
    EntityCollision { a: EntityId, b: EntityId },
    Damage { target: EntityId, amount: i32 },
}

fn view_of(e: &Entity) -> EntityView {
    EntityView {
        id: e.id,
        class: e.class,
        pos: e.pos,
    }
}

/// Damage hand-off from a collision to its victim
fn apply_damage(
    entities: &mut [Entity],
    target: EntityId,
    amount: i32,
    spawns: &mut Vec<SpawnRequest>,
    events: &mut Vec<SimEvent>,
) {
    if let Some(e) = entities.iter_mut().find(|e| e.id == target) {
        e.on_hit(amount, spawns, events);
        events.push(SimEvent::Damage { target, amount });
    }
}

impl World {
    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) -> Vec<SimEvent> {
        let mut events = Vec::new();
        let mut spawns: Vec<SpawnRequest> = Vec::new();

        // camera tracks the player
        if let Some(pid) = self.player {
            if let Some(pos) = self.entity(pid).map(|e| e.pos) {
                self.iso.camera = pos;
                if let Some(cam) = self
                    .entities
                    .iter_mut()
                    .find(|e| e.class == EntityClass::Camera)
                {
                    cam.pos = pos;
                }
            }
        }

        let views: Vec<EntityView> = self.entities.iter().map(view_of).collect();
        let backups: Vec<Vec2> = self.entities.iter().map(|e| e.pos).collect();
        let mut notified: AHashSet<(EntityId, EntityId)> = AHashSet::new();

        let Self {
            entities,
            terrain,
            config,
            rng,
            ..
        } = self;
        let n = entities.len();

        for i in 0..n {
            {
                let mut ctx = UpdateCtx {
                    terrain: &mut *terrain,
                    config: &*config,
                    rng: &mut *rng,
                    others: &views,
                    spawns: &mut spawns,
                    events: &mut events,
                };
                entities[i].update(dt, &mut ctx);
            }

            // dead entities stay in the pass until the reap below, so their
            // final collisions still land this tick
            let e = &mut entities[i];
            if !e.solid && !e.collider {
                continue;
            }

            // terrain collision
            if !terrain.is_passable(GridPos::round(e.pos)) {
                if e.solid {
                    e.pos = backups[i];
                }
                if e.collider {
                    events.push(SimEvent::WorldCollision { id: e.id });
                    if let Some((target, amount)) = e.on_collision(None, config, &mut events) {
                        apply_damage(entities, target, amount, &mut spawns, &mut events);
                    }
                }
            }

            // entity collision against every other live entity
            for j in 0..n {
                if j == i {
                    continue;
                }
                let (a, b) = (entities[i].id, entities[j].id);
                let pair = (a.min(b), a.max(b));

                let both_solid;
                let both_collider;
                let other_view;
                {
                    let ei = &entities[i];
                    let ej = &entities[j];
                    both_solid = ei.solid && ej.solid;
                    both_collider = ei.collider && ej.collider;
                    if !both_solid && !both_collider {
                        continue;
                    }
                    if GridPos::round(ei.pos) != GridPos::round(ej.pos) {
                        continue;
                    }
                    other_view = view_of(ej);
                }

                if both_solid {
                    entities[i].pos = backups[i];
                    entities[j].pos = backups[j];
                }

                if both_collider && notified.insert(pair) {
                    events.push(SimEvent::EntityCollision { a, b });
                    let effect_a =
                        entities[i].on_collision(Some(&other_view), config, &mut events);
                    let self_view = view_of(&entities[i]);
                    let effect_b =
                        entities[j].on_collision(Some(&self_view), config, &mut events);
                    for (target, amount) in [effect_a, effect_b].into_iter().flatten() {
                        apply_damage(entities, target, amount, &mut spawns, &mut events);
                    }
                }
            }
        }

        // deferred spawns enter the world after the pass; they first update
        // on the next tick
        for req in spawns {
            let class = req.class;
            let id = self.spawn_from_request(req);
            events.push(SimEvent::Spawned { id, class });
        }

        // reap
        self.entities.retain(|e| {
            if !e.alive {
                tracing::debug!("destroy {:?} (entity #{})", e.class, e.id.0);
                events.push(SimEvent::Removed {
                    id: e.id,
                    class: e.class,
                });
            }
            e.alive
        });

        // depth order: paint layer, then near-to-far along the iso diagonal
        self.entities.sort_by(|a, b| {
            a.z.cmp(&b.z)
                .then_with(|| (a.pos.x + a.pos.y).total_cmp(&(b.pos.x + b.pos.y)))
        });

        events
    }
}
