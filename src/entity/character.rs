//! Character state machine: walking, throwing, taking hits, dying
//!
//! States map one-to-one onto sprite-sheet animation spans. Transitions
//! fire when the animation cursor runs past the span's frame count; Walk
//! and Idle loop instead.

use glam::Vec2;
use rand::Rng;

use crate::core::config::WorldConfig;
use crate::core::types::GridPos;
use crate::nav::{build_path, check_visible};
use crate::render::Surface;
use crate::sim::tick::SimEvent;
use crate::terrain::TerrainGenerator;

use super::{
    facing_from_dir, Behavior, Entity, EntityClass, SpawnRequest, UpdateCtx,
};

/// Character animation states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharState {
    Idle,
    Walk,
    /// Wind-up half of a throw; spawns the projectile on completion
    Throw1,
    /// Follow-through half of a throw
    Throw2,
    Hit,
    Die,
    Dead,
}

/// Sprite-sheet span for a state: (first frame, frame count)
pub fn sprite_span(state: CharState) -> (u16, u16) {
    match state {
        CharState::Idle => (8, 1),
        CharState::Walk => (0, 8),
        CharState::Throw1 => (8, 5),
        CharState::Throw2 => (13, 3),
        CharState::Hit => (16, 8),
        CharState::Die => (24, 8),
        CharState::Dead => (31, 1),
    }
}

#[derive(Debug, Clone)]
pub struct Character {
    pub state: CharState,
    /// Animation cursor in frames, fractional
    pub frame: f32,
    pub hp: i32,
    pub ai: bool,
    /// Remaining waypoints, farthest-first; consumed from the back
    pub path: Vec<Vec2>,
}

impl Character {
    pub fn new(hp: i32, ai: bool) -> Self {
        Self {
            state: CharState::Idle,
            frame: 0.0,
            hp,
            ai,
            path: Vec::new(),
        }
    }

    fn enter(&mut self, state: CharState) {
        self.state = state;
        self.frame = 0.0;
    }

    /// True while the character accepts walk/throw commands
    pub fn commandable(&self) -> bool {
        matches!(
            self.state,
            CharState::Idle | CharState::Walk | CharState::Throw1
        )
    }
}

pub(super) fn update(entity: &mut Entity, dt: f32, ctx: &mut UpdateCtx) {
    let id = entity.id;
    let Behavior::Character(ch) = &mut entity.behavior else {
        return;
    };

    ch.frame += ctx.config.anim_fps * dt;
    let (_, count) = sprite_span(ch.state);
    if ch.frame >= count as f32 {
        match ch.state {
            CharState::Throw1 => {
                ctx.spawns.push(SpawnRequest {
                    class: EntityClass::Snowball,
                    pos: entity.pos,
                    dir: Some(entity.dir),
                    owner: Some(id),
                    text: None,
                });
                ch.enter(CharState::Throw2);
            }
            CharState::Throw2 | CharState::Hit => ch.enter(CharState::Idle),
            CharState::Die => {
                ch.enter(CharState::Dead);
                entity.class = EntityClass::Corpse;
                entity.z = 0;
            }
            // looping states wrap the cursor
            _ => ch.frame -= count as f32,
        }
    }

    if ch.state == CharState::Walk {
        entity.pos += entity.dir * ctx.config.walk_speed * dt;
        match ch.path.last().copied() {
            None => ch.enter(CharState::Idle),
            Some(waypoint) => {
                if (waypoint - entity.pos).length() < ctx.config.waypoint_epsilon {
                    entity.pos = waypoint;
                    ch.path.pop();
                    match ch.path.last().copied() {
                        None => ch.enter(CharState::Idle),
                        Some(next) => {
                            let d = next - entity.pos;
                            entity.facing = facing_from_dir(d);
                            entity.dir = d.normalize_or_zero();
                        }
                    }
                }
            }
        }
    }

    if ch.ai && ch.state == CharState::Idle {
        think(entity, dt, ctx);
    }
}

/// AI decision roll for an idle character
///
/// Picks a random living character in range; throws when visible, otherwise
/// walks toward a jittered point near it.
fn think(entity: &mut Entity, dt: f32, ctx: &mut UpdateCtx) {
    let chance = (ctx.config.ai_decision_rate * dt).clamp(0.0, 1.0);
    if !ctx.rng.gen_bool(chance as f64) {
        return;
    }

    let radius = ctx.config.ai_radius;
    let candidates: Vec<_> = ctx
        .others
        .iter()
        .filter(|v| {
            v.id != entity.id
                && v.class.is_character()
                && (v.pos - entity.pos).length() < radius
        })
        .collect();
    if candidates.is_empty() {
        return;
    }

    let target = candidates[ctx.rng.gen_range(0..candidates.len())];
    if check_visible(ctx.terrain, entity.pos, target.pos) {
        throw_at(entity, target.pos);
    } else {
        let jitter = Vec2::new(
            ctx.rng.gen_range(-2.0..2.0),
            ctx.rng.gen_range(-2.0..2.0),
        );
        walk_to(entity, target.pos + jitter, ctx.terrain, ctx.config);
    }
}

/// Plan a path and start walking it; an empty plan stops the character
pub fn walk_to(
    entity: &mut Entity,
    goal: Vec2,
    terrain: &mut TerrainGenerator,
    config: &WorldConfig,
) {
    let Behavior::Character(ch) = &mut entity.behavior else {
        return;
    };
    if !ch.commandable() {
        return;
    }

    let path = build_path(terrain, entity.pos, goal, config.path_node_cap);
    match path.last().copied() {
        None => {
            ch.path.clear();
            if ch.state == CharState::Walk {
                ch.enter(CharState::Idle);
            }
        }
        Some(next) => {
            ch.path = path;
            ch.enter(CharState::Walk);
            let d = next - entity.pos;
            entity.facing = facing_from_dir(d);
            entity.dir = d.normalize_or_zero();
        }
    }
}

/// Face the target and begin the throw wind-up
pub fn throw_at(entity: &mut Entity, target: Vec2) {
    let aim = target - entity.pos;
    let Behavior::Character(ch) = &mut entity.behavior else {
        return;
    };
    if !ch.commandable() {
        return;
    }

    ch.enter(CharState::Throw1);
    entity.facing = facing_from_dir(aim);
    entity.dir = aim.normalize_or_zero();
}

pub(super) fn on_collision(entity: &mut Entity, _other: Option<&super::EntityView>) {
    let Behavior::Character(ch) = &mut entity.behavior else {
        return;
    };
    // walked into something; drop the plan rather than grind against it
    if ch.state == CharState::Walk {
        ch.path.clear();
        ch.enter(CharState::Idle);
    }
}

pub(super) fn on_hit(
    entity: &mut Entity,
    amount: i32,
    spawns: &mut Vec<SpawnRequest>,
    events: &mut Vec<SimEvent>,
) {
    let pos = entity.pos;
    let Behavior::Character(ch) = &mut entity.behavior else {
        return;
    };
    if matches!(ch.state, CharState::Die | CharState::Dead) {
        return;
    }

    ch.hp -= amount;
    if ch.hp > 0 {
        ch.enter(CharState::Hit);
    } else {
        ch.enter(CharState::Die);
        entity.solid = false;
        entity.collider = false;
    }

    events.push(SimEvent::PlaySound { name: "hit.ogg" });
    spawns.push(SpawnRequest {
        class: EntityClass::Label,
        pos,
        dir: None,
        owner: None,
        text: Some(format!("-{amount}")),
    });
}

pub(super) fn render(entity: &Entity, screen: GridPos, surface: &mut dyn Surface) {
    let Behavior::Character(ch) = &entity.behavior else {
        return;
    };
    let (start, count) = sprite_span(ch.state);
    let frame = start + (ch.frame as u16).min(count.saturating_sub(1));
    surface.draw_sprite("character.png", screen, entity.facing, frame, 1.0);
}
