//! Snowball projectile: straight flight, then an explosion burst
//!
//! Flies along its spawn direction until it hits something or its fuse runs
//! out. Collisions with the thrower are ignored so the ball clears its own
//! spawn cell.

use crate::core::config::WorldConfig;
use crate::core::types::{EntityId, GridPos};
use crate::render::Surface;
use crate::sim::tick::SimEvent;

use super::{Behavior, Entity, EntityView, UpdateCtx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnowballPhase {
    Flight,
    Explode,
}

/// Explosion animation span in the sheet; frame 0 is the shadow
const EXPLODE_START: u16 = 1;
const EXPLODE_FRAMES: u16 = 8;

#[derive(Debug, Clone)]
pub struct Snowball {
    pub phase: SnowballPhase,
    pub frame: f32,
    /// Remaining flight time in seconds
    pub ttl: f32,
    /// Pixels above the ground the ball is drawn at
    pub height: f32,
}

impl Snowball {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            phase: SnowballPhase::Flight,
            frame: 0.0,
            ttl: config.snowball_ttl,
            height: config.snowball_height,
        }
    }
}

pub(super) fn update(entity: &mut Entity, dt: f32, ctx: &mut UpdateCtx) {
    let Behavior::Snowball(ball) = &mut entity.behavior else {
        return;
    };

    match ball.phase {
        SnowballPhase::Flight => {
            entity.pos += entity.dir * ctx.config.snowball_speed * dt;
            ball.ttl -= dt;
            // fizzle: no sound, no damage
            if ball.ttl < 0.0 {
                ball.phase = SnowballPhase::Explode;
                ball.frame = 0.0;
                entity.collider = false;
            }
        }
        SnowballPhase::Explode => {
            ball.frame += ctx.config.anim_fps * dt;
            if ball.frame >= EXPLODE_FRAMES as f32 {
                entity.alive = false;
            }
        }
    }
}

pub(super) fn on_collision(
    entity: &mut Entity,
    other: Option<&EntityView>,
    config: &WorldConfig,
    events: &mut Vec<SimEvent>,
) -> Option<(EntityId, i32)> {
    let owner = entity.owner;
    let Behavior::Snowball(ball) = &mut entity.behavior else {
        return None;
    };
    if ball.phase != SnowballPhase::Flight {
        return None;
    }
    // pass through the thrower
    if let Some(view) = other {
        if owner == Some(view.id) {
            return None;
        }
    }

    ball.phase = SnowballPhase::Explode;
    ball.frame = 0.0;
    entity.collider = false;
    events.push(SimEvent::PlaySound { name: "hit.ogg" });

    other.map(|view| (view.id, config.snowball_damage))
}

pub(super) fn render(entity: &Entity, screen: GridPos, surface: &mut dyn Surface) {
    let Behavior::Snowball(ball) = &entity.behavior else {
        return;
    };
    match ball.phase {
        SnowballPhase::Flight => {
            // sheet row 0: frame 0 is the shadow, frame 1 the ball
            surface.draw_sprite("snowball.png", screen, 0, 0, 1.0);
            let lifted = GridPos::new(screen.x, screen.y - ball.height as i32);
            surface.draw_sprite("snowball.png", lifted, 0, 1, 1.0);
        }
        SnowballPhase::Explode => {
            let frame = EXPLODE_START + (ball.frame as u16).min(EXPLODE_FRAMES - 1);
            let lifted = GridPos::new(screen.x, screen.y - ball.height as i32);
            surface.draw_sprite("snowball.png", lifted, 0, frame, 1.0);
        }
    }
}
