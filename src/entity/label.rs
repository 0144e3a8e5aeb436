//! Floating damage labels
//!
//! A label drifts upward and grows over its lifetime on an inverse-cubic
//! ease-out, then despawns. Ages at half real time so the pop stays
//! readable.

use crate::core::types::GridPos;
use crate::render::Surface;

use super::{Behavior, Entity};

const AGE_RATE: f32 = 0.5;

/// Base pixel offset above the entity anchor
const BASE_LIFT: i32 = 96;

/// Additional rise over the label's lifetime, in pixels
const RISE: f32 = 32.0;

#[derive(Debug, Clone)]
pub struct Label {
    pub text: String,
    pub age: f32,
    pub ttl: f32,
}

impl Label {
    pub fn new(text: String, ttl: f32) -> Self {
        Self {
            text,
            age: 0.0,
            ttl,
        }
    }

    /// Animation progress in [0, 1], ease-out so motion front-loads
    pub fn ease(&self) -> f32 {
        let t = (self.age / self.ttl).clamp(0.0, 1.0);
        1.0 - (1.0 - t).powi(3)
    }
}

pub(super) fn update(entity: &mut Entity, dt: f32) {
    let Behavior::Label(label) = &mut entity.behavior else {
        return;
    };
    label.age += dt * AGE_RATE;
    if label.age >= label.ttl {
        entity.alive = false;
    }
}

pub(super) fn render(entity: &Entity, screen: GridPos, surface: &mut dyn Surface) {
    let Behavior::Label(label) = &entity.behavior else {
        return;
    };
    let ease = label.ease();
    let pos = GridPos::new(screen.x, screen.y - BASE_LIFT - (RISE * ease) as i32);
    surface.draw_text(&label.text, pos, 0.75 + 0.25 * ease);
}
