//! Entities and their behavior state machines
//!
//! Every live object in the world is an `Entity` record with a tagged
//! `Behavior` union; update/collision/hit dispatch is a match over the
//! variant. Solidity (blocks movement) and collider (receives collision
//! notifications) are independent flags.

pub mod character;
pub mod label;
pub mod snowball;

use glam::Vec2;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::types::{EntityId, GridPos};
use crate::render::Surface;
use crate::sim::tick::SimEvent;
use crate::terrain::{TerrainGenerator, TILE_LAYERS};

pub use character::{Character, CharState};
pub use label::Label;
pub use snowball::{Snowball, SnowballPhase};

/// Spawnable entity classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    Character,
    /// Character driven by the built-in AI
    CharacterAi,
    Snowball,
    Label,
    Cursor,
    Camera,
    /// A character that finished dying; inert scenery
    Corpse,
}

impl EntityClass {
    /// True for classes a projectile can hurt / an AI can target
    pub fn is_character(self) -> bool {
        matches!(self, EntityClass::Character | EntityClass::CharacterAi)
    }
}

/// Behavior-specific state, the tagged union behind entity dispatch
#[derive(Debug, Clone)]
pub enum Behavior {
    Character(Character),
    Snowball(Snowball),
    Label(Label),
    Cursor,
    Camera,
}

/// Read-only view of another entity, snapshotted for AI queries and passed
/// into collision notifications
#[derive(Debug, Clone, Copy)]
pub struct EntityView {
    pub id: EntityId,
    pub class: EntityClass,
    pub pos: Vec2,
}

/// Deferred spawn emitted from inside an update (applied after the pass)
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub class: EntityClass,
    pub pos: Vec2,
    pub dir: Option<Vec2>,
    pub owner: Option<EntityId>,
    pub text: Option<String>,
}

/// World services available to an entity's per-tick update
pub struct UpdateCtx<'a> {
    pub terrain: &'a mut TerrainGenerator,
    pub config: &'a WorldConfig,
    pub rng: &'a mut ChaCha8Rng,
    /// Snapshot of all entities at tick start (AI target queries)
    pub others: &'a [EntityView],
    pub spawns: &'a mut Vec<SpawnRequest>,
    pub events: &'a mut Vec<SimEvent>,
}

/// Quantize a direction vector to one of the 8 sprite-sheet facing rows
///
/// Thresholds are tan(22.5 deg) and tan(67.5 deg), matching the original
/// art's row layout.
pub fn facing_from_dir(dir: Vec2) -> u8 {
    const TAN_67_5: f32 = 2.414_213_6;
    const TAN_22_5: f32 = 0.414_213_57;

    let a = if dir.x != 0.0 {
        dir.y / dir.x
    } else if dir.y > 0.0 {
        999.0
    } else {
        -999.0
    };

    if a > TAN_67_5 {
        if dir.x < 0.0 {
            4
        } else {
            0
        }
    } else if a > TAN_22_5 {
        if dir.x < 0.0 {
            5
        } else {
            1
        }
    } else if a > -TAN_22_5 {
        if dir.x < 0.0 {
            6
        } else {
            2
        }
    } else if a > -TAN_67_5 {
        if dir.x < 0.0 {
            7
        } else {
            3
        }
    } else if dir.x < 0.0 {
        0
    } else {
        4
    }
}

/// One live object in the world
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub class: EntityClass,
    pub pos: Vec2,
    /// Normalized movement/aim direction
    pub dir: Vec2,
    /// Sprite-sheet facing row derived from `dir`
    pub facing: u8,
    /// Paint layer; entities below `TILE_LAYERS` interleave with terrain
    pub z: i32,
    pub alive: bool,
    /// Blocks movement: position reverts on overlap
    pub solid: bool,
    /// Receives collision notifications
    pub collider: bool,
    /// Spawning entity, exempt from this entity's collisions
    pub owner: Option<EntityId>,
    pub behavior: Behavior,
}

impl Entity {
    /// Construct an entity of `class` at `pos` with class-default flags
    pub fn new(id: EntityId, class: EntityClass, pos: Vec2, config: &WorldConfig) -> Self {
        let (behavior, z, solid, collider) = match class {
            EntityClass::Character => (
                Behavior::Character(Character::new(config.character_hp, false)),
                2,
                true,
                true,
            ),
            EntityClass::CharacterAi => (
                Behavior::Character(Character::new(config.character_hp, true)),
                2,
                true,
                true,
            ),
            EntityClass::Snowball => (
                Behavior::Snowball(Snowball::new(config)),
                2,
                false,
                true,
            ),
            EntityClass::Label => (
                Behavior::Label(Label::new(String::new(), config.label_ttl)),
                TILE_LAYERS as i32,
                false,
                false,
            ),
            EntityClass::Cursor => (Behavior::Cursor, 1, false, false),
            EntityClass::Camera => (Behavior::Camera, 2, false, false),
            // corpses are re-tagged in place, not spawned
            EntityClass::Corpse => (
                Behavior::Character(Character::new(0, false)),
                0,
                false,
                false,
            ),
        };

        tracing::debug!("create {:?} (entity #{})", class, id.0);

        Self {
            id,
            class,
            pos,
            dir: Vec2::new(1.0, 0.0),
            facing: 2,
            z,
            alive: true,
            solid,
            collider,
            owner: None,
            behavior,
        }
    }

    /// Point the entity toward a world position
    pub fn look_at(&mut self, target: Vec2) {
        self.set_direction(target - self.pos);
    }

    /// Set movement direction and the matching facing row
    pub fn set_direction(&mut self, dir: Vec2) {
        self.facing = facing_from_dir(dir);
        self.dir = dir.normalize_or_zero();
    }

    /// Per-tick behavior update
    pub fn update(&mut self, dt: f32, ctx: &mut UpdateCtx) {
        match self.behavior {
            Behavior::Character(_) => character::update(self, dt, ctx),
            Behavior::Snowball(_) => snowball::update(self, dt, ctx),
            Behavior::Label(_) => label::update(self, dt),
            Behavior::Cursor | Behavior::Camera => {}
        }
    }

    /// Collision notification; `None` means collision with terrain
    ///
    /// Returns damage to apply to the other party, if any.
    pub fn on_collision(
        &mut self,
        other: Option<&EntityView>,
        config: &WorldConfig,
        events: &mut Vec<SimEvent>,
    ) -> Option<(EntityId, i32)> {
        match self.behavior {
            Behavior::Character(_) => {
                character::on_collision(self, other);
                None
            }
            Behavior::Snowball(_) => snowball::on_collision(self, other, config, events),
            _ => None,
        }
    }

    /// Damage notification
    pub fn on_hit(
        &mut self,
        amount: i32,
        spawns: &mut Vec<SpawnRequest>,
        events: &mut Vec<SimEvent>,
    ) {
        if let Behavior::Character(_) = self.behavior {
            character::on_hit(self, amount, spawns, events);
        }
    }

    /// Emit draw commands for this entity at its projected screen position
    pub fn render(&self, screen: GridPos, surface: &mut dyn Surface) {
        match &self.behavior {
            Behavior::Character(_) => character::render(self, screen, surface),
            Behavior::Snowball(_) => snowball::render(self, screen, surface),
            Behavior::Label(_) => label::render(self, screen, surface),
            Behavior::Cursor => {
                let points = [
                    GridPos::new(screen.x, screen.y + 16),
                    GridPos::new(screen.x - 32, screen.y),
                    GridPos::new(screen.x, screen.y - 16),
                    GridPos::new(screen.x + 32, screen.y),
                    GridPos::new(screen.x, screen.y + 16),
                ];
                surface.draw_lines(&points, 0x80ff80ff);
            }
            Behavior::Camera => {}
        }
    }
}
