//! World state: terrain, projection, and the entity roster

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::WorldConfig;
use crate::core::types::{EntityId, GridPos};
use crate::entity::{self, Behavior, Entity, EntityClass, SpawnRequest};
use crate::iso::IsoProjection;
use crate::nav;
use crate::terrain::TerrainGenerator;

/// Default render target size before the host reports a real one
const DEFAULT_VIEWPORT: GridPos = GridPos::new(800, 600);

/// The simulation world
///
/// Owns everything the tick loop touches. Entity ids are allocated from a
/// monotonic counter and never reused.
pub struct World {
    pub config: WorldConfig,
    pub terrain: TerrainGenerator,
    pub iso: IsoProjection,
    pub entities: Vec<Entity>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) player: Option<EntityId>,
    next_entity_id: u32,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        let terrain = TerrainGenerator::new(&config);
        let iso = IsoProjection::new(config.tile_pixels, DEFAULT_VIEWPORT);
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        tracing::info!("world created (seed {})", config.seed);
        Self {
            config,
            terrain,
            iso,
            entities: Vec::new(),
            rng,
            player: None,
            next_entity_id: 0,
        }
    }

    /// Spawn an entity of `class` at `pos` with class-default state
    pub fn spawn(&mut self, class: EntityClass, pos: Vec2) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.push(Entity::new(id, class, pos, &self.config));
        id
    }

    /// Spawn a floating text label at `pos`
    pub fn spawn_label(&mut self, pos: Vec2, text: impl Into<String>) -> EntityId {
        self.spawn_from_request(SpawnRequest {
            class: EntityClass::Label,
            pos,
            dir: None,
            owner: None,
            text: Some(text.into()),
        })
    }

    /// Spawn from a deferred request, applying its direction/owner/text
    pub(crate) fn spawn_from_request(&mut self, req: SpawnRequest) -> EntityId {
        let id = self.spawn(req.class, req.pos);
        if let Some(e) = self.entities.last_mut() {
            if let Some(dir) = req.dir {
                e.set_direction(dir);
            }
            e.owner = req.owner;
            if let (Behavior::Label(label), Some(text)) = (&mut e.behavior, req.text) {
                label.text = text;
            }
        }
        id
    }

    /// Spawn the camera, cursor, player, and the AI opposition; returns the
    /// player's id
    pub fn spawn_default_scene(&mut self) -> EntityId {
        self.spawn(EntityClass::Camera, Vec2::ZERO);
        self.spawn(EntityClass::Cursor, Vec2::ZERO);

        let player = self.spawn(EntityClass::Character, Vec2::new(0.0, 6.0));
        self.player = Some(player);

        for (x, y) in [(-3.0, -5.0), (-1.0, -6.0), (0.0, -7.0), (1.0, -6.0), (3.0, -5.0)] {
            self.spawn(EntityClass::CharacterAi, Vec2::new(x, y));
        }
        player
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn set_player(&mut self, id: EntityId) {
        self.player = Some(id);
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Ids of all entities within Euclidean `radius` of `pos`
    pub fn objects_in_radius(&self, pos: Vec2, radius: f32) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| (e.pos - pos).length() < radius)
            .map(|e| e.id)
            .collect()
    }

    /// Whether entities can occupy the cell
    pub fn is_passable(&mut self, pos: GridPos) -> bool {
        self.terrain.is_passable(pos)
    }

    /// Plan a path over the terrain; see [`nav::build_path`]
    pub fn build_path(&mut self, from: Vec2, to: Vec2) -> Vec<Vec2> {
        nav::build_path(&mut self.terrain, from, to, self.config.path_node_cap)
    }

    /// Line-of-sight test over the terrain; see [`nav::check_visible`]
    pub fn check_visible(&mut self, from: Vec2, to: Vec2) -> bool {
        nav::check_visible(&mut self.terrain, from, to)
    }

    /// Order a character to walk to `goal`
    pub fn command_walk(&mut self, id: EntityId, goal: Vec2) {
        let Some(idx) = self.entities.iter().position(|e| e.id == id) else {
            return;
        };
        let Self {
            entities,
            terrain,
            config,
            ..
        } = self;
        entity::character::walk_to(&mut entities[idx], goal, terrain, config);
    }

    /// Order a character to throw a snowball toward `target`
    pub fn command_throw(&mut self, id: EntityId, target: Vec2) {
        if let Some(e) = self.entity_mut(id) {
            entity::character::throw_at(e, target);
        }
    }
}
