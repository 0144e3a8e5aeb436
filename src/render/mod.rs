//! Back-to-front isometric render pass
//!
//! The world does not draw pixels itself; it emits draw commands to a host
//! `Surface`. The pass walks the visible diamond row by row per tile layer,
//! painting far diagonals before near ones, and interleaves entities into
//! the diagonal their position rounds to so a character behind a tree is
//! occluded by it. Entities with a layer at or above the tile layers render
//! on top of everything.

use glam::Vec2;

use crate::core::types::GridPos;
use crate::entity::EntityClass;
use crate::sim::world::World;
use crate::terrain::{SPRITE_TREE, TILE_LAYERS};

/// Pixel overscan past the viewport so tall edge sprites still draw; sized
/// to the tallest sheet (trees)
const OVERSCAN: GridPos = GridPos::new(64, 160);

/// Host-provided draw target
///
/// `row`/`frame` address a cell in the named sprite sheet; positions are
/// screen pixels.
pub trait Surface {
    fn draw_sprite(&mut self, sheet: &str, pos: GridPos, row: u8, frame: u16, scale: f32);
    fn draw_text(&mut self, text: &str, pos: GridPos, scale: f32);
    fn draw_lines(&mut self, points: &[GridPos], rgba: u32);
}

/// Sheet and frame for a terrain sprite id
fn tile_sprite(id: u16) -> (&'static str, u16) {
    if id == SPRITE_TREE {
        ("trees.png", 0)
    } else {
        ("tiles.png", id)
    }
}

impl World {
    /// Emit one frame of draw commands to `surface`
    pub fn render(&mut self, surface: &mut dyn Surface) {
        let Self {
            entities,
            terrain,
            iso,
            ..
        } = self;

        let lt = iso.screen_to_world(-OVERSCAN);
        let rb = iso.screen_to_world(iso.viewport + OVERSCAN);
        let lt = Vec2::new(lt.x.floor(), lt.y.floor());
        let rb = Vec2::new(rb.x.ceil(), rb.y.ceil());

        // diamond extents: cx tiles along each (1,-1) row, cy rows
        let cx = ((rb.x - rb.y - lt.x + lt.y + 1.0) / 2.0 + 1.0).ceil() as i32;
        let cy = (rb.x + rb.y - lt.x - lt.y + 1.0).ceil() as i32;

        for z in 0..TILE_LAYERS as i32 {
            let mut pos = lt;

            for a in 0..cy {
                for _ in 0..cx {
                    let layer = terrain.tile(GridPos::new(pos.x as i32, pos.y as i32)).layers
                        [z as usize];
                    if let Some(id) = layer {
                        let (sheet, frame) = tile_sprite(id);
                        surface.draw_sprite(sheet, iso.world_to_screen(pos), 0, frame, 1.0);
                    }
                    pos += Vec2::new(1.0, -1.0);
                }

                // entities on this layer whose position rounds onto the
                // diagonal just painted
                let diagonal = (pos.x + pos.y) as i32;
                for e in entities.iter() {
                    if e.z == z
                        && e.class != EntityClass::Cursor
                        && (e.pos.x + e.pos.y).round() as i32 == diagonal
                    {
                        e.render(iso.world_to_screen(e.pos), surface);
                    }
                }

                pos += Vec2::new(-cx as f32, cx as f32);
                pos += if a % 2 == 1 {
                    Vec2::new(1.0, 0.0)
                } else {
                    Vec2::new(0.0, 1.0)
                };
            }

            // the cursor marker sits on top of its whole layer, not inside
            // the diagonal it happens to round to
            if z == 1 {
                for e in entities.iter().filter(|e| e.class == EntityClass::Cursor) {
                    e.render(iso.world_to_screen(e.pos), surface);
                }
            }
        }

        // overlay layer: labels and anything else above the tile stack
        for e in entities.iter() {
            if e.z >= TILE_LAYERS as i32 {
                e.render(iso.world_to_screen(e.pos), surface);
            }
        }
    }
}

/// Surface that records draw commands instead of rasterizing
///
/// Used by headless tests and useful for dumping a frame when debugging
/// paint order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        sheet: String,
        pos: GridPos,
        row: u8,
        frame: u16,
        scale: f32,
    },
    Text {
        text: String,
        pos: GridPos,
        scale: f32,
    },
    Lines {
        points: Vec<GridPos>,
        rgba: u32,
    },
}

impl Surface for RecordingSurface {
    fn draw_sprite(&mut self, sheet: &str, pos: GridPos, row: u8, frame: u16, scale: f32) {
        self.commands.push(DrawCommand::Sprite {
            sheet: sheet.to_owned(),
            pos,
            row,
            frame,
            scale,
        });
    }

    fn draw_text(&mut self, text: &str, pos: GridPos, scale: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            scale,
        });
    }

    fn draw_lines(&mut self, points: &[GridPos], rgba: u32) {
        self.commands.push(DrawCommand::Lines {
            points: points.to_vec(),
            rgba,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WorldConfig;
    use crate::entity::EntityClass;

    fn world() -> World {
        let mut w = World::new(WorldConfig::default());
        // small viewport keeps the command list manageable
        w.iso.viewport = GridPos::new(256, 192);
        w
    }

    #[test]
    fn test_ground_fills_the_viewport() {
        let mut w = world();
        let mut surface = RecordingSurface::default();
        w.render(&mut surface);

        let ground = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { sheet, frame, .. }
                if sheet == "tiles.png" && *frame == 0))
            .count();
        assert!(ground > 0, "no ground tiles drawn");
    }

    #[test]
    fn test_character_drawn_between_tile_layers() {
        let mut w = world();
        w.spawn(EntityClass::Character, Vec2::ZERO);
        let mut surface = RecordingSurface::default();
        w.render(&mut surface);

        let char_idx = surface
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Sprite { sheet, .. } if sheet == "character.png"))
            .expect("character not drawn");
        let first_ground = surface
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Sprite { sheet, .. } if sheet == "tiles.png"))
            .unwrap();
        assert!(char_idx > first_ground);
    }

    #[test]
    fn test_cursor_draws_marker_lines() {
        let mut w = world();
        w.spawn(EntityClass::Cursor, Vec2::ZERO);
        let mut surface = RecordingSurface::default();
        w.render(&mut surface);
        assert!(surface
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Lines { rgba: 0x80ff80ff, .. })));
    }

    #[test]
    fn test_cursor_marker_tops_its_layer() {
        let mut w = world();
        w.spawn(EntityClass::Cursor, Vec2::ZERO);
        // park another entity on the cursor's layer, on a later diagonal
        let ball = w.spawn(EntityClass::Snowball, Vec2::new(2.0, 2.0));
        w.entity_mut(ball).unwrap().z = 1;

        let mut surface = RecordingSurface::default();
        w.render(&mut surface);

        let marker_idx = surface
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Lines { .. }))
            .expect("marker not drawn");
        let ball_idx = surface
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Sprite { sheet, .. } if sheet == "snowball.png"))
            .expect("snowball not drawn");
        assert!(marker_idx > ball_idx);
    }

    #[test]
    fn test_label_renders_after_everything() {
        let mut w = world();
        w.spawn(EntityClass::Character, Vec2::ZERO);
        w.spawn_label(Vec2::ZERO, "-25");
        let mut surface = RecordingSurface::default();
        w.render(&mut surface);

        let text_idx = surface
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { .. }))
            .expect("label not drawn");
        assert_eq!(text_idx, surface.commands.len() - 1);
    }

    #[test]
    fn test_entity_far_outside_view_not_drawn()  {
        let mut w = world();
        w.spawn(EntityClass::Character, Vec2::new(500.0, 500.0));
        let mut surface = RecordingSurface::default();
        w.render(&mut surface);
        assert!(!surface
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Sprite { sheet, .. } if sheet == "character.png")));
    }
}
