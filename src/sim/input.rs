//! Host input handling
//!
//! The host (window shell, test driver) feeds pointer and key events in
//! screen pixels; the world translates them through the projection and
//! turns them into entity commands. Requests the core cannot satisfy
//! itself, like opening a menu, bubble back to the host.

use crate::core::types::GridPos;
use crate::entity::EntityClass;
use crate::sim::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    F11,
}

/// Input event in screen pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerMoved(GridPos),
    PointerUp { pos: GridPos, button: PointerButton },
    KeyDown(Key),
    Resized(GridPos),
}

/// Action the host must perform on the core's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    OpenMenu,
    ToggleFullscreen,
}

impl World {
    /// Translate a host input event into world commands
    pub fn handle_input(&mut self, event: InputEvent) -> Option<HostRequest> {
        match event {
            InputEvent::PointerMoved(screen) => {
                let world = self.iso.screen_to_world(screen);
                let cell = GridPos::round(world).to_vec2();
                if let Some(cursor) = self
                    .entities
                    .iter_mut()
                    .find(|e| e.class == EntityClass::Cursor)
                {
                    cursor.pos = cell;
                }
                None
            }
            InputEvent::PointerUp { pos, button } => {
                let world = self.iso.screen_to_world(pos);
                if let Some(player) = self.player {
                    match button {
                        PointerButton::Left => self.command_walk(player, world),
                        PointerButton::Right => self.command_throw(player, world),
                    }
                }
                None
            }
            InputEvent::KeyDown(Key::Escape) => Some(HostRequest::OpenMenu),
            InputEvent::KeyDown(Key::F11) => Some(HostRequest::ToggleFullscreen),
            InputEvent::Resized(size) => {
                tracing::debug!("viewport resized to {}x{}", size.x, size.y);
                self.iso.viewport = size;
                None
            }
        }
    }
}
