//! World state, the tick loop, and host input translation

pub mod input;
pub mod tick;
pub mod world;

pub use input::{HostRequest, InputEvent, Key, PointerButton};
pub use tick::SimEvent;
pub use world::World;
