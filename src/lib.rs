//! Snowfield - isometric snowball-fight simulation core

pub mod core;
pub mod entity;
pub mod iso;
pub mod nav;
pub mod render;
pub mod sim;
pub mod terrain;
