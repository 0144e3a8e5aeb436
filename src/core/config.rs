//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Values deserialize from TOML so a
//! host can override them without recompiling.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SnowfieldError};

/// Configuration for the world simulation
///
/// The defaults reproduce the original game's tuning; `validate()` guards
/// the relationships the algorithms rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === TERRAIN ===
    /// World seed driving every terrain hash
    ///
    /// Two worlds with the same seed generate bit-identical terrain; the
    /// seed never changes after construction.
    pub seed: u64,

    /// Denominator of the wall-vertex noise: a vertex is "high" when its
    /// hash is non-zero modulo this value, so larger numbers mean denser
    /// walls (5 of 6 raw vertices are high before 3x3 smoothing)
    pub wall_density: u64,

    /// Denominator of the decoration noise: an open tile sprouts a tree
    /// when its hash is zero modulo this value (1 in 40)
    pub decoration_density: u64,

    /// Half-extent of the forced-flat region around the origin
    ///
    /// Every cell with |x| and |y| inside this radius is passable for any
    /// seed, guaranteeing a safe spawn area.
    pub flat_radius: i32,

    // === PROJECTION ===
    /// Pixel width of one tile in the 2:1 isometric projection
    pub tile_pixels: i32,

    // === PATHFINDING ===
    /// Frontier cap for A*: the search aborts into nearest-node fallback
    /// once the open queue reaches this many entries, bounding latency on
    /// unreachable goals
    pub path_node_cap: usize,

    // === ENTITIES ===
    /// Character walk speed in cells per second
    pub walk_speed: f32,

    /// Character starting hit points
    pub character_hp: i32,

    /// Distance below which a path waypoint counts as reached
    pub waypoint_epsilon: f32,

    /// Animation playback rate in frames per second
    pub anim_fps: f32,

    /// Projectile flight speed in cells per second
    pub snowball_speed: f32,

    /// Projectile lifetime in seconds before it bursts on its own
    pub snowball_ttl: f32,

    /// Damage applied by a projectile burst
    pub snowball_damage: i32,

    /// Apex of the projectile's rendered height arc, in pixels
    pub snowball_height: f32,

    /// Floating label lifetime in seconds (ages at half wall-clock rate)
    pub label_ttl: f32,

    // === AI ===
    /// Mean decisions per second for an idle AI character
    ///
    /// Each idle tick rolls `ai_decision_rate * dt`, so the value is a
    /// Poisson-style rate rather than a per-tick probability.
    pub ai_decision_rate: f32,

    /// Radius in cells within which an AI picks targets
    pub ai_radius: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            wall_density: 6,
            decoration_density: 40,
            flat_radius: 8,

            tile_pixels: 64,

            path_node_cap: 50,

            walk_speed: 2.0,
            character_hp: 100,
            waypoint_epsilon: 0.1,
            anim_fps: 8.0,
            snowball_speed: 16.0,
            snowball_ttl: 1.0,
            snowball_damage: 25,
            snowball_height: 64.0,
            label_ttl: 1.0,

            ai_decision_rate: 0.5,
            ai_radius: 10.0,
        }
    }
}

impl WorldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML, falling back to defaults for absent keys
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: WorldConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.wall_density < 2 {
            return Err(SnowfieldError::InvalidConfig(
                "wall_density must be at least 2 (1 would make every vertex low)".into(),
            ));
        }
        if self.decoration_density == 0 {
            return Err(SnowfieldError::InvalidConfig(
                "decoration_density must be non-zero".into(),
            ));
        }
        if self.flat_radius < 1 {
            return Err(SnowfieldError::InvalidConfig(
                "flat_radius must be positive so spawns have open ground".into(),
            ));
        }
        if self.tile_pixels <= 0 || self.tile_pixels % 4 != 0 {
            return Err(SnowfieldError::InvalidConfig(format!(
                "tile_pixels ({}) must be a positive multiple of 4 for an exact 2:1 inverse",
                self.tile_pixels
            )));
        }
        if self.path_node_cap < 2 {
            return Err(SnowfieldError::InvalidConfig(
                "path_node_cap must allow at least the start node and one expansion".into(),
            ));
        }
        if self.walk_speed <= 0.0 || self.snowball_speed <= 0.0 {
            return Err(SnowfieldError::InvalidConfig(
                "movement speeds must be positive".into(),
            ));
        }
        if self.waypoint_epsilon <= 0.0 {
            return Err(SnowfieldError::InvalidConfig(
                "waypoint_epsilon must be positive or walkers never consume waypoints".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_toml_overrides() {
        let config = WorldConfig::from_toml_str(
            r#"
            seed = 1234
            walk_speed = 3.5
            path_node_cap = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 1234);
        assert_eq!(config.walk_speed, 3.5);
        assert_eq!(config.path_node_cap, 100);
        // untouched keys keep their defaults
        assert_eq!(config.snowball_damage, 25);
    }

    #[test]
    fn test_rejects_zero_epsilon() {
        let result = WorldConfig::from_toml_str("waypoint_epsilon = 0.0");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_odd_tile_pixels() {
        let result = WorldConfig::from_toml_str("tile_pixels = 30");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(WorldConfig::from_toml_str("walk_speed = []").is_err());
    }
}
