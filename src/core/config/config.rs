use serde::Deserialize;
use std::{fs, path::Path};

use bevy::prelude::*;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 960.0,
            title: "Merge Drop".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    pub y: f32,
}
impl Default for GravityConfig {
    fn default() -> Self {
        Self { y: -600.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LevelsConfig {
    /// Number of size tiers in the level table.
    pub count: usize,
    /// Squared radius of the smallest tier; each tier doubles it.
    pub base_size: f32,
}
impl Default for LevelsConfig {
    fn default() -> Self {
        // base_size matches a quarter of the default window height.
        Self {
            count: 10,
            base_size: 240.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Balls dropped into the arena at startup.
    pub initial_count: usize,
    /// Seconds between periodic drops once running.
    pub drop_interval: f32,
    /// Fixed RNG seed for deterministic runs; omit for entropy seeding.
    pub seed: Option<u64>,
}
impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_count: 200,
            drop_interval: 0.8,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BallPhysicsConfig {
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub density: f32,
}
impl Default for BallPhysicsConfig {
    fn default() -> Self {
        Self {
            restitution: 0.1,
            friction: 1.0,
            linear_damping: 0.03,
            density: 0.001,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MatchingConfig {
    /// Seconds between match passes; independent of the physics tick rate.
    pub interval: f32,
    /// Center distance multiplier linking two same-level balls. Slightly above
    /// 2.0 so solver jitter cannot break visually touching pairs apart.
    pub link_factor: f32,
    /// Exact group size that triggers removal. Groups above or below survive.
    pub match_count: usize,
}
impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            interval: 1.0,
            link_factor: 2.01,
            match_count: 5,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub gravity: GravityConfig,
    pub levels: LevelsConfig,
    pub spawn: SpawnConfig,
    pub ball_physics: BallPhysicsConfig,
    pub matching: MatchingConfig,
    pub rapier_debug: bool,
    pub draw_group_bounds: bool,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            gravity: Default::default(),
            levels: Default::default(),
            spawn: Default::default(),
            ball_physics: Default::default(),
            matching: Default::default(),
            rapier_debug: false,
            draw_group_bounds: false,
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Validate the configuration returning a list of human-readable warning
    /// strings. Suspicious values only; the hard rejections (level table too
    /// small for the spawn draw range) live in `LevelTable` / `LevelQueue`
    /// construction and abort startup.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.gravity.y.abs() < 1e-3 {
            w.push("gravity.y magnitude near zero; balls will not fall".into());
        }
        if self.levels.count / 4 == 0 {
            w.push(format!(
                "levels.count {} leaves the spawn draw range empty (needs >= 4)",
                self.levels.count
            ));
        }
        if self.levels.base_size <= 0.0 {
            w.push("levels.base_size must be > 0".into());
        }
        if self.spawn.initial_count == 0 {
            w.push("spawn.initial_count is 0; the arena starts empty".into());
        }
        if self.spawn.drop_interval <= 0.0 {
            w.push("spawn.drop_interval must be > 0".into());
        }
        if !(0.0..=1.0).contains(&self.ball_physics.restitution) {
            w.push("ball_physics.restitution outside [0, 1]".into());
        }
        if self.ball_physics.friction < 0.0 {
            w.push("ball_physics.friction negative".into());
        }
        if self.ball_physics.linear_damping < 0.0 {
            w.push("ball_physics.linear_damping negative".into());
        }
        if self.ball_physics.density <= 0.0 {
            w.push("ball_physics.density must be > 0".into());
        }
        if self.matching.interval <= 0.0 {
            w.push("matching.interval must be > 0".into());
        }
        if self.matching.link_factor < 2.0 {
            w.push("matching.link_factor below 2.0; touching balls may fail to link".into());
        }
        if self.matching.match_count == 0 {
            w.push("matching.match_count is 0; no group can ever match".into());
        }
        w
    }
}
