pub mod app;
pub mod core;
pub mod gameplay;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::core::components::{Ball, BallLevel, BallRadius};
pub use crate::core::config::GameConfig;
pub use crate::core::level::{build_levels, LevelDef, LevelError, LevelQueue, LevelRng, LevelTable};
pub use crate::physics::clustering::cluster::{
    partition, BallSnapshot, Group, GroupEliminated, Groups, MatchPassPlugin, MatchTimer,
};
