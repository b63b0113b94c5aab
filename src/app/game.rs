use bevy::prelude::*;

use crate::core::components::Ball;
use crate::core::level::LevelQueue;
use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::gameplay::arena::ArenaPlugin;
use crate::gameplay::spawn::BallSpawnPlugin;
use crate::physics::clustering::cluster::{GroupDebugPlugin, Groups, MatchPassPlugin};
use crate::physics::setup::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (PrePhysicsSet, PostPhysicsAdjustSet.after(PrePhysicsSet)),
        )
        .add_plugins((
            CameraPlugin,
            PhysicsSetupPlugin,
            ArenaPlugin,
            BallSpawnPlugin,
            MatchPassPlugin,
            GroupDebugPlugin,
        ))
        .add_systems(Update, log_entity_counts);
    }
}

fn log_entity_counts(
    time: Res<Time>,
    mut timer: Local<f32>,
    q_balls: Query<(), With<Ball>>,
    groups: Res<Groups>,
    queue: Res<LevelQueue>,
) {
    *timer += time.delta_secs();
    if *timer > 1.0 {
        *timer = 0.0;
        info!(
            "balls={} groups={} next={:?}",
            q_balls.iter().count(),
            groups.0.len(),
            queue.preview()
        );
    }
}
