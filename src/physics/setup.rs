use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

/// Wrapper registering Rapier and applying the configured gravity.
pub struct PhysicsSetupPlugin;

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))
            .add_systems(PostStartup, configure_gravity);
        if app
            .world()
            .get_resource::<GameConfig>()
            .map(|cfg| cfg.rapier_debug)
            .unwrap_or(false)
        {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

fn configure_gravity(mut contexts: Query<&mut RapierConfiguration>, cfg: Res<GameConfig>) {
    for mut rapier_cfg in contexts.iter_mut() {
        rapier_cfg.gravity = Vec2::new(0.0, cfg.gravity.y);
    }
}
