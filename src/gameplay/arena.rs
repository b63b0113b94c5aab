use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

/// 12-unit viewport grid used to proportion the arena walls.
pub fn span(extent: f32, n: f32) -> f32 {
    n * extent / 12.0
}

const WALL_NAME: [&str; 4] = ["WallLeft", "WallRight", "WallTop", "WallBottom"];

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_arena);
    }
}

/// Spawns the four static boundary bodies with simple visual quads. Side
/// columns run the full height, top/bottom bars the full width, each half a
/// grid unit thick.
fn spawn_arena(mut commands: Commands, cfg: Res<GameConfig>) {
    let half_w = cfg.window.width * 0.5;
    let half_h = cfg.window.height * 0.5;
    let thick_x = span(cfg.window.width, 0.25);
    let thick_y = span(cfg.window.height, 0.25);
    let wall_color = Color::srgba(0.25, 0.45, 0.70, 0.45);

    // (position, half extents); centers sit on the window edges so half of
    // each wall intrudes into the playfield.
    let walls = [
        (Vec2::new(-half_w, 0.0), Vec2::new(thick_x, half_h)),
        (Vec2::new(half_w, 0.0), Vec2::new(thick_x, half_h)),
        (Vec2::new(0.0, half_h), Vec2::new(half_w, thick_y)),
        (Vec2::new(0.0, -half_h), Vec2::new(half_w, thick_y)),
    ];

    for (index, (position, half_extents)) in walls.iter().enumerate() {
        commands
            .spawn((
                Name::new(WALL_NAME[index]),
                RigidBody::Fixed,
                Collider::cuboid(half_extents.x, half_extents.y),
                Transform::from_translation(position.extend(0.0)),
                Visibility::default(),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Sprite {
                        color: wall_color,
                        custom_size: Some(*half_extents * 2.0),
                        ..Default::default()
                    },
                    Transform::from_translation(Vec3::new(0.0, 0.0, 0.1)),
                ));
            });
    }
}

/// Inner face of the side walls; spawn placement stays inside this.
pub fn inner_half_width(cfg: &GameConfig) -> f32 {
    cfg.window.width * 0.5 - span(cfg.window.width, 0.25)
}

/// Inner face of the top bar; balls enter below it.
pub fn inner_top(cfg: &GameConfig) -> f32 {
    cfg.window.height * 0.5 - span(cfg.window.height, 0.25)
}
