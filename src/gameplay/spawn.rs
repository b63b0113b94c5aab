use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use crate::core::components::{Ball, BallLevel, BallRadius};
use crate::core::config::GameConfig;
use crate::core::level::{LevelQueue, LevelRng, LevelTable};
use crate::core::system::system_order::PrePhysicsSet;
use crate::gameplay::arena::{inner_half_width, inner_top};

pub struct BallSpawnPlugin;

impl Plugin for BallSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_ball_visuals, spawn_initial_balls).chain(),
        )
        .add_systems(Update, drop_next_ball.in_set(PrePhysicsSet));
    }
}

/// Shared unit circle mesh scaled per ball.
#[derive(Resource, Deref, DerefMut, Clone)]
pub struct CircleMesh(pub Handle<Mesh>);

/// Per-level color materials, index-aligned with the level table.
#[derive(Resource)]
pub struct LevelDisplayMaterials(pub Vec<Handle<ColorMaterial>>);

#[derive(Resource, Deref, DerefMut)]
struct DropTimer(Timer);

fn setup_ball_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    table: Res<LevelTable>,
    cfg: Res<GameConfig>,
) {
    let mut handles = Vec::with_capacity(table.len());
    for def in table.iter() {
        handles.push(materials.add(def.color));
    }
    commands.insert_resource(LevelDisplayMaterials(handles));
    commands.insert_resource(CircleMesh(meshes.add(Circle::new(0.5))));
    commands.insert_resource(DropTimer(Timer::from_seconds(
        cfg.spawn.drop_interval,
        TimerMode::Repeating,
    )));
}

/// Drops the whole starting population near the top of the arena. Every spawn
/// takes its level from the queue, in spawn order.
fn spawn_initial_balls(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    table: Res<LevelTable>,
    mut queue: ResMut<LevelQueue>,
    mut rng: ResMut<LevelRng>,
    circle: Res<CircleMesh>,
    materials: Res<LevelDisplayMaterials>,
) {
    let inner_x = inner_half_width(&cfg);
    let top = inner_top(&cfg);
    for _ in 0..cfg.spawn.initial_count {
        let level = queue.take_next(&mut rng.0);
        let Some(def) = table.get(level) else {
            continue;
        };
        let radius = def.radius;
        let x = rng.0.gen_range(-inner_x + radius..inner_x - radius);
        let y = top - radius - rng.0.gen_range(0.0..50.0);
        spawn_ball(
            &mut commands,
            &cfg,
            &circle,
            &materials,
            Vec2::new(x, y),
            radius,
            level,
        );
    }
}

/// Periodic dropper: one ball per timer firing, entering just below the top
/// bar at a random horizontal position.
fn drop_next_ball(
    mut commands: Commands,
    time: Res<Time>,
    timer: Option<ResMut<DropTimer>>,
    cfg: Res<GameConfig>,
    table: Res<LevelTable>,
    mut queue: ResMut<LevelQueue>,
    mut rng: ResMut<LevelRng>,
    circle: Option<Res<CircleMesh>>,
    materials: Option<Res<LevelDisplayMaterials>>,
) {
    let (Some(mut timer), Some(circle), Some(materials)) = (timer, circle, materials) else {
        return;
    };
    timer.tick(time.delta());
    if !timer.finished() {
        return;
    }

    let level = queue.take_next(&mut rng.0);
    let Some(def) = table.get(level) else {
        return;
    };
    let radius = def.radius;
    let inner_x = inner_half_width(&cfg);
    let x = rng.0.gen_range(-inner_x + radius..inner_x - radius);
    let y = inner_top(&cfg) - radius - 5.0;
    spawn_ball(
        &mut commands,
        &cfg,
        &circle,
        &materials,
        Vec2::new(x, y),
        radius,
        level,
    );
}

fn spawn_ball(
    commands: &mut Commands,
    cfg: &GameConfig,
    circle: &CircleMesh,
    materials: &LevelDisplayMaterials,
    position: Vec2,
    radius: f32,
    level: usize,
) {
    let physics = &cfg.ball_physics;
    commands
        .spawn((
            Transform::from_translation(position.extend(0.0)),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::ball(radius),
            Restitution::coefficient(physics.restitution),
            Friction::coefficient(physics.friction),
            Damping {
                linear_damping: physics.linear_damping,
                angular_damping: 0.0,
            },
            ColliderMassProperties::Density(physics.density),
            Ball,
            BallRadius(radius),
            BallLevel(level),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh2d(circle.0.clone()),
                MeshMaterial2d(materials.0[level].clone()),
                Transform::from_scale(Vec3::splat(radius * 2.0)),
            ));
        });
}
