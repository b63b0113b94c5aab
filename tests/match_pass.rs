use std::time::Duration;

use bevy::prelude::*;
use merge_drop::{Ball, BallLevel, BallRadius, GameConfig, GroupEliminated, Groups, MatchPassPlugin};

fn test_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>();
    app.insert_resource(GameConfig::default());
    app.add_plugins(MatchPassPlugin);
    app
}

/// Advance the virtual clock and run one frame. No TimePlugin is installed,
/// so the delta is exactly what the test dictates.
fn advance(app: &mut App, secs: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(secs));
    app.update();
}

fn spawn_ball(app: &mut App, pos: Vec2, radius: f32, level: usize) -> Entity {
    app.world_mut()
        .spawn((
            Ball,
            BallRadius(radius),
            BallLevel(level),
            Transform::from_xyz(pos.x, pos.y, 0.0),
            GlobalTransform::default(),
        ))
        .id()
}

fn spawn_chain(app: &mut App, start: Vec2, count: usize, radius: f32, level: usize) -> Vec<Entity> {
    // Consecutive centers exactly one diameter apart: touching, within slack.
    (0..count)
        .map(|i| {
            spawn_ball(
                app,
                start + Vec2::new(i as f32 * radius * 2.0, 0.0),
                radius,
                level,
            )
        })
        .collect()
}

fn ball_count(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, With<Ball>>()
        .iter(app.world())
        .count()
}

#[test]
fn chain_of_five_is_eliminated() {
    let mut app = test_app();
    spawn_chain(&mut app, Vec2::ZERO, 5, 10.0, 2);
    advance(&mut app, 1.0);

    assert_eq!(ball_count(&mut app), 0, "all five members must despawn");
    let groups = app.world().resource::<Groups>();
    assert_eq!(groups.0.len(), 1);
    assert_eq!(groups.0[0].len(), 5);

    let events = app.world().resource::<Events<GroupEliminated>>();
    let mut cursor = events.get_cursor();
    let fired: Vec<_> = cursor.read(events).collect();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].level, 2);
    assert_eq!(fired[0].ball_count, 5);
}

#[test]
fn chains_of_four_and_six_survive() {
    let mut app = test_app();
    spawn_chain(&mut app, Vec2::new(0.0, 0.0), 4, 10.0, 1);
    spawn_chain(&mut app, Vec2::new(0.0, 500.0), 6, 10.0, 2);
    advance(&mut app, 1.0);

    assert_eq!(ball_count(&mut app), 10, "only exact-count groups vanish");
    let groups = app.world().resource::<Groups>();
    let mut sizes: Vec<usize> = groups.0.iter().map(|g| g.len()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![4, 6]);
}

#[test]
fn disjoint_pairs_and_singleton_stay() {
    let mut app = test_app();
    // Same level, all clusters pairwise far beyond the link distance.
    spawn_chain(&mut app, Vec2::new(0.0, 0.0), 2, 10.0, 1);
    spawn_chain(&mut app, Vec2::new(300.0, 0.0), 2, 10.0, 1);
    spawn_ball(&mut app, Vec2::new(600.0, 0.0), 10.0, 1);
    advance(&mut app, 1.0);

    assert_eq!(ball_count(&mut app), 5);
    let groups = app.world().resource::<Groups>();
    let mut sizes: Vec<usize> = groups.0.iter().map(|g| g.len()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![1, 2, 2]);
}

#[test]
fn mixed_levels_never_link() {
    let mut app = test_app();
    // Five touching balls alternating levels: no level-homogeneous group of 5.
    for i in 0..5 {
        spawn_ball(&mut app, Vec2::new(i as f32 * 20.0, 0.0), 10.0, i % 2);
    }
    advance(&mut app, 1.0);
    assert_eq!(ball_count(&mut app), 5);
}

#[test]
fn no_pass_runs_before_the_interval() {
    let mut app = test_app();
    spawn_chain(&mut app, Vec2::ZERO, 5, 10.0, 0);
    advance(&mut app, 0.5);

    assert_eq!(ball_count(&mut app), 5, "pass cadence is 1s, not per frame");
    assert!(app.world().resource::<Groups>().0.is_empty());

    advance(&mut app, 0.5);
    assert_eq!(ball_count(&mut app), 0, "timer fires once 1s accumulates");
}

#[test]
fn pass_after_elimination_is_a_noop() {
    let mut app = test_app();
    spawn_chain(&mut app, Vec2::new(0.0, 0.0), 5, 10.0, 1);
    let survivors = spawn_chain(&mut app, Vec2::new(0.0, 400.0), 3, 10.0, 4);
    advance(&mut app, 1.0);
    assert_eq!(ball_count(&mut app), 3);

    // Second pass over the shrunken registry: survivors untouched, no panics
    // from the already-removed entities.
    advance(&mut app, 1.0);
    assert_eq!(ball_count(&mut app), 3);
    for e in survivors {
        assert!(app.world().get_entity(e).is_ok());
    }
    let groups = app.world().resource::<Groups>();
    assert_eq!(groups.0.len(), 1);
    assert_eq!(groups.0[0].len(), 3);
}

#[test]
fn only_the_matching_group_is_removed() {
    let mut app = test_app();
    let five = spawn_chain(&mut app, Vec2::new(0.0, 0.0), 5, 10.0, 1);
    let six = spawn_chain(&mut app, Vec2::new(0.0, 300.0), 6, 10.0, 2);
    let lone = spawn_ball(&mut app, Vec2::new(0.0, 600.0), 10.0, 3);
    advance(&mut app, 1.0);

    for e in five {
        assert!(app.world().get_entity(e).is_err(), "matched member survived");
    }
    for e in six {
        assert!(app.world().get_entity(e).is_ok());
    }
    assert!(app.world().get_entity(lone).is_ok());
}

#[test]
fn custom_match_count_is_honored() {
    let mut app = test_app();
    let mut cfg = GameConfig::default();
    cfg.matching.match_count = 3;
    app.insert_resource(cfg);
    spawn_chain(&mut app, Vec2::ZERO, 3, 10.0, 0);
    spawn_chain(&mut app, Vec2::new(0.0, 300.0), 5, 10.0, 1);
    advance(&mut app, 1.0);

    // Now triples vanish and the five-chain survives.
    assert_eq!(ball_count(&mut app), 5);
}
