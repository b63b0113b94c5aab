use anyhow::Context;
use bevy::prelude::*;

use merge_drop::core::config::GameConfig;
use merge_drop::core::level::{LevelQueue, LevelRng, LevelTable};
use merge_drop::physics::clustering::cluster::MatchTimer;
use merge_drop::GamePlugin;

const CONFIG_PATH: &str = "assets/config/game.ron";

fn main() -> anyhow::Result<()> {
    let (cfg, load_err) = GameConfig::load_or_default(CONFIG_PATH);
    if let Some(err) = &load_err {
        eprintln!("{CONFIG_PATH}: {err}; running with defaults");
    }

    // Reject impossible level configurations before anything can spawn.
    let mut rng = LevelRng::from_seed_opt(cfg.spawn.seed);
    let table = LevelTable::build(&cfg.levels).context("level table rejected")?;
    let queue = LevelQueue::new(table.len(), &mut rng.0).context("level queue rejected")?;

    App::new()
        .insert_resource(cfg.clone())
        .insert_resource(table)
        .insert_resource(queue)
        .insert_resource(rng)
        .insert_resource(MatchTimer(Timer::from_seconds(
            cfg.matching.interval,
            TimerMode::Repeating,
        )))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .add_systems(Startup, log_config_warnings)
        .run();
    Ok(())
}

fn log_config_warnings(cfg: Res<GameConfig>) {
    for warning in cfg.validate() {
        warn!("config: {warning}");
    }
}
