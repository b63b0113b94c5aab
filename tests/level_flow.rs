use rand::rngs::StdRng;
use rand::SeedableRng;

use merge_drop::core::config::GameConfig;
use merge_drop::{LevelError, LevelQueue, LevelTable};

#[test]
fn level_stack_builds_from_default_config() {
    let cfg = GameConfig::default();
    let table = LevelTable::build(&cfg.levels).unwrap();
    assert_eq!(table.len(), 10);

    let mut rng = StdRng::seed_from_u64(9);
    let mut queue = LevelQueue::new(table.len(), &mut rng).unwrap();
    for _ in 0..500 {
        let level = queue.take_next(&mut rng);
        // Every drawn level resolves to a real (small) table entry.
        let def = table.get(level).expect("drawn level must exist");
        assert!(level < table.len() / 4);
        assert!(def.radius > 0.0);
    }
}

#[test]
fn undersized_table_is_rejected_before_any_spawn() {
    let mut cfg = GameConfig::default();
    cfg.levels.count = 3;
    let table = LevelTable::build(&cfg.levels).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        LevelQueue::new(table.len(), &mut rng),
        Err(LevelError::DrawRangeEmpty { count: 3 })
    );
}
