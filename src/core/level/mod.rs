pub mod queue;
pub mod table;

pub use queue::{LevelQueue, LevelRng};
pub use table::{build_levels, LevelDef, LevelTable};

use thiserror::Error;

/// Configuration rejections raised while building the level stack. Fatal at
/// startup; none of these can occur once spawning has begun.
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    /// The spawn draw range is `floor(count / 4)`; below 4 entries it is empty.
    #[error("level table needs at least 4 entries to seed the spawn draw range, got {count}")]
    DrawRangeEmpty { count: usize },

    #[error("level base size must be positive, got {base_size}")]
    InvalidBaseSize { base_size: f32 },
}
