pub mod arena;
pub mod spawn;
