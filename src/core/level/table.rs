use bevy::prelude::*;

use super::LevelError;
use crate::core::config::config::LevelsConfig;

/// One size/color tier a ball can carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelDef {
    pub radius: f32,
    pub color: Color,
}

/// Ordered level definitions, radius strictly increasing with index.
/// Built once at startup; immutable afterwards.
#[derive(Resource, Debug, Clone)]
pub struct LevelTable(Vec<LevelDef>);

impl LevelTable {
    pub fn build(cfg: &LevelsConfig) -> Result<Self, LevelError> {
        Ok(Self(build_levels(cfg.count, cfg.base_size)?))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, level: usize) -> Option<&LevelDef> {
        self.0.get(level)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDef> {
        self.0.iter()
    }
}

/// Geometric growth rule: the squared radius doubles per tier, so each radius
/// is the previous one times sqrt(2); hues are spaced evenly around the wheel.
pub fn build_levels(count: usize, base_size: f32) -> Result<Vec<LevelDef>, LevelError> {
    if base_size <= 0.0 {
        return Err(LevelError::InvalidBaseSize { base_size });
    }
    let mut defs = Vec::with_capacity(count);
    let mut size = base_size;
    for i in 0..count {
        let hue = 360.0 * (i + 1) as f32 / count as f32;
        defs.push(LevelDef {
            radius: size.sqrt(),
            color: Color::hsl(hue, 0.9, 0.5),
        });
        size *= 2.0;
    }
    Ok(defs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_follow_doubling_rule() {
        let defs = build_levels(10, 240.0).unwrap();
        assert_eq!(defs.len(), 10);
        assert!((defs[0].radius - 240.0f32.sqrt()).abs() < 1e-4);
        for pair in defs.windows(2) {
            let ratio = pair[1].radius / pair[0].radius;
            assert!((ratio - 2.0f32.sqrt()).abs() < 1e-4, "ratio {ratio}");
        }
    }

    #[test]
    fn radii_strictly_increasing() {
        let defs = build_levels(10, 240.0).unwrap();
        for pair in defs.windows(2) {
            assert!(pair[1].radius > pair[0].radius);
        }
    }

    #[test]
    fn colors_distinct_per_level() {
        let defs = build_levels(10, 240.0).unwrap();
        for (i, a) in defs.iter().enumerate() {
            for (j, b) in defs.iter().enumerate() {
                if i != j {
                    assert!(a.color != b.color, "levels {i} and {j} share a color");
                }
            }
        }
    }

    #[test]
    fn rejects_non_positive_base_size() {
        assert!(matches!(
            build_levels(10, 0.0),
            Err(LevelError::InvalidBaseSize { .. })
        ));
        assert!(matches!(
            build_levels(10, -5.0),
            Err(LevelError::InvalidBaseSize { .. })
        ));
    }

    #[test]
    fn table_from_config() {
        let table = LevelTable::build(&LevelsConfig::default()).unwrap();
        assert_eq!(table.len(), 10);
        assert!(table.get(9).is_some());
        assert!(table.get(10).is_none());
    }
}
