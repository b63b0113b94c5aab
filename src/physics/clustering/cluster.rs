use std::collections::HashMap;

use bevy::prelude::*;
use smallvec::SmallVec;

use crate::core::components::{Ball, BallLevel, BallRadius};
use crate::core::config::GameConfig;
use crate::core::level::LevelTable;
use crate::core::system::system_order::PostPhysicsAdjustSet;

/// Snapshot of one live ball taken at the start of a match pass. The pass
/// never reads the world again after snapshotting, so physics can keep
/// ownership of positions.
#[derive(Debug, Clone, Copy)]
pub struct BallSnapshot {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
    pub level: usize,
}

/// A maximal set of same-level balls connected by pairwise proximity.
/// Transient: recomputed from scratch every pass.
#[derive(Debug, Clone)]
pub struct Group {
    pub level: usize,
    pub entities: Vec<Entity>,
    pub min: Vec2,
    pub max: Vec2,
    pub centroid: Vec2,
    pub total_area: f32,
}

impl Group {
    fn new(level: usize) -> Self {
        Self {
            level,
            entities: Vec::new(),
            min: Vec2::splat(f32::INFINITY),
            max: Vec2::splat(f32::NEG_INFINITY),
            centroid: Vec2::ZERO,
            total_area: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Resource storing the groups computed by the most recent match pass,
/// eliminated groups included (their members are already despawned).
#[derive(Resource, Default, Debug, Clone)]
pub struct Groups(pub Vec<Group>);

/// Wall-clock cadence of the match pass, decoupled from the physics tick.
#[derive(Resource, Deref, DerefMut)]
pub struct MatchTimer(pub Timer);

impl Default for MatchTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Repeating))
    }
}

/// Event emitted for every group removed by the elimination rule.
#[derive(Event, Debug, Clone)]
pub struct GroupEliminated {
    pub level: usize,
    pub ball_count: usize,
    pub centroid: Vec2,
}

/// Core match-pass plugin: grouping + elimination, no rendering dependencies.
pub struct MatchPassPlugin;
impl Plugin for MatchPassPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Groups>()
            .init_resource::<MatchTimer>()
            .add_event::<GroupEliminated>()
            .add_systems(Update, run_match_pass.in_set(PostPhysicsAdjustSet));
    }
}

/// Optional gizmo overlay drawing one AABB per group in its level color.
pub struct GroupDebugPlugin;
impl Plugin for GroupDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_draw_groups.after(run_match_pass));
    }
}

/// Spatial hashing cell key (integer pair) for broad-phase neighbor gathering.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
struct Cell(i32, i32);

/// Partition a registry snapshot into same-level proximity groups.
///
/// Two balls link when they share a level and their center distance is at most
/// `radius * link_factor`. Union-find over a uniform grid keeps the pass
/// near-linear; since same-level balls share a radius the result is identical
/// to a breadth-first sweep of the pairwise relation, and forms a true
/// partition of the snapshot whatever the traversal order.
pub fn partition(balls: &[BallSnapshot], link_factor: f32) -> Vec<Group> {
    let count = balls.len();
    let mut groups: Vec<Group> = Vec::new();
    if count == 0 {
        return groups;
    }

    let mut max_radius = 0.0f32;
    for b in balls {
        if b.radius > max_radius {
            max_radius = b.radius;
        }
    }

    // Union-Find (Disjoint Set)
    let mut parent: Vec<usize> = (0..count).collect();
    let mut rank: Vec<u8> = vec![0; count];
    fn find(parent: &mut [usize], i: usize) -> usize {
        if parent[i] != i {
            let root = find(parent, parent[i]);
            parent[i] = root;
            root
        } else {
            i
        }
    }
    fn union(parent: &mut [usize], rank: &mut [u8], a: usize, b: usize) {
        let mut ra = find(parent, a);
        let mut rb = find(parent, b);
        if ra == rb {
            return;
        }
        if rank[ra] < rank[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        parent[rb] = ra;
        if rank[ra] == rank[rb] {
            rank[ra] += 1;
        }
    }

    // Spatial hash: cell size covers the largest link distance, so linked
    // pairs always land in the same or an adjacent cell.
    let cell_size = (max_radius * link_factor).max(1.0);
    let inv_cell = 1.0 / cell_size;
    let mut grid: HashMap<Cell, SmallVec<[usize; 8]>> = HashMap::new();
    for (i, b) in balls.iter().enumerate() {
        let cx = (b.position.x * inv_cell).floor() as i32;
        let cy = (b.position.y * inv_cell).floor() as i32;
        grid.entry(Cell(cx, cy)).or_default().push(i);
    }

    let neighbor_offsets = [-1, 0, 1];
    for (cell, indices) in grid.iter() {
        for &i in indices {
            let bi = &balls[i];
            let link = bi.radius * link_factor;
            for dx in neighbor_offsets {
                for dy in neighbor_offsets {
                    let Some(list) = grid.get(&Cell(cell.0 + dx, cell.1 + dy)) else {
                        continue;
                    };
                    for &j in list {
                        if j <= i {
                            continue; // avoid double & self
                        }
                        let bj = &balls[j];
                        if bj.level != bi.level {
                            continue;
                        }
                        let dist2 = (bj.position - bi.position).length_squared();
                        if dist2 <= link * link {
                            union(&mut parent, &mut rank, i, j);
                        }
                    }
                }
            }
        }
    }

    // Gather groups by root, in first-member order.
    let mut by_root: HashMap<usize, usize> = HashMap::new();
    for i in 0..count {
        let root = find(&mut parent, i);
        let slot = *by_root.entry(root).or_insert_with(|| {
            groups.push(Group::new(balls[i].level));
            groups.len() - 1
        });
        let g = &mut groups[slot];
        let b = &balls[i];
        g.entities.push(b.entity);
        let area = std::f32::consts::PI * b.radius * b.radius;
        g.total_area += area;
        g.centroid += b.position * area; // area-weighted centroid
        g.min = g.min.min(b.position - Vec2::splat(b.radius));
        g.max = g.max.max(b.position + Vec2::splat(b.radius));
    }
    for g in groups.iter_mut() {
        if g.total_area > 0.0 {
            g.centroid /= g.total_area;
        }
    }
    groups
}

type BallQueryItem<'a> = (Entity, &'a Transform, &'a BallRadius, &'a BallLevel);

/// System: on each timer firing, snapshot the registry, partition it, and
/// despawn every group whose size equals the match count exactly.
///
/// Two-phase by construction: groups are computed over an immutable snapshot,
/// then removals are issued through `Commands`. A member that was already
/// removed elsewhere is a no-op, never an abort.
pub fn run_match_pass(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<MatchTimer>,
    mut groups: ResMut<Groups>,
    mut eliminated: EventWriter<GroupEliminated>,
    q: Query<BallQueryItem<'_>, With<Ball>>,
    cfg: Option<Res<GameConfig>>,
) {
    timer.tick(time.delta());
    if !timer.finished() {
        return;
    }

    let (link_factor, match_count) = cfg
        .as_ref()
        .map(|c| (c.matching.link_factor, c.matching.match_count))
        .unwrap_or((2.01, 5));

    let snapshot: Vec<BallSnapshot> = q
        .iter()
        .map(|(entity, tf, radius, level)| BallSnapshot {
            entity,
            position: tf.translation.truncate(),
            radius: radius.0,
            level: level.0,
        })
        .collect();

    groups.0 = partition(&snapshot, link_factor);

    for g in groups.0.iter() {
        if g.len() != match_count {
            continue;
        }
        for &entity in &g.entities {
            if let Ok(mut ec) = commands.get_entity(entity) {
                ec.try_despawn();
            }
        }
        info!(
            "match pass removed a level {} group of {}",
            g.level,
            g.len()
        );
        eliminated.write(GroupEliminated {
            level: g.level,
            ball_count: g.len(),
            centroid: g.centroid,
        });
    }
}

fn debug_draw_groups(
    groups: Res<Groups>,
    table: Option<Res<LevelTable>>,
    cfg: Option<Res<GameConfig>>,
    mut gizmos: Gizmos,
) {
    if !cfg.map(|c| c.draw_group_bounds).unwrap_or(false) {
        return;
    }
    for g in groups.0.iter() {
        if !g.min.x.is_finite() {
            continue;
        }
        let size = g.max - g.min;
        let center = g.min + size * 0.5;
        let color = table
            .as_ref()
            .and_then(|t| t.get(g.level))
            .map(|def| def.color)
            .unwrap_or(Color::WHITE);
        gizmos.rect_2d(Isometry2d::from_translation(center), size, color);
    }
}
