use bevy::prelude::*;

/// Marker component identifying a ball entity (holds physics body & collider).
#[derive(Component)]
pub struct Ball;

/// Logical radius used both for the collider and rendering scale.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone)]
pub struct BallRadius(pub f32);

/// Index into the level table; decides size, color and match eligibility.
#[derive(Component, Debug, Copy, Clone, PartialEq, Eq)]
pub struct BallLevel(pub usize);
