//! Shared types used throughout the library.

use glam::Vec3;
use std::cmp::Ordering;

/// A three-component float vector usable as an ordered map key.
///
/// Components compare lexicographically (x, then y, then z). Positive and
/// negative zero are the same key; every other value is ordered with
/// [`f32::total_cmp`], which keeps NaN from breaking the ordering.
#[derive(Debug, Clone, Copy)]
pub struct Vec3Key(pub Vec3);

impl Vec3Key {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// The stored vector, exactly as first seen.
    pub fn vec(&self) -> Vec3 {
        self.0
    }
}

fn canonical(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

fn cmp_component(a: f32, b: f32) -> Ordering {
    canonical(a).total_cmp(&canonical(b))
}

impl Ord for Vec3Key {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_component(self.0.x, other.0.x)
            .then_with(|| cmp_component(self.0.y, other.0.y))
            .then_with(|| cmp_component(self.0.z, other.0.z))
    }
}

impl PartialOrd for Vec3Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Vec3Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Vec3Key {}

impl From<Vec3> for Vec3Key {
    fn from(v: Vec3) -> Self {
        Self(v)
    }
}

impl From<[f32; 3]> for Vec3Key {
    fn from(v: [f32; 3]) -> Self {
        Self(Vec3::from_array(v))
    }
}

/// An interned vertex: world-space position plus RGB color.
///
/// OBJ has no alpha channel for vertex colors, so only RGB takes part in
/// identity. Ordering is (x, y, z, r, g, b).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VertexKey {
    pub position: Vec3Key,
    pub color: Vec3Key,
}

impl VertexKey {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: position.into(),
            color: color.into(),
        }
    }

    /// A vertex with the default (black) color.
    pub fn uncolored(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_zero_is_one_key() {
        assert_eq!(Vec3Key::new(0.0, -0.0, 1.0), Vec3Key::new(-0.0, 0.0, 1.0));
    }

    #[test]
    fn test_lexicographic_order() {
        let a = Vec3Key::new(0.0, 5.0, 5.0);
        let b = Vec3Key::new(1.0, 0.0, 0.0);
        let c = Vec3Key::new(1.0, 0.0, 2.0);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(b.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_vertex_key_orders_position_before_color() {
        let red = VertexKey::new(Vec3::ZERO, Vec3::X);
        let moved = VertexKey::uncolored(Vec3::new(0.0, 0.0, 1.0));
        assert!(red < moved);
        assert_ne!(red, VertexKey::uncolored(Vec3::ZERO));
    }
}
