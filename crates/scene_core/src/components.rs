use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Rotation axis selectable from the UI (three.js style Euler component).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Axis {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(format!("unknown axis '{other}'")),
        }
    }
}

/// Accumulated per-axis rotation for an object driven by the motion step.
/// Angles are kept in `[0, TAU)` and composed in XYZ order on top of the baseline rotation.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub axis: Axis,
    /// +1.0 or -1.0; the gallery meshes spin in opposite senses.
    pub direction: f32,
    pub angles: Vec3,
}

impl Spin {
    pub fn new(axis: Axis, direction: f32) -> Self {
        Self { axis, direction: direction.signum(), angles: Vec3::ZERO }
    }

    pub fn angle(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.angles.x,
            Axis::Y => self.angles.y,
            Axis::Z => self.angles.z,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.angles.x, self.angles.y, self.angles.z)
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new(Axis::Y, 1.0)
    }
}

/// Values captured at creation time that animated offsets are relative to.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MotionBaseline {
    pub scale: f32,
    pub y: f32,
    pub rotation: Quat,
}

impl MotionBaseline {
    pub fn from_transform(transform: &Transform, scale: f32) -> Self {
        Self { scale, y: transform.translation.y, rotation: transform.rotation }
    }
}

impl Default for MotionBaseline {
    fn default() -> Self {
        Self { scale: 1.0, y: 0.0, rotation: Quat::IDENTITY }
    }
}

/// Marker for objects spawned through the placement operation.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PlacedObject {
    /// Position in the placed-object list at spawn time.
    pub sequence: u64,
}
