//! Per-frame motion step.
//!
//! `advance` is a pure function of (parameters, time, object) and produces the
//! rotation increment, scale and vertical position for one frame. The
//! `apply_motion` system feeds it from `ActiveMotion` once per frame.

use bevy::prelude::*;
use serde::Deserialize;
use std::f32::consts::TAU;

use crate::{Axis, MotionBaseline, Spin};

/// Rotation speed tiers exposed by the speed toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpeedTier {
    #[default]
    Normal,
    Fast,
}

impl SpeedTier {
    pub fn toggled(self) -> Self {
        match self {
            SpeedTier::Normal => SpeedTier::Fast,
            SpeedTier::Fast => SpeedTier::Normal,
        }
    }

    pub fn step(self, tuning: &MotionTuning) -> f32 {
        match self {
            SpeedTier::Normal => tuning.normal_step,
            SpeedTier::Fast => tuning.fast_step,
        }
    }
}

/// Fixed motion constants. Deserialised as the `motion` section of the demo config.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Radians added per frame at the normal tier.
    pub normal_step: f32,
    /// Radians added per frame at the fast tier.
    pub fast_step: f32,
    /// Gallery pulse amplitude, relative to a baseline scale of 1.
    pub pulse_amplitude: f32,
    /// Pulse amplitude of placed shapes, relative to their placed size.
    pub placed_pulse_amplitude: f32,
    pub pulse_period_ms: f32,
    pub jump_height: f32,
    pub jump_period_ms: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            normal_step: 0.01,
            fast_step: 0.05,
            pulse_amplitude: 0.1,
            placed_pulse_amplitude: 0.2,
            pulse_period_ms: 300.0,
            jump_height: 0.1,
            jump_period_ms: 300.0,
        }
    }
}

impl MotionTuning {
    pub fn pulse(&self) -> Pulse {
        Pulse { amplitude: self.pulse_amplitude, period_ms: self.pulse_period_ms }
    }

    pub fn placed_pulse(&self) -> Pulse {
        Pulse { amplitude: self.placed_pulse_amplitude, period_ms: self.pulse_period_ms }
    }

    pub fn jump(&self) -> Jump {
        Jump { height: self.jump_height, period_ms: self.jump_period_ms }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub amplitude: f32,
    pub period_ms: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jump {
    pub height: f32,
    pub period_ms: f32,
}

/// What the current state record asks of every managed object this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionParams {
    /// Per-frame rotation increment; `None` while rotation is disabled.
    pub spin_step: Option<f32>,
    /// Overrides each object's own axis (model viewer axis select).
    pub axis: Option<Axis>,
    pub pulse: Option<Pulse>,
    pub jump: Option<Jump>,
}

/// Parameters handed to `apply_motion`. Demos rebuild `params` from their state record;
/// `enabled` is cleared while no tracking frame is available.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ActiveMotion {
    pub enabled: bool,
    pub params: MotionParams,
}

impl Default for ActiveMotion {
    fn default() -> Self {
        Self { enabled: true, params: MotionParams::default() }
    }
}

/// Output of one motion step for one object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionStep {
    pub axis: Axis,
    /// Signed radians to add along `axis`.
    pub rotation_delta: f32,
    pub scale: Option<f32>,
    pub y: Option<f32>,
}

pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

pub fn pulse_scale(baseline: f32, time_ms: f32, pulse: Pulse) -> f32 {
    baseline * (1.0 + pulse.amplitude * (time_ms / pulse.period_ms).sin())
}

pub fn jump_y(base_y: f32, time_ms: f32, jump: Jump) -> f32 {
    base_y + jump.height * (time_ms / jump.period_ms).sin().abs()
}

pub fn advance(params: &MotionParams, time_ms: f32, baseline: &MotionBaseline, spin: &Spin) -> MotionStep {
    MotionStep {
        axis: params.axis.unwrap_or(spin.axis),
        rotation_delta: params.spin_step.map(|s| s * spin.direction).unwrap_or(0.0),
        scale: params.pulse.map(|p| pulse_scale(baseline.scale, time_ms, p)),
        y: params.jump.map(|j| jump_y(baseline.y, time_ms, j)),
    }
}

impl Spin {
    pub fn add(&mut self, axis: Axis, delta: f32) {
        let slot = match axis {
            Axis::X => &mut self.angles.x,
            Axis::Y => &mut self.angles.y,
            Axis::Z => &mut self.angles.z,
        };
        *slot = wrap_angle(*slot + delta);
    }
}

pub fn motion_enabled(motion: Res<ActiveMotion>) -> bool {
    motion.enabled
}

pub fn apply_motion(
    time: Res<Time>,
    motion: Res<ActiveMotion>,
    mut q: Query<(&mut Transform, &mut Spin, &MotionBaseline)>,
) {
    let time_ms = (time.elapsed_secs_f64() * 1000.0) as f32;
    for (mut transform, mut spin, baseline) in &mut q {
        let step = advance(&motion.params, time_ms, baseline, &spin);
        if step.rotation_delta != 0.0 {
            spin.add(step.axis, step.rotation_delta);
            transform.rotation = baseline.rotation * spin.rotation();
        }
        if let Some(scale) = step.scale {
            transform.scale = Vec3::splat(scale);
        }
        if let Some(y) = step.y {
            transform.translation.y = y;
        }
    }
}
