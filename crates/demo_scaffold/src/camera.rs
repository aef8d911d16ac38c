use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy::window::WindowResized;
use xr_session::XrViewer;

use crate::{CameraRig, DemoConfig, LOG_TARGET};

/// Camera spawned by the scaffold.
#[derive(Component, Debug, Default)]
pub struct DemoCamera;

/// Mouse-driven orbit around a target with damped motion.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub goal_yaw: f32,
    pub goal_pitch: f32,
    pub goal_distance: f32,
    pub damping: f32,
}

impl OrbitCamera {
    pub fn looking_at(eye: Vec3, target: Vec3, damping: f32) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(0.01);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        Self {
            target,
            yaw,
            pitch,
            distance,
            goal_yaw: yaw,
            goal_pitch: pitch,
            goal_distance: distance,
            damping,
        }
    }

    /// Moves the current values toward the goals; `frames` is elapsed time in 60 Hz frames.
    pub fn step(&mut self, frames: f32) {
        let k = 1.0 - (1.0 - self.damping.clamp(0.0, 1.0)).powf(frames);
        self.yaw += (self.goal_yaw - self.yaw) * k;
        self.pitch += (self.goal_pitch - self.pitch) * k;
        self.distance += (self.goal_distance - self.distance) * k;
    }

    pub fn transform(&self) -> Transform {
        let rot = Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0);
        let eye = self.target + rot * Vec3::new(0.0, 0.0, self.distance);
        Transform::from_translation(eye).looking_at(self.target, Vec3::Y)
    }
}

pub fn spawn_demo_camera(mut commands: Commands, config: Res<DemoConfig>, rig: Res<CameraRig>) {
    let cam = &config.camera;
    let eye = Vec3::from(cam.position);
    let target = Vec3::from(cam.look_at);
    let transform = if eye.abs_diff_eq(target, 1e-4) {
        Transform::from_translation(eye)
    } else {
        Transform::from_translation(eye).looking_at(target, Vec3::Y)
    };
    let mut camera = commands.spawn((
        Name::new("DemoCamera"),
        DemoCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: cam.fov_degrees.to_radians(),
            near: cam.near,
            far: cam.far,
            ..default()
        }),
        transform,
    ));
    match *rig {
        CameraRig::Orbit if cam.orbit => {
            camera.insert(OrbitCamera::looking_at(eye, target, cam.damping));
        }
        CameraRig::Orbit => {}
        CameraRig::XrViewer => {
            camera.insert(XrViewer);
        }
    }
    info!(target: LOG_TARGET, "camera at {eye} looking at {target} ({:?})", *rig);
}

/// Left drag orbits, scroll zooms.
pub fn orbit_camera_input(
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    motion: Option<Res<AccumulatedMouseMotion>>,
    scroll: Option<Res<AccumulatedMouseScroll>>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let dragging = mouse.is_some_and(|m| m.pressed(MouseButton::Left));
    let delta = motion.map(|m| m.delta).unwrap_or(Vec2::ZERO);
    let zoom = scroll.map(|s| s.delta.y).unwrap_or(0.0);
    if (!dragging || delta == Vec2::ZERO) && zoom == 0.0 {
        return;
    }
    for mut orbit in &mut cameras {
        if dragging {
            orbit.goal_yaw -= delta.x * 0.005;
            orbit.goal_pitch = (orbit.goal_pitch + delta.y * 0.005).clamp(-1.5, 1.5);
        }
        orbit.goal_distance = (orbit.goal_distance * (1.0 - zoom * 0.1)).clamp(0.5, 50.0);
    }
}

pub fn apply_orbit_damping(time: Res<Time>, mut cameras: Query<(&mut OrbitCamera, &mut Transform)>) {
    let frames = time.delta_secs() * 60.0;
    for (mut orbit, mut transform) in &mut cameras {
        orbit.step(frames);
        *transform = orbit.transform();
    }
}

/// Recomputes the perspective aspect ratio from the new window size.
pub fn sync_aspect_on_resize(mut resized: EventReader<WindowResized>, mut projections: Query<&mut Projection, With<DemoCamera>>) {
    let Some(last) = resized.read().last() else {
        return;
    };
    if last.height <= 0.0 {
        return;
    }
    let aspect = last.width / last.height;
    for mut projection in &mut projections {
        if let Projection::Perspective(p) = projection.as_mut() {
            p.aspect_ratio = aspect;
        }
    }
    debug!(target: LOG_TARGET, "aspect ratio -> {aspect:.3}");
}
