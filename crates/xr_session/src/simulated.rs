use bevy::prelude::*;
use bevy::tasks::futures_lite::future;
use serde::Deserialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{HitPose, HitTestSource, ReferenceSpace, ReferenceSpaceKind, XrError, XrFrame, XrPlatform};

/// A flat surface the simulated device can "see".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurfacePlane {
    pub point: [f32; 3],
    pub normal: [f32; 3],
    /// Square half-size around `point`; `None` is infinite.
    pub half_extent: Option<f32>,
}

impl Default for SurfacePlane {
    fn default() -> Self {
        Self { point: [0.0, 0.0, 0.0], normal: [0.0, 1.0, 0.0], half_extent: None }
    }
}

impl SurfacePlane {
    pub fn floor(height: f32) -> Self {
        Self { point: [0.0, height, 0.0], ..default() }
    }

    /// Ray/plane intersection; returns the distance along `dir` when within range and extent.
    pub fn intersect(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<f32> {
        let normal = Vec3::from(self.normal).try_normalize()?;
        let point = Vec3::from(self.point);
        let denom = normal.dot(dir);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (point - origin).dot(normal) / denom;
        if t <= 0.0 || t > max_distance {
            return None;
        }
        if let Some(half) = self.half_extent {
            let offset = origin + dir * t - point;
            let in_plane = offset - normal * offset.dot(normal);
            if in_plane.abs().max_element() > half {
                return None;
            }
        }
        Some(t)
    }
}

/// `xr` config section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulatedXrConfig {
    pub planes: Vec<SurfacePlane>,
    pub max_distance: f32,
    /// Polls each acquisition call stays pending, mimicking device latency.
    pub latency_polls: u32,
    /// Refuse hit-test sources; exercises the acquisition error path.
    pub hit_test_unsupported: bool,
}

impl Default for SimulatedXrConfig {
    fn default() -> Self {
        Self {
            planes: vec![SurfacePlane::floor(-1.0)],
            max_distance: 10.0,
            latency_polls: 2,
            hit_test_unsupported: false,
        }
    }
}

/// Desktop stand-in for an AR runtime: the viewer camera's forward ray is cast against a set
/// of configured planes.
#[derive(Debug, Default)]
pub struct SimulatedXr {
    config: SimulatedXrConfig,
    next_id: AtomicU64,
}

impl SimulatedXr {
    pub fn new(config: SimulatedXrConfig) -> Self {
        Self { config, next_id: AtomicU64::new(1) }
    }

    fn issue_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// All hits along `dir` from `origin`, nearest first.
    pub fn cast(&self, origin: Vec3, dir: Vec3) -> Vec<HitPose> {
        let mut hits: Vec<HitPose> = self
            .config
            .planes
            .iter()
            .filter_map(|plane| {
                let distance = plane.intersect(origin, dir, self.config.max_distance)?;
                let mut normal = Vec3::from(plane.normal).normalize_or(Vec3::Y);
                // face the viewer
                if normal.dot(dir) > 0.0 {
                    normal = -normal;
                }
                Some(HitPose {
                    translation: origin + dir * distance,
                    rotation: Quat::from_rotation_arc(Vec3::Y, normal),
                    distance,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

async fn settle(polls: u32) {
    for _ in 0..polls {
        future::yield_now().await;
    }
}

impl XrPlatform for SimulatedXr {
    fn request_reference_space(
        &self,
        kind: ReferenceSpaceKind,
    ) -> impl Future<Output = Result<ReferenceSpace, XrError>> + Send {
        let id = self.issue_id();
        let polls = self.config.latency_polls;
        async move {
            settle(polls).await;
            Ok(ReferenceSpace { kind, id })
        }
    }

    fn request_hit_test_source(
        &self,
        space: ReferenceSpace,
    ) -> impl Future<Output = Result<HitTestSource, XrError>> + Send {
        let id = self.issue_id();
        let polls = self.config.latency_polls;
        let unsupported = self.config.hit_test_unsupported;
        async move {
            settle(polls).await;
            if unsupported {
                return Err(XrError::HitTestUnsupported);
            }
            if space.kind != ReferenceSpaceKind::Viewer {
                return Err(XrError::ReferenceSpaceUnavailable(ReferenceSpaceKind::Viewer));
            }
            Ok(HitTestSource { id, space })
        }
    }

    fn hit_test_results(&self, frame: &XrFrame, _source: &HitTestSource, _space: &ReferenceSpace) -> Vec<HitPose> {
        // the local space coincides with world space here
        self.cast(frame.viewer.translation, *frame.viewer.forward())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(planes: Vec<SurfacePlane>) -> SimulatedXr {
        SimulatedXr::new(SimulatedXrConfig { planes, ..default() })
    }

    #[test]
    fn looking_down_hits_floor_with_upright_pose() {
        let xr = platform(vec![SurfacePlane::floor(0.0)]);
        let hits = xr.cast(Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Y);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].translation - Vec3::ZERO).length() < 1e-5);
        assert!((hits[0].distance - 1.5).abs() < 1e-5);
        assert!((hits[0].rotation * Vec3::Y - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn looking_at_horizon_misses() {
        let xr = platform(vec![SurfacePlane::floor(0.0)]);
        assert!(xr.cast(Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Z).is_empty());
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let table = SurfacePlane { point: [0.0, 0.8, 0.0], half_extent: Some(0.5), ..default() };
        let xr = platform(vec![SurfacePlane::floor(0.0), table]);
        let hits = xr.cast(Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Y);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance < hits[1].distance);
        assert!((hits[0].translation.y - 0.8).abs() < 1e-5);
    }

    #[test]
    fn bounded_plane_rejects_far_points() {
        let table = SurfacePlane { point: [0.0, 0.8, 0.0], half_extent: Some(0.5), ..default() };
        let xr = platform(vec![table]);
        assert!(xr.cast(Vec3::new(2.0, 1.5, 0.0), Vec3::NEG_Y).is_empty());
    }

    #[test]
    fn wall_hit_faces_viewer() {
        let wall = SurfacePlane { point: [0.0, 0.0, -2.0], normal: [0.0, 0.0, -1.0], half_extent: None };
        let xr = platform(vec![wall]);
        let hits = xr.cast(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].rotation * Vec3::Y - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn max_distance_limits_hits() {
        let xr = SimulatedXr::new(SimulatedXrConfig {
            planes: vec![SurfacePlane::floor(-20.0)],
            max_distance: 10.0,
            ..default()
        });
        assert!(xr.cast(Vec3::ZERO, Vec3::NEG_Y).is_empty());
    }
}
