use bevy::prelude::*;
use std::error::Error;
use std::fmt;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceSpaceKind {
    /// Tracks the viewer (device camera); hit-test rays are cast along its forward axis.
    Viewer,
    /// Stationary space established at session start; poses are reported in it.
    Local,
}

/// Opaque reference space handle issued by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceSpace {
    pub kind: ReferenceSpaceKind,
    pub id: u64,
}

/// Opaque hit-test source handle bound to the space its rays originate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitTestSource {
    pub id: u64,
    pub space: ReferenceSpace,
}

/// One hit-test result expressed in the requested reference space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitPose {
    pub translation: Vec3,
    pub rotation: Quat,
    pub distance: f32,
}

impl HitPose {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation).with_rotation(self.rotation)
    }
}

/// Tracking data for one displayed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XrFrame {
    /// Viewer pose in the local reference space.
    pub viewer: Transform,
    pub timestamp_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XrError {
    SessionNotActive,
    ReferenceSpaceUnavailable(ReferenceSpaceKind),
    HitTestUnsupported,
    Platform(String),
}

impl fmt::Display for XrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XrError::SessionNotActive => write!(f, "no active XR session"),
            XrError::ReferenceSpaceUnavailable(kind) => write!(f, "reference space {kind:?} unavailable"),
            XrError::HitTestUnsupported => write!(f, "hit testing is not supported by this session"),
            XrError::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl Error for XrError {}

/// The XR runtime as seen by the demos. The two `request_*` calls are asynchronous and are
/// awaited together by the hit-test acquisition task.
pub trait XrPlatform: Send + Sync + 'static {
    fn request_reference_space(
        &self,
        kind: ReferenceSpaceKind,
    ) -> impl Future<Output = Result<ReferenceSpace, XrError>> + Send;

    fn request_hit_test_source(
        &self,
        space: ReferenceSpace,
    ) -> impl Future<Output = Result<HitTestSource, XrError>> + Send;

    /// Hits for `frame`, nearest first, posed in `space`.
    fn hit_test_results(&self, frame: &XrFrame, source: &HitTestSource, space: &ReferenceSpace) -> Vec<HitPose>;
}
