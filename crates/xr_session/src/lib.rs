//! xr_session: AR session lifecycle and hit testing behind the `XrPlatform` trait.
//!
//! Per frame, inside `FrameSet::Tracking`:
//! 1. session requests (AR button, Enter) start/stop the session
//! 2. the tracking frame is captured from the viewer camera
//! 3. hit-test acquisition is driven and results refreshed
//! 4. the reticle follows the nearest hit
//!
//! `XrSelect` is raised in `FrameSet::Controls` so placement sees it the same frame.

use bevy::prelude::*;
use scene_core::FrameSet;
use std::sync::Arc;

mod platform;
mod reticle;
mod session;
mod simulated;

pub use hit_test::*;
pub use platform::*;
pub use reticle::*;
pub use session::*;
pub use simulated::*;

pub const LOG_TARGET: &str = "xr_session";

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum XrSet {
    Session,
    Frame,
    HitTest,
    Reticle,
}

/// Shared platform instance; the acquisition task holds a clone.
#[derive(Resource)]
pub struct XrPlatformHandle<P: XrPlatform>(pub Arc<P>);

/// Session lifecycle, tracking frames, select events, and the desktop viewer rig.
pub struct XrSessionPlugin {
    pub ar_button: bool,
    pub viewer_rig: bool,
}

impl Default for XrSessionPlugin {
    fn default() -> Self {
        Self { ar_button: true, viewer_rig: true }
    }
}

impl Plugin for XrSessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<XrSession>()
            .init_resource::<CurrentXrFrame>()
            .add_event::<XrSessionRequest>()
            .add_event::<XrSessionStarted>()
            .add_event::<XrSessionEnded>()
            .add_event::<XrSelect>()
            .configure_sets(
                Update,
                (XrSet::Session, XrSet::Frame, XrSet::HitTest, XrSet::Reticle)
                    .chain()
                    .in_set(FrameSet::Tracking),
            )
            .add_systems(
                Update,
                (
                    collect_session_input.in_set(FrameSet::Controls),
                    collect_select.in_set(FrameSet::Controls),
                    apply_session_requests.in_set(XrSet::Session),
                    capture_frame.in_set(XrSet::Frame),
                ),
            );
        if self.ar_button {
            app.add_systems(Startup, spawn_ar_button);
        }
        if self.viewer_rig {
            app.add_systems(Update, drive_viewer_rig.before(XrSet::Frame));
        }
    }
}

/// Hit-test acquisition and the reticle for a concrete platform. Requires `XrSessionPlugin`.
/// Motion is paused while no tracking frame is available.
pub struct HitTestPlugin<P: XrPlatform> {
    pub platform: Arc<P>,
}

impl<P: XrPlatform> HitTestPlugin<P> {
    pub fn new(platform: P) -> Self {
        Self { platform: Arc::new(platform) }
    }
}

impl<P: XrPlatform> Plugin for HitTestPlugin<P> {
    fn build(&self, app: &mut App) {
        app.insert_resource(XrPlatformHandle(Arc::clone(&self.platform)))
            .init_resource::<HitTest>()
            .init_resource::<HitTestResults>()
            .add_systems(Startup, spawn_reticle)
            .add_systems(
                Update,
                (
                    reset_on_session_end.in_set(XrSet::Session).after(apply_session_requests),
                    gate_motion_on_frame.in_set(XrSet::Frame).after(capture_frame),
                    drive_hit_test::<P>.in_set(XrSet::HitTest),
                    update_reticle.in_set(XrSet::Reticle),
                ),
            );
    }
}
