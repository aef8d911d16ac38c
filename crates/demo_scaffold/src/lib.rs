//! Shared wiring for the AR demos: config loading, window and logging setup, the demo camera,
//! and the core/XR plugins every demo needs. Control panels run inside `FrameSet::Controls`.

use bevy::app::PluginGroupBuilder;
use bevy::asset::AssetPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResized;
use scene_core::{FrameSet, MotionTuning, PlacedObjects, SceneCorePlugin};
use std::path::Path;
use ui_binder::ControlFlowSet;
use xr_session::XrSessionPlugin;

mod camera;
mod config;

pub use camera::*;
pub use config::*;

pub const LOG_TARGET: &str = "demo_scaffold";

/// How the scaffold camera is driven.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraRig {
    /// Fixed or mouse-orbited camera (`camera.orbit`).
    #[default]
    Orbit,
    /// The camera stands in for the AR device: it becomes the `XrViewer` and gets the
    /// desktop viewer rig.
    XrViewer,
}

/// Config layers for `demo`: the explicit file if given, otherwise the layered defaults under
/// the asset `config/` directory. Nothing is logged here; `DemoScaffoldPlugin` reports.
pub fn load_demo_config(demo: &str, explicit: Option<&Path>) -> LayeredConfig {
    match explicit {
        Some(path) => DemoConfig::load_layered([path]),
        None => DemoConfig::load_layered(DemoConfig::layer_paths(demo)),
    }
}

fn report_config(layered: &LayeredConfig) {
    for err in &layered.errors {
        // the optional *.local.ron layer is usually absent
        if err.contains(".local.ron") && err.contains("read error") {
            debug!(target: LOG_TARGET, "{err}");
        } else {
            warn!(target: LOG_TARGET, "{err}");
        }
    }
    if !layered.used.is_empty() {
        info!(target: LOG_TARGET, "config layers: {}", layered.used.join(", "));
    }
    for warning in layered.config.validate() {
        warn!(target: LOG_TARGET, "config: {warning}");
    }
}

/// `DefaultPlugins` with the window and log filter taken from the config and assets served
/// from the workspace asset directory.
pub fn default_plugins(config: &DemoConfig, demo_name: &str) -> PluginGroupBuilder {
    let title = if config.window.title.is_empty() {
        demo_name.to_string()
    } else {
        format!("{} - {demo_name}", config.window.title)
    };
    DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title,
                resolution: (config.window.width, config.window.height).into(),
                ..default()
            }),
            ..default()
        })
        .set(LogPlugin { filter: config.log_filter.clone(), ..default() })
        .set(AssetPlugin { file_path: ASSET_ROOT.into(), ..default() })
}

/// Inserts the config-derived resources and adds the core plugins, camera, and resize handling.
#[derive(Debug, Clone)]
pub struct DemoScaffoldPlugin {
    demo_name: String,
    layered: LayeredConfig,
    rig: CameraRig,
}

impl DemoScaffoldPlugin {
    pub fn new(demo_name: impl Into<String>, config: impl Into<LayeredConfig>) -> Self {
        Self { demo_name: demo_name.into(), layered: config.into(), rig: CameraRig::Orbit }
    }

    pub fn with_rig(mut self, rig: CameraRig) -> Self {
        self.rig = rig;
        self
    }
}

impl Plugin for DemoScaffoldPlugin {
    fn build(&self, app: &mut App) {
        report_config(&self.layered);
        let config = &self.layered.config;
        app.add_plugins(SceneCorePlugin)
            .insert_resource(config.clone())
            .insert_resource::<MotionTuning>(config.motion.clone())
            .insert_resource(PlacedObjects::with_cap(config.placement.max_placed))
            .insert_resource(self.rig)
            .add_event::<WindowResized>()
            .add_plugins(XrSessionPlugin {
                ar_button: self.rig == CameraRig::XrViewer,
                viewer_rig: self.rig == CameraRig::XrViewer,
            })
            .configure_sets(
                Update,
                (ControlFlowSet::Collect, ControlFlowSet::Apply)
                    .chain()
                    .in_set(FrameSet::Controls),
            )
            .add_systems(Startup, spawn_demo_camera)
            .add_systems(
                Update,
                (
                    sync_aspect_on_resize,
                    (orbit_camera_input, apply_orbit_damping).chain().before(FrameSet::Tracking),
                ),
            );
        info!(target: LOG_TARGET, "scaffold ready for {}", self.demo_name);
    }
}
