//! Tap-to-place dodecahedra. Once the AR session runs and the reticle shows a surface, every
//! select drops a shape at the reticle with the panel's current colour, size and material.
//! Rotation and pulse apply to every placed shape while tracking frames arrive.

use bevy::prelude::*;
use demo_scaffold::{default_plugins, CameraRig, DemoScaffoldPlugin, LayeredConfig};
use scene_core::FrameSet;
use ui_binder::{ControlFlowSet, ControlPanelPlugin};
use xr_session::{HitTestPlugin, SimulatedXr};

pub mod geometry;
mod scene;
mod state;

pub use scene::*;
pub use state::*;

pub const DEMO_NAME: &str = "place_shapes";
pub const LOG_TARGET: &str = "place_shapes";

/// Panel, placement and motion sync. Needs `DemoScaffoldPlugin` and a `HitTestPlugin`.
pub struct PlaceShapesPlugin;

impl Plugin for PlaceShapesPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ControlPanelPlugin::<ShapePlacementState>::new("Place Shapes"))
            .add_systems(Startup, setup_placement_scene)
            .add_systems(
                Update,
                (
                    sync_motion
                        .run_if(resource_changed::<ShapePlacementState>)
                        .in_set(FrameSet::Controls)
                        .after(ControlFlowSet::Apply),
                    place_shape_on_select.in_set(FrameSet::Placement),
                ),
            );
    }
}

pub fn run_place_shapes(config: LayeredConfig) {
    let platform = SimulatedXr::new(config.config.xr.clone());
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.03)))
        .add_plugins(default_plugins(&config.config, DEMO_NAME))
        .add_plugins(DemoScaffoldPlugin::new(DEMO_NAME, config).with_rig(CameraRig::XrViewer))
        .add_plugins(HitTestPlugin::new(platform))
        .add_plugins(PlaceShapesPlugin)
        .run();
}
