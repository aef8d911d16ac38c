//! Tap-to-place clones of a glTF model. Selects are ignored until the model has loaded;
//! each clone takes the material selected at the time it was placed.

use bevy::prelude::*;
use demo_scaffold::{default_plugins, CameraRig, DemoScaffoldPlugin, LayeredConfig};
use model_assets::ModelAssetsPlugin;
use scene_core::FrameSet;
use ui_binder::{ControlFlowSet, ControlPanelPlugin};
use xr_session::{HitTestPlugin, SimulatedXr};

mod scene;
mod state;

pub use scene::*;
pub use state::*;

pub const DEMO_NAME: &str = "place_models";
pub const LOG_TARGET: &str = "place_models";

pub struct PlaceModelsPlugin {
    pub model_path: String,
}

impl PlaceModelsPlugin {
    pub fn new(model_path: impl Into<String>) -> Self {
        Self { model_path: model_path.into() }
    }
}

impl Plugin for PlaceModelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ModelAssetsPlugin::new(self.model_path.clone()))
            .add_plugins(ControlPanelPlugin::<ModelPlacementState>::new("Place Models"))
            .add_systems(Startup, setup_placement_scene)
            .add_systems(
                Update,
                (
                    (sync_motion, sync_scene_light)
                        .run_if(resource_changed::<ModelPlacementState>)
                        .in_set(FrameSet::Controls)
                        .after(ControlFlowSet::Apply),
                    place_model_on_select.in_set(FrameSet::Placement),
                ),
            );
    }
}

pub fn run_place_models(config: LayeredConfig) {
    let platform = SimulatedXr::new(config.config.xr.clone());
    let model_path = config.config.model.path.clone();
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.03)))
        .add_plugins(default_plugins(&config.config, DEMO_NAME))
        .add_plugins(DemoScaffoldPlugin::new(DEMO_NAME, config).with_rig(CameraRig::XrViewer))
        .add_plugins(HitTestPlugin::new(platform))
        .add_plugins(PlaceModelsPlugin::new(model_path))
        .run();
}
