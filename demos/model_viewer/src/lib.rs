use bevy::prelude::*;
use demo_scaffold::{default_plugins, DemoScaffoldPlugin, LayeredConfig};
use model_assets::ModelAssetsPlugin;
use scene_core::FrameSet;
use ui_binder::{ControlFlowSet, ControlPanelPlugin};

mod scene;
mod state;

pub use scene::*;
pub use state::*;

pub const DEMO_NAME: &str = "model_viewer";
pub const LOG_TARGET: &str = "model_viewer";

/// Loads the configured model, shows it once ready, and binds the viewer controls.
pub struct ModelViewerPlugin {
    pub model_path: String,
}

impl ModelViewerPlugin {
    pub fn new(model_path: impl Into<String>) -> Self {
        Self { model_path: model_path.into() }
    }
}

impl Plugin for ModelViewerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ModelAssetsPlugin::new(self.model_path.clone()))
            .add_plugins(ControlPanelPlugin::<ViewerState>::new("Model Viewer"))
            .add_systems(Startup, setup_viewer_scene)
            .add_systems(
                Update,
                (
                    (sync_motion, sync_material, sync_scene_light, sync_model_light)
                        .run_if(resource_changed::<ViewerState>)
                        .in_set(FrameSet::Controls)
                        .after(ControlFlowSet::Apply),
                    spawn_model_when_ready.in_set(FrameSet::Placement),
                ),
            );
    }
}

pub fn run_model_viewer(config: LayeredConfig) {
    let model_path = config.config.model.path.clone();
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.08)))
        .add_plugins(default_plugins(&config.config, DEMO_NAME))
        .add_plugins(DemoScaffoldPlugin::new(DEMO_NAME, config))
        .add_plugins(ModelViewerPlugin::new(model_path))
        .run();
}
