use bevy::prelude::*;
use demo_scaffold::{default_plugins, DemoScaffoldPlugin, LayeredConfig};
use scene_core::FrameSet;
use ui_binder::{ControlFlowSet, ControlPanelPlugin};

pub mod geometry;
mod scene;
mod state;

pub use scene::*;
pub use state::*;

pub const DEMO_NAME: &str = "shape_gallery";
pub const LOG_TARGET: &str = "shape_gallery";

/// Gallery scene, its control panel, and the systems mirroring the state onto the meshes.
pub struct ShapeGalleryPlugin;

impl Plugin for ShapeGalleryPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ControlPanelPlugin::<GalleryState>::new("Shape Gallery"))
            .add_systems(Startup, setup_gallery)
            .add_systems(
                Update,
                (
                    expire_special.in_set(FrameSet::Controls).before(ControlFlowSet::Apply),
                    (sync_motion, sync_emissive, sync_textures)
                        .run_if(resource_changed::<GalleryState>)
                        .in_set(FrameSet::Controls)
                        .after(ControlFlowSet::Apply),
                ),
            );
    }
}

pub fn run_shape_gallery(config: LayeredConfig) {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.08)))
        .add_plugins(default_plugins(&config.config, DEMO_NAME))
        .add_plugins(DemoScaffoldPlugin::new(DEMO_NAME, config))
        .add_plugins(ShapeGalleryPlugin)
        .run();
}
