//! scene_core: foundational ECS types (components, resources, events) shared by the AR demos.
//! Motion math is kept as plain functions so the per-frame step stays testable without an App.

use bevy::prelude::*;

pub mod components;
pub mod materials;
pub mod motion;
pub mod placement;

pub use components::*;
// Explicit re-export: disambiguates from `bevy::prelude::Axis` pulled in by the prelude glob.
pub use components::Axis;
pub use materials::*;
pub use motion::*;
pub use placement::*;

/// Ordering labels for the per-frame pipeline.
/// 1. Controls (UI events applied to the state record)
/// 2. Tracking (XR frame capture + hit-test update)
/// 3. Placement (select events spawn objects)
/// 4. Motion (per-frame transforms)
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum FrameSet {
    Controls,
    Tracking,
    Placement,
    Motion,
}

pub struct SceneCorePlugin;
impl Plugin for SceneCorePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ObjectPlaced>()
            .init_resource::<MotionTuning>()
            .init_resource::<ActiveMotion>()
            .init_resource::<PlacedObjects>()
            .configure_sets(
                Update,
                (
                    FrameSet::Controls,
                    FrameSet::Tracking,
                    FrameSet::Placement,
                    FrameSet::Motion,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                apply_motion
                    .in_set(FrameSet::Motion)
                    .run_if(motion_enabled),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_registers_resources() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(SceneCorePlugin);
        app.update();
        assert!(app.world().contains_resource::<MotionTuning>());
        assert!(app.world().resource::<PlacedObjects>().is_empty());
    }
}
