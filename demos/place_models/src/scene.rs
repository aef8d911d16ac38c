use bevy::prelude::*;
use demo_scaffold::DemoConfig;
use model_assets::{MaterialOverride, ModelAsset};
use scene_core::{
    record_placement, ActiveMotion, Axis, MotionBaseline, MotionTuning, ObjectPlaced, PlacedObject, PlacedObjects,
    Spin,
};
use xr_session::{visible_reticle_pose, Reticle, XrSelect};

use crate::{ModelPlacementState, LOG_TARGET};

/// Directional light output per unit of the intensity slider.
pub const LUX_PER_UNIT: f32 = 3_000.0;

/// Marker for placed model clones.
#[derive(Component, Debug, Default)]
pub struct PlacedModel;

/// The scene's directional light, bound to the light controls.
#[derive(Component, Debug, Default)]
pub struct SceneDirLight;

pub fn setup_placement_scene(mut commands: Commands, state: Res<ModelPlacementState>) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0xdd, 0xdd, 0xff),
        brightness: 500.0,
        ..default()
    });
    commands.spawn((
        Name::new("SceneDirLight"),
        SceneDirLight,
        DirectionalLight {
            color: Color::Srgba(state.light_color),
            illuminance: state.light_intensity * LUX_PER_UNIT,
            ..default()
        },
        Transform::from_xyz(0.5, 2.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
        if state.scene_light { Visibility::Inherited } else { Visibility::Hidden },
    ));
}

/// One model clone per select. Needs both a visible reticle and a loaded model.
pub fn place_model_on_select(
    mut commands: Commands,
    mut selects: EventReader<XrSelect>,
    state: Res<ModelPlacementState>,
    model: Res<ModelAsset>,
    config: Res<DemoConfig>,
    reticles: Query<(&Transform, &Visibility), With<Reticle>>,
    mut placed: ResMut<PlacedObjects>,
    mut events: EventWriter<ObjectPlaced>,
) {
    for _ in selects.read() {
        let Some(pose) = visible_reticle_pose(&reticles) else {
            debug!(target: LOG_TARGET, "select ignored, no surface under the reticle");
            continue;
        };
        if !model.is_ready() {
            debug!(target: LOG_TARGET, "select ignored, model '{}' is {:?}", model.path, model.status);
            continue;
        }
        let scale = config.model.scale;
        let transform = Transform { translation: pose.translation, rotation: pose.rotation, scale: Vec3::splat(scale) };
        let entity = commands
            .spawn((
                Name::new("PlacedModel"),
                PlacedModel,
                PlacedObject { sequence: placed.next_sequence() },
                SceneRoot(model.scene.clone()),
                MaterialOverride(state.material),
                transform,
                Spin::new(Axis::Y, 1.0),
                MotionBaseline::from_transform(&transform, scale),
            ))
            .id();
        let sequence = record_placement(&mut commands, &mut placed, &mut events, entity);
        info!(target: LOG_TARGET, "placed model #{sequence} ({}) at {}", state.material, pose.translation);
    }
}

pub fn sync_motion(state: Res<ModelPlacementState>, tuning: Res<MotionTuning>, mut motion: ResMut<ActiveMotion>) {
    let params = state.motion_params(&tuning);
    if motion.params != params {
        motion.params = params;
    }
}

pub fn sync_scene_light(
    state: Res<ModelPlacementState>,
    mut lights: Query<(&mut DirectionalLight, &mut Visibility), With<SceneDirLight>>,
) {
    for (mut light, mut visibility) in &mut lights {
        visibility.set_if_neq(if state.scene_light { Visibility::Inherited } else { Visibility::Hidden });
        light.color = Color::Srgba(state.light_color);
        light.illuminance = state.light_intensity * LUX_PER_UNIT;
    }
}
