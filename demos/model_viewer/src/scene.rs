use bevy::prelude::*;
use demo_scaffold::DemoConfig;
use model_assets::{MaterialOverride, ModelAsset};
use scene_core::{ActiveMotion, Axis, MotionBaseline, MotionTuning, Spin};

use crate::{LightKind, ViewerState, LOG_TARGET};

const SCENE_LIGHT_LUX: f32 = 4_000.0;
pub const AMBIENT_BRIGHTNESS: f32 = 800.0;
/// Model light output per unit of the intensity slider.
const POINT_LUMENS_PER_UNIT: f32 = 200_000.0;
const DIRECTIONAL_LUX_PER_UNIT: f32 = 2_000.0;

/// Root of the spawned model scene.
#[derive(Component, Debug, Default)]
pub struct ViewerModel;

/// Directional half of the scene light; the ambient half is the `AmbientLight` resource.
#[derive(Component, Debug, Default)]
pub struct SceneLight;

/// Light attached to the model, tagged with the kind it was created as.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelLight(pub LightKind);

fn visibility(on: bool) -> Visibility {
    if on {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

pub fn setup_viewer_scene(mut commands: Commands, state: Res<ViewerState>) {
    commands.spawn((
        Name::new("SceneLight"),
        SceneLight,
        DirectionalLight { illuminance: SCENE_LIGHT_LUX, ..default() },
        Transform::from_xyz(5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        visibility(state.scene_light),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: if state.scene_light { AMBIENT_BRIGHTNESS } else { 0.0 },
        ..default()
    });
}

/// Spawns the model once its load resolved; a pending or failed model leaves the scene empty.
pub fn spawn_model_when_ready(
    mut commands: Commands,
    model: Res<ModelAsset>,
    config: Res<DemoConfig>,
    state: Res<ViewerState>,
    existing: Query<(), With<ViewerModel>>,
) {
    if !model.is_ready() || !existing.is_empty() {
        return;
    }
    let settings = &config.model;
    let transform = Transform::from_translation(Vec3::from_array(settings.position))
        .with_scale(Vec3::splat(settings.scale));
    let root = commands
        .spawn((
            Name::new("ViewerModel"),
            ViewerModel,
            SceneRoot(model.scene.clone()),
            transform,
            Spin::new(Axis::Y, 1.0),
            MotionBaseline::from_transform(&transform, settings.scale),
            MaterialOverride(state.material),
        ))
        .id();
    spawn_model_light(&mut commands, root, &state);
    info!(target: LOG_TARGET, "model '{}' placed at {:?}", model.path, settings.position);
}

fn spawn_model_light(commands: &mut Commands, model: Entity, state: &ViewerState) {
    let kind = state.model_light_kind;
    let color = Color::Srgba(state.light_color);
    let mut light = commands.spawn((
        Name::new(format!("ModelLight({kind})")),
        ModelLight(kind),
        Transform::from_xyz(0.0, 1.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
        visibility(state.model_light),
        ChildOf(model),
    ));
    match kind {
        LightKind::Point => {
            light.insert(PointLight {
                color,
                intensity: state.light_intensity * POINT_LUMENS_PER_UNIT,
                ..default()
            });
        }
        LightKind::Spot => {
            light.insert(SpotLight {
                color,
                intensity: state.light_intensity * POINT_LUMENS_PER_UNIT,
                ..default()
            });
        }
        LightKind::Directional => {
            light.insert(DirectionalLight {
                color,
                illuminance: state.light_intensity * DIRECTIONAL_LUX_PER_UNIT,
                ..default()
            });
        }
    }
}

pub fn sync_motion(state: Res<ViewerState>, tuning: Res<MotionTuning>, mut motion: ResMut<ActiveMotion>) {
    let params = state.motion_params(&tuning);
    if motion.params != params {
        motion.params = params;
    }
}

pub fn sync_material(state: Res<ViewerState>, mut models: Query<&mut MaterialOverride, With<ViewerModel>>) {
    for mut material in &mut models {
        material.set_if_neq(MaterialOverride(state.material));
    }
}

pub fn sync_scene_light(
    state: Res<ViewerState>,
    mut ambient: ResMut<AmbientLight>,
    mut lights: Query<&mut Visibility, With<SceneLight>>,
) {
    let brightness = if state.scene_light { AMBIENT_BRIGHTNESS } else { 0.0 };
    if ambient.brightness != brightness {
        ambient.brightness = brightness;
    }
    for mut vis in &mut lights {
        vis.set_if_neq(visibility(state.scene_light));
    }
}

/// Re-creates the model light when its kind changed, otherwise updates it in place.
pub fn sync_model_light(
    mut commands: Commands,
    state: Res<ViewerState>,
    models: Query<Entity, With<ViewerModel>>,
    mut lights: Query<(
        Entity,
        &ModelLight,
        &mut Visibility,
        Option<&mut PointLight>,
        Option<&mut SpotLight>,
        Option<&mut DirectionalLight>,
    )>,
) {
    let color = Color::Srgba(state.light_color);
    for (entity, light, mut vis, point, spot, directional) in &mut lights {
        if light.0 != state.model_light_kind {
            commands.entity(entity).despawn();
            for model in &models {
                spawn_model_light(&mut commands, model, &state);
            }
            debug!(target: LOG_TARGET, "model light re-created as {}", state.model_light_kind);
            continue;
        }
        vis.set_if_neq(visibility(state.model_light));
        if let Some(mut p) = point {
            p.color = color;
            p.intensity = state.light_intensity * POINT_LUMENS_PER_UNIT;
        }
        if let Some(mut s) = spot {
            s.color = color;
            s.intensity = state.light_intensity * POINT_LUMENS_PER_UNIT;
        }
        if let Some(mut d) = directional {
            d.color = color;
            d.illuminance = state.light_intensity * DIRECTIONAL_LUX_PER_UNIT;
        }
    }
}
