//! Loaded glTF models: one load per demo, polled to a single resolution point, plus material
//! overrides applied to every mesh of a spawned scene instance.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use scene_core::{model_override_material, FrameSet, ModelMaterial, SurfacePreset};

pub const LOG_TARGET: &str = "model_assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Pending,
    Ready,
    Failed,
}

/// The demo's model scene and how far its load got.
#[derive(Resource, Debug, Clone, Default)]
pub struct ModelAsset {
    pub path: String,
    pub scene: Handle<Scene>,
    pub status: LoadStatus,
}

impl ModelAsset {
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }
}

/// Requested material for every mesh below a scene root.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterialOverride(pub ModelMaterial);

/// Inserted on a scene root once its instance has spawned.
#[derive(Component, Debug, Default)]
pub struct SceneReady;

/// The material a mesh was loaded with, kept so overrides can be undone.
#[derive(Component, Debug, Clone)]
pub struct OriginalMaterial(pub Handle<StandardMaterial>);

/// One shared material per preset.
#[derive(Resource, Debug, Default)]
pub struct PresetMaterials(HashMap<SurfacePreset, Handle<StandardMaterial>>);

impl PresetMaterials {
    pub fn get_or_create(
        &mut self,
        preset: SurfacePreset,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.0
            .entry(preset)
            .or_insert_with(|| materials.add(model_override_material(preset)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct ModelAssetsPlugin {
    pub path: String,
}

impl ModelAssetsPlugin {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Plugin for ModelAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ModelAsset { path: self.path.clone(), ..default() })
            .init_resource::<PresetMaterials>()
            .add_observer(mark_scene_ready)
            .add_systems(Startup, load_model)
            .add_systems(
                Update,
                (
                    track_model_load.before(FrameSet::Controls),
                    apply_material_overrides.after(FrameSet::Placement).before(FrameSet::Motion),
                ),
            );
    }
}

fn load_model(asset_server: Option<Res<AssetServer>>, mut model: ResMut<ModelAsset>) {
    let Some(asset_server) = asset_server else {
        warn!(target: LOG_TARGET, "no asset server; model '{}' not loaded", model.path);
        return;
    };
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(model.path.clone()));
    info!(target: LOG_TARGET, "loading model '{}'", model.path);
    model.scene = scene;
}

/// Moves `Pending` to `Ready` or `Failed`; the only place the load outcome is observed.
pub fn track_model_load(asset_server: Option<Res<AssetServer>>, mut model: ResMut<ModelAsset>) {
    if model.status != LoadStatus::Pending {
        return;
    }
    let Some(asset_server) = asset_server else {
        return;
    };
    match asset_server.get_load_state(&model.scene) {
        Some(bevy::asset::LoadState::Loaded) => {
            model.status = LoadStatus::Ready;
            info!(target: LOG_TARGET, "model '{}' ready", model.path);
        }
        Some(bevy::asset::LoadState::Failed(err)) => {
            model.status = LoadStatus::Failed;
            error!(target: LOG_TARGET, "failed to load model '{}': {err}", model.path);
        }
        _ => {}
    }
}

fn mark_scene_ready(trigger: Trigger<SceneInstanceReady>, mut commands: Commands) {
    commands.entity(trigger.target()).insert(SceneReady);
}

/// Applies the requested material to every mesh below roots whose scene just became ready or
/// whose override changed.
pub fn apply_material_overrides(
    mut commands: Commands,
    roots: Query<
        (Entity, &MaterialOverride),
        (With<SceneReady>, Or<(Changed<MaterialOverride>, Added<SceneReady>)>),
    >,
    children: Query<&Children>,
    mut meshes: Query<(&mut MeshMaterial3d<StandardMaterial>, Option<&OriginalMaterial>)>,
    mut presets: ResMut<PresetMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (root, material_override) in &roots {
        let replacement = match material_override.0 {
            ModelMaterial::Original => None,
            ModelMaterial::Preset(preset) => Some(presets.get_or_create(preset, &mut materials)),
        };
        let mut touched = 0usize;
        for entity in children.iter_descendants(root) {
            let Ok((mut material, original)) = meshes.get_mut(entity) else {
                continue;
            };
            let original = match original {
                Some(o) => o.0.clone(),
                None => {
                    commands.entity(entity).insert(OriginalMaterial(material.0.clone()));
                    material.0.clone()
                }
            };
            let next = replacement.clone().unwrap_or(original);
            if material.0 != next {
                material.0 = next;
            }
            touched += 1;
        }
        debug!(target: LOG_TARGET, "material {} applied to {touched} meshes", material_override.0);
    }
}
