use bevy::prelude::*;
use model_assets::*;
use scene_core::{ModelMaterial, SurfacePreset};

struct Fixture {
    app: App,
    root: Entity,
    mesh: Entity,
    original: Handle<StandardMaterial>,
}

fn fixture() -> Fixture {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Assets::<StandardMaterial>::default())
        .add_plugins(ModelAssetsPlugin::new("models/missing.glb"));
    let original = app
        .world_mut()
        .resource_mut::<Assets<StandardMaterial>>()
        .add(StandardMaterial::default());
    let mesh = app.world_mut().spawn(MeshMaterial3d(original.clone())).id();
    let node = app.world_mut().spawn(Transform::default()).add_child(mesh).id();
    let root = app
        .world_mut()
        .spawn((MaterialOverride(ModelMaterial::Original), SceneReady))
        .add_child(node)
        .id();
    app.update();
    Fixture { app, root, mesh, original }
}

fn mesh_material(app: &App, mesh: Entity) -> Handle<StandardMaterial> {
    app.world().get::<MeshMaterial3d<StandardMaterial>>(mesh).expect("mesh material").0.clone()
}

#[test]
fn original_is_remembered_on_first_pass() {
    let f = fixture();
    let remembered = f.app.world().get::<OriginalMaterial>(f.mesh).expect("original recorded");
    assert_eq!(remembered.0, f.original);
    assert_eq!(mesh_material(&f.app, f.mesh), f.original);
}

#[test]
fn preset_swap_and_restore() {
    let mut f = fixture();
    f.app.world_mut().entity_mut(f.root).insert(MaterialOverride(ModelMaterial::Preset(SurfacePreset::Gold)));
    f.app.update();
    let gold = mesh_material(&f.app, f.mesh);
    assert_ne!(gold, f.original);
    let material = f.app.world().resource::<Assets<StandardMaterial>>().get(&gold).expect("gold exists");
    assert_eq!(material.metallic, 1.0);
    assert_eq!(material.perceptual_roughness, 0.3);

    f.app.world_mut().entity_mut(f.root).insert(MaterialOverride(ModelMaterial::Original));
    f.app.update();
    assert_eq!(mesh_material(&f.app, f.mesh), f.original);
}

#[test]
fn presets_are_shared_between_instances() {
    let mut f = fixture();
    let other_mesh = f.app.world_mut().spawn(MeshMaterial3d(f.original.clone())).id();
    f.app
        .world_mut()
        .spawn((MaterialOverride(ModelMaterial::Preset(SurfacePreset::Glass)), SceneReady))
        .add_child(other_mesh);
    f.app.world_mut().entity_mut(f.root).insert(MaterialOverride(ModelMaterial::Preset(SurfacePreset::Glass)));
    f.app.update();
    assert_eq!(mesh_material(&f.app, f.mesh), mesh_material(&f.app, other_mesh));
    assert_eq!(f.app.world().resource::<PresetMaterials>().len(), 1);
    let glass = mesh_material(&f.app, f.mesh);
    let material = f.app.world().resource::<Assets<StandardMaterial>>().get(&glass).expect("glass exists");
    assert!((material.base_color.alpha() - 0.5).abs() < 1e-6);
}

#[test]
fn override_waits_for_scene_instance() {
    let mut f = fixture();
    let late_mesh = f.app.world_mut().spawn(MeshMaterial3d(f.original.clone())).id();
    let late_root = f
        .app
        .world_mut()
        .spawn(MaterialOverride(ModelMaterial::Preset(SurfacePreset::Glow)))
        .add_child(late_mesh)
        .id();
    f.app.update();
    assert_eq!(mesh_material(&f.app, late_mesh), f.original);

    f.app.world_mut().entity_mut(late_root).insert(SceneReady);
    f.app.update();
    assert_ne!(mesh_material(&f.app, late_mesh), f.original);
}

#[test]
fn load_stays_pending_without_asset_server() {
    let mut f = fixture();
    f.app.update();
    let model = f.app.world().resource::<ModelAsset>();
    assert_eq!(model.status, LoadStatus::Pending);
    assert!(!model.is_ready());
}
