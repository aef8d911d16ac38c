use bevy::prelude::*;
use scene_core::{
    record_placement, surface_material, ActiveMotion, Axis, MotionBaseline, MotionTuning, ObjectPlaced, PlacedObject,
    PlacedObjects, Spin,
};
use xr_session::{visible_reticle_pose, Reticle, XrSelect};

use crate::geometry::dodecahedron_mesh;
use crate::{ShapePlacementState, LOG_TARGET};

/// Marker for placed dodecahedra.
#[derive(Component, Debug, Default)]
pub struct PlacedShape;

/// Unit-radius dodecahedron shared by every placed shape; size comes from the transform scale.
#[derive(Resource, Debug, Clone)]
pub struct ShapeMesh(pub Handle<Mesh>);

pub fn setup_placement_scene(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(ShapeMesh(meshes.add(dodecahedron_mesh(1.0))));
    // sky white over a pale blue ground, approximated by a tinted ambient plus a soft key light
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0xdd, 0xdd, 0xff),
        brightness: 1_000.0,
        ..default()
    });
    commands.spawn((
        Name::new("KeyLight"),
        DirectionalLight { illuminance: 1_500.0, ..default() },
        Transform::from_xyz(0.5, 1.0, 0.25).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// One shape per select, at the reticle pose, with the current colour, size and material.
pub fn place_shape_on_select(
    mut commands: Commands,
    mut selects: EventReader<XrSelect>,
    state: Res<ShapePlacementState>,
    shape_mesh: Res<ShapeMesh>,
    reticles: Query<(&Transform, &Visibility), With<Reticle>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut placed: ResMut<PlacedObjects>,
    mut events: EventWriter<ObjectPlaced>,
) {
    for _ in selects.read() {
        let Some(pose) = visible_reticle_pose(&reticles) else {
            debug!(target: LOG_TARGET, "select ignored, no surface under the reticle");
            continue;
        };
        let material = surface_material(state.material, Some(Color::Srgba(state.color)), None);
        let transform = Transform {
            translation: pose.translation,
            rotation: pose.rotation,
            scale: Vec3::splat(state.size),
        };
        let entity = commands
            .spawn((
                Name::new("PlacedShape"),
                PlacedShape,
                PlacedObject { sequence: placed.next_sequence() },
                Mesh3d(shape_mesh.0.clone()),
                MeshMaterial3d(materials.add(material)),
                transform,
                Spin::new(Axis::Y, 1.0),
                MotionBaseline::from_transform(&transform, state.size),
            ))
            .id();
        let sequence = record_placement(&mut commands, &mut placed, &mut events, entity);
        info!(
            target: LOG_TARGET,
            "placed shape #{sequence} ({}, size {:.2}) at {}",
            state.material,
            state.size,
            pose.translation
        );
    }
}

pub fn sync_motion(state: Res<ShapePlacementState>, tuning: Res<MotionTuning>, mut motion: ResMut<ActiveMotion>) {
    let params = state.motion_params(&tuning);
    if motion.params != params {
        motion.params = params;
    }
}
