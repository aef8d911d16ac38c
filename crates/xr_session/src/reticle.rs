use bevy::prelude::*;

/// Ring marking where an object would be placed. Hidden until hit testing finds a surface.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Reticle;

pub const RETICLE_INNER_RADIUS: f32 = 0.15;
pub const RETICLE_OUTER_RADIUS: f32 = 0.2;

/// Flat ring lying in the XZ plane so a hit pose's up axis is its normal.
pub fn reticle_mesh() -> Mesh {
    Mesh::from(Annulus::new(RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS))
        .rotated_by(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
}

pub fn spawn_reticle(
    mut commands: Commands,
    mut meshes: Option<ResMut<Assets<Mesh>>>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let mut reticle = commands.spawn((Name::new("Reticle"), Reticle, Transform::default(), Visibility::Hidden));
    // headless apps run without asset storage
    if let (Some(meshes), Some(materials)) = (meshes.as_mut(), materials.as_mut()) {
        reticle.insert((
            Mesh3d(meshes.add(reticle_mesh())),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.0, 1.0, 0.0),
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            })),
        ));
    }
}

/// Pose of the reticle while it is showing a surface; placement is only allowed then.
pub fn visible_reticle_pose(reticles: &Query<(&Transform, &Visibility), With<Reticle>>) -> Option<Transform> {
    reticles
        .iter()
        .find(|(_, visibility)| **visibility == Visibility::Visible)
        .map(|(transform, _)| *transform)
}
