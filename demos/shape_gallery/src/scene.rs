use bevy::prelude::*;
use scene_core::{surface_material, scaled_emissive, ActiveMotion, Axis, MotionBaseline, MotionTuning, Spin, SurfacePreset};

use crate::geometry::{bevelled_frame_mesh, sine_tube_mesh, torus_knot_mesh, FrameSpec};
use crate::{GalleryState, LOG_TARGET};

pub const TEXTURE_PATH: &str = "textures/uv_grid.png";
const GALLERY_SCALE: f32 = 0.8;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryShape {
    TorusKnot,
    SineTube,
    Frame,
}

impl GalleryShape {
    pub const ALL: [GalleryShape; 3] = [GalleryShape::TorusKnot, GalleryShape::SineTube, GalleryShape::Frame];

    pub fn position(self) -> Vec3 {
        match self {
            GalleryShape::TorusKnot => Vec3::new(-1.5, 0.0, -5.0),
            GalleryShape::SineTube => Vec3::new(0.0, 0.0, -5.0),
            GalleryShape::Frame => Vec3::new(1.5, 0.0, -5.0),
        }
    }

    pub fn preset(self) -> SurfacePreset {
        match self {
            GalleryShape::TorusKnot => SurfacePreset::Glass,
            GalleryShape::SineTube => SurfacePreset::Ember,
            GalleryShape::Frame => SurfacePreset::Gold,
        }
    }

    /// Torus knot turns -y, tube +z, frame -x.
    pub fn spin(self) -> Spin {
        match self {
            GalleryShape::TorusKnot => Spin::new(Axis::Y, -1.0),
            GalleryShape::SineTube => Spin::new(Axis::Z, 1.0),
            GalleryShape::Frame => Spin::new(Axis::X, -1.0),
        }
    }

    pub fn mesh(self) -> Mesh {
        match self {
            GalleryShape::TorusKnot => torus_knot_mesh(0.4, 0.1, 100, 16),
            GalleryShape::SineTube => sine_tube_mesh(1.2, 64, 0.05, 8),
            GalleryShape::Frame => bevelled_frame_mesh(FrameSpec::default()),
        }
    }
}

/// Plain and textured variants of a shape's material; the textures toggle swaps between them.
#[derive(Component, Debug, Clone)]
pub struct GalleryMaterials {
    pub plain: Handle<StandardMaterial>,
    pub textured: Handle<StandardMaterial>,
}

pub fn setup_gallery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Option<Res<AssetServer>>,
    state: Res<GalleryState>,
) {
    commands.spawn((
        Name::new("SunLight"),
        DirectionalLight { illuminance: 8_000.0, ..default() },
        Transform::from_xyz(5.0, 10.0, 7.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0x40, 0x40, 0x40),
        brightness: 600.0,
        ..default()
    });

    let texture: Option<Handle<Image>> = asset_server.map(|server| server.load(TEXTURE_PATH));
    let intensity = state.emissive_intensity();
    for shape in GalleryShape::ALL {
        let plain = surface_material(shape.preset(), None, Some(intensity));
        let textured = StandardMaterial { base_color_texture: texture.clone(), ..plain.clone() };
        let handles = GalleryMaterials { plain: materials.add(plain), textured: materials.add(textured) };
        let active = if state.textures { handles.textured.clone() } else { handles.plain.clone() };
        let transform = Transform::from_translation(shape.position()).with_scale(Vec3::splat(GALLERY_SCALE));
        commands.spawn((
            Name::new(format!("{shape:?}")),
            shape,
            Mesh3d(meshes.add(shape.mesh())),
            MeshMaterial3d(active),
            handles,
            transform,
            shape.spin(),
            // pulsing scales around 1.0, not the 0.8 the shapes start at
            MotionBaseline { scale: 1.0, ..MotionBaseline::from_transform(&transform, 1.0) },
        ));
    }
    info!(target: LOG_TARGET, "gallery spawned ({} shapes)", GalleryShape::ALL.len());
}

/// Pushes the state record into the motion step.
pub fn sync_motion(state: Res<GalleryState>, tuning: Res<MotionTuning>, mut motion: ResMut<ActiveMotion>) {
    let params = state.motion_params(&tuning);
    if motion.params != params {
        motion.params = params;
    }
}

/// Keeps every gallery material's emissive intensity in line with the state.
pub fn sync_emissive(
    state: Res<GalleryState>,
    shapes: Query<(&GalleryShape, &GalleryMaterials)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let intensity = state.emissive_intensity();
    for (shape, handles) in &shapes {
        let emissive = scaled_emissive(shape.preset().emissive_color(None), intensity);
        for handle in [&handles.plain, &handles.textured] {
            if let Some(material) = materials.get_mut(handle) {
                material.emissive = emissive;
            }
        }
    }
    debug!(target: LOG_TARGET, "emissive intensity {intensity}");
}

pub fn sync_textures(state: Res<GalleryState>, mut shapes: Query<(&GalleryMaterials, &mut MeshMaterial3d<StandardMaterial>)>) {
    for (handles, mut material) in &mut shapes {
        let wanted = if state.textures { &handles.textured } else { &handles.plain };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}

/// Ends the special flash after its duration.
pub fn expire_special(time: Res<Time>, mut state: ResMut<GalleryState>) {
    if state.special.is_none() {
        return;
    }
    let now_ms = (time.elapsed_secs_f64() * 1000.0) as f32;
    if state.expire_special(now_ms) {
        info!(target: LOG_TARGET, "special effect ended");
    }
}
