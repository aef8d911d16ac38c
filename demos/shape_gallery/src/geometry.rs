//! Procedural meshes for the gallery: a (2,3) torus knot, a tube along a sine curve, and a
//! bevelled rectangular frame with a round hole.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use std::f32::consts::{PI, TAU};

/// Orthonormal frame along a curve sample.
#[derive(Debug, Clone, Copy)]
struct Frame {
    point: Vec3,
    tangent: Vec3,
    normal: Vec3,
    binormal: Vec3,
}

fn tangent_at(curve: &impl Fn(f32) -> Vec3, t: f32) -> Vec3 {
    let d = 1e-4;
    let a = curve((t - d).max(0.0));
    let b = curve((t + d).min(1.0));
    (b - a).normalize_or(Vec3::X)
}

/// Parallel-transport frames; closed curves get the seam twist spread evenly.
fn curve_frames(curve: &impl Fn(f32) -> Vec3, segments: usize, closed: bool) -> Vec<Frame> {
    let tangents: Vec<Vec3> = (0..=segments)
        .map(|i| tangent_at(curve, i as f32 / segments as f32))
        .collect();

    let t0 = tangents[0];
    let least = if t0.x.abs() <= t0.y.abs() && t0.x.abs() <= t0.z.abs() {
        Vec3::X
    } else if t0.y.abs() <= t0.z.abs() {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let mut normals = Vec::with_capacity(segments + 1);
    normals.push(t0.cross(least).normalize().cross(t0).normalize());
    for i in 1..=segments {
        let prev = normals[i - 1];
        let axis = tangents[i - 1].cross(tangents[i]);
        let n = if axis.length() > 1e-6 {
            let angle = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
            Quat::from_axis_angle(axis.normalize(), angle) * prev
        } else {
            prev
        };
        normals.push(n);
    }

    if closed {
        let first = normals[0];
        let last = normals[segments];
        let mut theta = first.dot(last).clamp(-1.0, 1.0).acos() / segments as f32;
        if tangents[0].dot(first.cross(last)) > 0.0 {
            theta = -theta;
        }
        for (i, n) in normals.iter_mut().enumerate().skip(1) {
            *n = Quat::from_axis_angle(tangents[i], theta * i as f32) * *n;
        }
    }

    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let tangent = tangents[i];
            let normal = normals[i];
            Frame { point: curve(t), tangent, normal, binormal: tangent.cross(normal) }
        })
        .collect()
}

/// Sweeps a circle of `radius` along `curve(t)`, `t` in `[0, 1]`.
pub fn tube_mesh(curve: impl Fn(f32) -> Vec3, segments: usize, radius: f32, radial: usize, closed: bool) -> Mesh {
    let frames = curve_frames(&curve, segments, closed);
    let mut positions = Vec::with_capacity((segments + 1) * (radial + 1));
    let mut normals = Vec::with_capacity(positions.capacity());
    let mut uvs = Vec::with_capacity(positions.capacity());

    for (i, frame) in frames.iter().enumerate() {
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let n = (-v.cos() * frame.normal + v.sin() * frame.binormal).normalize();
            positions.push((frame.point + radius * n).to_array());
            normals.push(n.to_array());
            uvs.push([i as f32 / segments as f32, j as f32 / radial as f32]);
        }
    }

    let mut indices = Vec::with_capacity(segments * radial * 6);
    let row = (radial + 1) as u32;
    for i in 1..=segments as u32 {
        for j in 1..=radial as u32 {
            let a = row * (i - 1) + (j - 1);
            let b = row * i + (j - 1);
            let c = row * i + j;
            let d = row * (i - 1) + j;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

/// Point on a (p, q) torus knot, `t` in `[0, 1]`.
pub fn torus_knot_point(t: f32, radius: f32, p: f32, q: f32) -> Vec3 {
    let u = t * p * TAU;
    let cs = (q / p * u).cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * (q / p * u).sin() * 0.5,
    )
}

pub fn torus_knot_mesh(radius: f32, tube: f32, segments: usize, radial: usize) -> Mesh {
    tube_mesh(|t| torus_knot_point(t, radius, 2.0, 3.0), segments, tube, radial, true)
}

/// One full sine period from x = -scale to x = scale.
pub fn sine_point(t: f32, scale: f32) -> Vec3 {
    Vec3::new(t * 2.0 - 1.0, (TAU * t).sin(), 0.0) * scale
}

pub fn sine_tube_mesh(scale: f32, segments: usize, radius: f32, radial: usize) -> Mesh {
    tube_mesh(|t| sine_point(t, scale), segments, radius, radial, false)
}

/// Dimensions of the bevelled frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    pub half_width: f32,
    pub half_height: f32,
    pub hole_radius: f32,
    pub depth: f32,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub samples: usize,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            half_width: 0.5,
            half_height: 0.2,
            hole_radius: 0.15,
            depth: 0.3,
            bevel_thickness: 0.05,
            bevel_size: 0.03,
            samples: 64,
        }
    }
}

/// Where the ray from the origin at `angle` leaves the rectangle.
fn rect_point(angle: f32, hw: f32, hh: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    let tx = if c.abs() > 1e-6 { hw / c.abs() } else { f32::INFINITY };
    let ty = if s.abs() > 1e-6 { hh / s.abs() } else { f32::INFINITY };
    Vec2::new(c, s) * tx.min(ty)
}

/// Sample angles: uniform plus the four rectangle corners, sorted.
fn frame_angles(spec: &FrameSpec) -> Vec<f32> {
    let corner = spec.half_height.atan2(spec.half_width);
    let mut angles: Vec<f32> = (0..spec.samples).map(|i| i as f32 / spec.samples as f32 * TAU).collect();
    angles.extend([corner, PI - corner, PI + corner, TAU - corner]);
    angles.sort_by(f32::total_cmp);
    angles.dedup_by(|a, b| (*a - *b).abs() < 1e-5);
    angles
}

/// Extruded rectangle with a circular hole, bevelled on both faces. Centred on the origin,
/// extruded along z, flat-shaded.
pub fn bevelled_frame_mesh(spec: FrameSpec) -> Mesh {
    let angles = frame_angles(&spec);
    let n = angles.len();
    let (bt, bs) = (spec.bevel_thickness, spec.bevel_size);
    let z0 = -spec.depth * 0.5;
    // (z, contour offset): bevel face, bevel edge, bevel edge, bevel face
    let layers = [(z0 - bt, 0.0), (z0, bs), (z0 + spec.depth, bs), (z0 + spec.depth + bt, 0.0)];

    let outer = |offset: f32| -> Vec<Vec2> {
        angles
            .iter()
            .map(|a| rect_point(*a, spec.half_width + offset, spec.half_height + offset))
            .collect()
    };
    let inner = |offset: f32| -> Vec<Vec2> {
        let r = spec.hole_radius - offset;
        angles.iter().map(|a| Vec2::new(a.cos(), a.sin()) * r).collect()
    };
    let uv_of = |p: Vec2| [p.x / (2.0 * spec.half_width) + 0.5, p.y / (2.0 * spec.half_height) + 0.5];

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut push_tri = |a: (Vec2, f32), b: (Vec2, f32), c: (Vec2, f32)| {
        for (p, z) in [a, b, c] {
            positions.push([p.x, p.y, z]);
            uvs.push(uv_of(p));
        }
    };

    // side walls between consecutive layers
    for w in layers.windows(2) {
        let ((za, oa), (zb, ob)) = (w[0], w[1]);
        let (outer_a, outer_b) = (outer(oa), outer(ob));
        let (inner_a, inner_b) = (inner(oa), inner(ob));
        for i in 0..n {
            let j = (i + 1) % n;
            // outer wall faces away from the centre
            push_tri((outer_a[i], za), (outer_a[j], za), (outer_b[j], zb));
            push_tri((outer_a[i], za), (outer_b[j], zb), (outer_b[i], zb));
            // hole wall faces the centre
            push_tri((inner_a[i], za), (inner_b[j], zb), (inner_a[j], za));
            push_tri((inner_a[i], za), (inner_b[i], zb), (inner_b[j], zb));
        }
    }

    // caps
    let (back_z, _) = layers[0];
    let (front_z, _) = layers[3];
    let (o, h) = (outer(0.0), inner(0.0));
    for i in 0..n {
        let j = (i + 1) % n;
        push_tri((o[i], front_z), (o[j], front_z), (h[j], front_z));
        push_tri((o[i], front_z), (h[j], front_z), (h[i], front_z));
        push_tri((o[i], back_z), (h[j], back_z), (o[j], back_z));
        push_tri((o[i], back_z), (h[i], back_z), (h[j], back_z));
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.compute_flat_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> Vec<Vec3> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(p)) => p.iter().map(|v| Vec3::from(*v)).collect(),
            _ => panic!("missing positions"),
        }
    }

    fn normals(mesh: &Mesh) -> Vec<Vec3> {
        match mesh.attribute(Mesh::ATTRIBUTE_NORMAL) {
            Some(VertexAttributeValues::Float32x3(p)) => p.iter().map(|v| Vec3::from(*v)).collect(),
            _ => panic!("missing normals"),
        }
    }

    #[test]
    fn torus_knot_vertices_sit_on_tube_surface() {
        let mesh = torus_knot_mesh(0.4, 0.1, 100, 16);
        let pos = positions(&mesh);
        assert_eq!(pos.len(), 101 * 17);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(100 * 16 * 6));
        // every vertex is within tube radius of some curve sample
        let samples: Vec<Vec3> = (0..=400).map(|i| torus_knot_point(i as f32 / 400.0, 0.4, 2.0, 3.0)).collect();
        for p in pos.iter().step_by(37) {
            let d = samples.iter().map(|s| s.distance(*p)).fold(f32::MAX, f32::min);
            assert!((d - 0.1).abs() < 0.02, "distance {d}");
        }
    }

    #[test]
    fn tube_normals_point_outward() {
        let mesh = sine_tube_mesh(1.2, 64, 0.05, 8);
        let pos = positions(&mesh);
        let nor = normals(&mesh);
        for (p, n) in pos.iter().zip(&nor).step_by(11) {
            assert!((n.length() - 1.0).abs() < 1e-4);
            // stepping along the normal moves away from the tube axis
            let outside = *p + *n * 0.01;
            let t = ((p.x / 1.2) + 1.0) / 2.0;
            let axis = sine_point(t.clamp(0.0, 1.0), 1.2);
            assert!(outside.distance(axis) >= p.distance(axis) - 1e-3);
        }
    }

    #[test]
    fn frame_has_open_hole_and_bevelled_extent() {
        let spec = FrameSpec::default();
        let mesh = bevelled_frame_mesh(spec);
        let pos = positions(&mesh);
        let r_min = pos.iter().map(|p| p.truncate().length()).fold(f32::MAX, f32::min);
        assert!(r_min >= spec.hole_radius - spec.bevel_size - 1e-4);
        let max_x = pos.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!((max_x - (spec.half_width + spec.bevel_size)).abs() < 1e-4);
        let max_z = pos.iter().map(|p| p.z).fold(f32::MIN, f32::max);
        assert!((max_z - (spec.depth * 0.5 + spec.bevel_thickness)).abs() < 1e-4);
    }

    #[test]
    fn frame_front_cap_faces_forward() {
        let spec = FrameSpec::default();
        let mesh = bevelled_frame_mesh(spec);
        let front = spec.depth * 0.5 + spec.bevel_thickness;
        let pos = positions(&mesh);
        let nor = normals(&mesh);
        let cap: Vec<_> = pos.iter().zip(&nor).filter(|(p, n)| (p.z - front).abs() < 1e-5 && n.z.abs() > 0.99).collect();
        assert!(!cap.is_empty());
        assert!(cap.iter().all(|(_, n)| n.z > 0.0));
    }

    #[test]
    fn rect_point_hits_edges() {
        assert!((rect_point(0.0, 0.5, 0.2) - Vec2::new(0.5, 0.0)).length() < 1e-5);
        assert!((rect_point(PI / 2.0, 0.5, 0.2) - Vec2::new(0.0, 0.2)).length() < 1e-5);
    }
}
