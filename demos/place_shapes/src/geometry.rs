use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

const PHI: f32 = 1.618_034;

/// The 20 corners of a regular dodecahedron, unit circumradius.
pub fn dodecahedron_vertices() -> Vec<Vec3> {
    let r = 1.0 / PHI;
    let mut v = Vec::with_capacity(20);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                v.push(Vec3::new(x, y, z));
            }
        }
    }
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            v.push(Vec3::new(0.0, a * r, b * PHI));
            v.push(Vec3::new(a * r, b * PHI, 0.0));
            v.push(Vec3::new(a * PHI, 0.0, b * r));
        }
    }
    v.into_iter().map(Vec3::normalize).collect()
}

/// Face normals: the icosahedron vertices.
fn face_normals() -> Vec<Vec3> {
    let mut n = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            n.push(Vec3::new(0.0, a * PHI, b));
            n.push(Vec3::new(a * PHI, b, 0.0));
            n.push(Vec3::new(b, 0.0, a * PHI));
        }
    }
    n.into_iter().map(Vec3::normalize).collect()
}

/// Flat-shaded dodecahedron; every pentagon gets its own five vertices.
pub fn dodecahedron_mesh(radius: f32) -> Mesh {
    let corners = dodecahedron_vertices();
    let mut positions = Vec::with_capacity(60);
    let mut normals = Vec::with_capacity(60);
    let mut uvs = Vec::with_capacity(60);
    let mut indices = Vec::with_capacity(108);

    for normal in face_normals() {
        let mut face: Vec<Vec3> = corners.clone();
        face.sort_by(|a, b| b.dot(normal).total_cmp(&a.dot(normal)));
        face.truncate(5);

        let center = face.iter().copied().sum::<Vec3>() / 5.0;
        let u = (face[0] - center).normalize();
        let w = normal.cross(u);
        face.sort_by(|a, b| {
            let angle = |p: &Vec3| (*p - center).dot(w).atan2((*p - center).dot(u));
            angle(a).total_cmp(&angle(b))
        });

        let base = positions.len() as u32;
        for corner in &face {
            let d = *corner - center;
            positions.push(*corner * radius);
            normals.push(normal);
            uvs.push([0.5 + 0.5 * d.dot(u) / d.length(), 0.5 + 0.5 * d.dot(w) / d.length()]);
        }
        for i in 1..4 {
            indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> Vec<Vec3> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(v)) => v.iter().map(|p| Vec3::from_array(*p)).collect(),
            _ => panic!("positions missing"),
        }
    }

    #[test]
    fn corners_are_distinct_and_on_the_sphere() {
        let corners = dodecahedron_vertices();
        assert_eq!(corners.len(), 20);
        for (i, a) in corners.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < 1e-5);
            for b in &corners[i + 1..] {
                assert!(a.distance(*b) > 0.1);
            }
        }
    }

    #[test]
    fn mesh_has_twelve_flat_pentagons() {
        let mesh = dodecahedron_mesh(0.1);
        assert_eq!(mesh.count_vertices(), 60);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(108));
        for p in positions(&mesh) {
            assert!((p.length() - 0.1).abs() < 1e-5);
        }
    }

    #[test]
    fn triangles_wind_outward() {
        let mesh = dodecahedron_mesh(1.0);
        let pos = positions(&mesh);
        let idx: Vec<usize> = mesh.indices().expect("indices").iter().collect();
        for tri in idx.chunks(3) {
            let (a, b, c) = (pos[tri[0]], pos[tri[1]], pos[tri[2]]);
            let n = (b - a).cross(c - a);
            assert!(n.dot(a + b + c) > 0.0, "inward triangle {tri:?}");
        }
    }

    #[test]
    fn pentagon_edges_are_equal() {
        let mesh = dodecahedron_mesh(1.0);
        let pos = positions(&mesh);
        let edge = pos[0].distance(pos[1]);
        for face in pos.chunks(5) {
            for i in 0..5 {
                let e = face[i].distance(face[(i + 1) % 5]);
                assert!((e - edge).abs() < 1e-4, "edge {e} vs {edge}");
            }
        }
    }
}
