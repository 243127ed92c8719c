//! Scene flattening.
//!
//! Walks the node tree, bakes every mesh instance into world space and
//! interns its vertex attributes so that the writers only have to print
//! tables and index lists.

use super::intern::InternTable;
use super::mtl::material_name;
use crate::error::{ExportError, Result};
use crate::scene::{Mesh, Node, Scene};
use crate::types::{Vec3Key, VertexKey};
use glam::{Mat3, Mat4, Vec3};

/// What a face draws, derived from its vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
    Point,
    Line,
    Polygon,
}

impl FaceKind {
    pub fn from_vertex_count(count: usize) -> Self {
        match count {
            1 => FaceKind::Point,
            2 => FaceKind::Line,
            _ => FaceKind::Polygon,
        }
    }

    /// Statement keyword in the geometry file.
    pub fn token(self) -> char {
        match self {
            FaceKind::Point => 'p',
            FaceKind::Line => 'l',
            FaceKind::Polygon => 'f',
        }
    }
}

/// One-based attribute indices of a face corner. 0 means absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: u32,
    pub normal: u32,
    pub texture_coord: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjFace {
    pub kind: FaceKind,
    pub vertices: Vec<FaceVertex>,
}

/// A mesh placed by one node, with world-space attribute references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshInstance {
    pub name: String,
    pub material_name: String,
    pub faces: Vec<ObjFace>,
}

/// State of a single export: interned attributes and flattened instances.
#[derive(Debug, Clone, Default)]
pub struct ExportSession {
    positions: InternTable<VertexKey>,
    normals: InternTable<Vec3Key>,
    texture_coords: InternTable<Vec3Key>,
    meshes: Vec<MeshInstance>,
    uses_vertex_colors: bool,
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten the whole scene below `root_transform`.
    pub fn flatten(scene: &Scene, root_transform: Mat4) -> Result<Self> {
        let mut session = Self::new();
        session.add_node(scene, &scene.root, root_transform)?;
        log::debug!(
            "flattened {} mesh instances: {} positions, {} normals, {} texture coordinates",
            session.meshes.len(),
            session.positions.len(),
            session.normals.len(),
            session.texture_coords.len()
        );
        Ok(session)
    }

    /// Add `node` and its subtree, depth first, parents before children.
    pub fn add_node(&mut self, scene: &Scene, node: &Node, parent_transform: Mat4) -> Result<()> {
        let mut pending: Vec<(&Node, Mat4)> = vec![(node, parent_transform)];

        while let Some((node, parent)) = pending.pop() {
            let world = parent * node.transform;

            for &slot in &node.meshes {
                match scene.mesh(slot) {
                    Some(mesh) => self.add_mesh(scene, &mesh.name, Some(mesh), world)?,
                    None => {
                        log::warn!(
                            "node '{}' references mesh {} which does not exist, using the node name",
                            node.name,
                            slot
                        );
                        self.add_mesh(scene, &node.name, None, world)?;
                    }
                }
            }

            // reversed so the first child is popped first
            pending.extend(node.children.iter().rev().map(|child| (child, world)));
        }

        Ok(())
    }

    fn add_mesh(
        &mut self,
        scene: &Scene,
        name: &str,
        mesh: Option<&Mesh>,
        transform: Mat4,
    ) -> Result<()> {
        let Some(mesh) = mesh else {
            self.meshes.push(MeshInstance {
                name: name.to_string(),
                material_name: String::new(),
                faces: Vec::new(),
            });
            return Ok(());
        };

        if mesh.has_vertex_colors() {
            self.uses_vertex_colors = true;
        }

        let normal_matrix = Mat3::from_mat4(transform);
        let mut faces = Vec::with_capacity(mesh.faces.len());

        for face in &mesh.faces {
            let mut vertices = Vec::with_capacity(face.indices.len());

            for &idx in &face.indices {
                let local = attribute(&mesh.positions, idx, mesh)?;
                let world = transform.transform_point3(local);

                let color = match &mesh.colors {
                    Some(colors) => attribute(colors, idx, mesh)?.truncate(),
                    None => Vec3::ZERO,
                };
                let position = self.positions.index_of(VertexKey::new(world, color));

                let normal = match &mesh.normals {
                    Some(normals) => {
                        let n = normal_matrix * attribute(normals, idx, mesh)?;
                        self.normals.index_of(n.into())
                    }
                    None => 0,
                };

                let texture_coord = match &mesh.texture_coords {
                    Some(coords) => self.texture_coords.index_of(attribute(coords, idx, mesh)?.into()),
                    None => 0,
                };

                vertices.push(FaceVertex {
                    position,
                    normal,
                    texture_coord,
                });
            }

            faces.push(ObjFace {
                kind: FaceKind::from_vertex_count(face.indices.len()),
                vertices,
            });
        }

        log::debug!("added mesh '{}' with {} faces", name, faces.len());

        self.meshes.push(MeshInstance {
            name: name.to_string(),
            material_name: material_name(scene, mesh.material_index),
            faces,
        });
        Ok(())
    }

    /// Interned vertex positions (with colors), in index order.
    pub fn positions(&self) -> &[VertexKey] {
        self.positions.keys()
    }

    pub fn normals(&self) -> &[Vec3Key] {
        self.normals.keys()
    }

    pub fn texture_coords(&self) -> &[Vec3Key] {
        self.texture_coords.keys()
    }

    /// Mesh instances in traversal order.
    pub fn meshes(&self) -> &[MeshInstance] {
        &self.meshes
    }

    /// Set once any flattened mesh carried vertex colors.
    pub fn uses_vertex_colors(&self) -> bool {
        self.uses_vertex_colors
    }
}

fn attribute<T: Copy>(values: &[T], index: u32, mesh: &Mesh) -> Result<T> {
    values
        .get(index as usize)
        .copied()
        .ok_or_else(|| ExportError::VertexIndexOutOfRange {
            mesh: mesh.name.clone(),
            index,
            count: values.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Material;

    fn triangle(name: &str) -> Mesh {
        Mesh::new(name)
            .with_positions([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
            .with_face([0, 1, 2])
    }

    #[test]
    fn test_face_kind_from_count() {
        assert_eq!(FaceKind::from_vertex_count(1), FaceKind::Point);
        assert_eq!(FaceKind::from_vertex_count(2), FaceKind::Line);
        assert_eq!(FaceKind::from_vertex_count(3), FaceKind::Polygon);
        assert_eq!(FaceKind::from_vertex_count(6), FaceKind::Polygon);
        assert_eq!(FaceKind::Line.token(), 'l');
    }

    #[test]
    fn test_missing_mesh_uses_node_name() {
        let scene = Scene::new(Node::new("holder").with_mesh(0).with_mesh(1))
            .with_mesh(triangle("tri"))
            .with_missing_mesh();

        let session = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap();
        let names: Vec<&str> = session.meshes().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["tri", "holder"]);
        assert!(session.meshes()[1].faces.is_empty());
    }

    #[test]
    fn test_out_of_range_slot_uses_node_name() {
        let scene = Scene::new(Node::new("dangling").with_mesh(5));
        let session = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap();
        assert_eq!(session.meshes()[0].name, "dangling");
    }

    #[test]
    fn test_transforms_accumulate_down_the_tree() {
        let scene = Scene::new(
            Node::new("root")
                .with_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)))
                .with_child(
                    Node::new("child")
                        .with_transform(Mat4::from_scale(Vec3::splat(2.0)))
                        .with_mesh(0),
                ),
        )
        .with_mesh(triangle("tri"));

        let session = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap();
        let positions: Vec<Vec3> = session.positions().iter().map(|k| k.position.vec()).collect();
        assert_eq!(
            positions,
            vec![
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(12.0, 0.0, 0.0),
                Vec3::new(10.0, 2.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_traversal_is_pre_order() {
        let scene = Scene::new(
            Node::new("root")
                .with_mesh(0)
                .with_child(Node::new("a").with_mesh(1).with_child(Node::new("a1").with_mesh(2)))
                .with_child(Node::new("b").with_mesh(3)),
        )
        .with_mesh(triangle("root_mesh"))
        .with_mesh(triangle("a_mesh"))
        .with_mesh(triangle("a1_mesh"))
        .with_mesh(triangle("b_mesh"));

        let session = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap();
        let names: Vec<&str> = session.meshes().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["root_mesh", "a_mesh", "a1_mesh", "b_mesh"]);
        // identical world positions are shared
        assert_eq!(session.positions().len(), 3);
    }

    #[test]
    fn test_normals_skip_translation() {
        let scene = Scene::new(
            Node::new("root")
                .with_transform(Mat4::from_translation(Vec3::new(5.0, 5.0, 5.0)))
                .with_mesh(0),
        )
        .with_mesh(triangle("tri").with_normals([[0.0, 0.0, 1.0]; 3]));

        let session = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap();
        assert_eq!(session.normals().len(), 1);
        assert_eq!(session.normals()[0].vec(), Vec3::Z);
        let corner = session.meshes()[0].faces[0].vertices[2];
        assert_eq!(corner.normal, 1);
        assert_eq!(corner.texture_coord, 0);
    }

    #[test]
    fn test_normals_are_not_renormalized() {
        let scene = Scene::new(Node::new("root").with_mesh(0).with_transform(Mat4::from_scale(Vec3::splat(3.0))))
            .with_mesh(triangle("tri").with_normals([[0.0, 1.0, 0.0]; 3]));

        let session = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap();
        assert_eq!(session.normals()[0].vec(), Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_texture_coords_stay_untransformed() {
        let scene = Scene::new(
            Node::new("root")
                .with_transform(Mat4::from_scale(Vec3::splat(4.0)))
                .with_mesh(0),
        )
        .with_mesh(triangle("tri").with_texture_coords([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0]]));

        let session = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap();
        let coords: Vec<Vec3> = session.texture_coords().iter().map(|k| k.vec()).collect();
        assert_eq!(coords, vec![Vec3::ZERO, Vec3::X]);
        let refs: Vec<u32> = session.meshes()[0].faces[0]
            .vertices
            .iter()
            .map(|v| v.texture_coord)
            .collect();
        assert_eq!(refs, vec![1, 2, 2]);
    }

    #[test]
    fn test_vertex_color_flag_is_sticky_and_not_retroactive() {
        let scene = Scene::new(Node::new("root").with_mesh(0).with_mesh(1).with_mesh(2))
            .with_mesh(triangle("plain"))
            .with_mesh(triangle("painted").with_colors([[1.0, 0.0, 0.0, 1.0]; 3]))
            .with_mesh(triangle("plain_again"));

        let session = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap();
        assert!(session.uses_vertex_colors());
        // black copies from the first mesh, red copies from the second
        assert_eq!(session.positions().len(), 6);
        assert_eq!(session.positions()[0].color.vec(), Vec3::ZERO);
        assert_eq!(session.positions()[3].color.vec(), Vec3::X);
        // the third mesh reuses the black keys
        let third: Vec<u32> = session.meshes()[2].faces[0].vertices.iter().map(|v| v.position).collect();
        assert_eq!(third, vec![1, 2, 3]);
    }

    #[test]
    fn test_shared_position_across_meshes() {
        let scene = Scene::new(
            Node::new("root")
                .with_child(Node::new("left").with_mesh(0))
                .with_child(
                    Node::new("right")
                        .with_transform(Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)))
                        .with_mesh(1),
                ),
        )
        .with_mesh(
            Mesh::new("a")
                .with_positions([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]])
                .with_face([0, 1, 2]),
        )
        .with_mesh(
            Mesh::new("b")
                .with_positions([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
                .with_face([0, 1, 2]),
        );

        let session = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap();
        let a = &session.meshes()[0].faces[0].vertices;
        let b = &session.meshes()[1].faces[0].vertices;
        // (1,0,0) in "a" is the origin of "b" moved by +x
        assert_eq!(a[1].position, b[0].position);
        assert_eq!(a[2].position, b[2].position);
        assert_eq!(session.positions().len(), 4);
    }

    #[test]
    fn test_material_names() {
        let scene = Scene::new(Node::new("root").with_mesh(0).with_mesh(1).with_mesh(2))
            .with_mesh(triangle("named").with_material(0))
            .with_mesh(triangle("unnamed").with_material(1))
            .with_mesh(triangle("missing").with_material(9))
            .with_material(Material::new().with_name("wood"))
            .with_material(Material::new());

        let session = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap();
        let names: Vec<&str> = session.meshes().iter().map(|m| m.material_name.as_str()).collect();
        assert_eq!(names, vec!["wood", "$Material_1", ""]);
    }

    #[test]
    fn test_bad_vertex_index_is_an_error() {
        let scene = Scene::new(Node::new("root").with_mesh(0))
            .with_mesh(Mesh::new("broken").with_positions([[0.0, 0.0, 0.0]]).with_face([0, 3]));

        let err = ExportSession::flatten(&scene, Mat4::IDENTITY).unwrap_err();
        assert!(matches!(
            err,
            ExportError::VertexIndexOutOfRange { index: 3, count: 1, .. }
        ));
    }

    #[test]
    fn test_root_transform_applies_first() {
        let scene = Scene::new(Node::new("root").with_mesh(0)).with_mesh(triangle("tri"));
        let session =
            ExportSession::flatten(&scene, Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0))).unwrap();
        assert_eq!(session.positions()[0].position.vec(), Vec3::new(0.0, 0.0, -1.0));
    }
}
