//! In-memory scene graph consumed by the exporters.
//!
//! The scene is read-only input: a tree of [`Node`]s carrying local
//! transforms and references into the scene-wide mesh array, plus the
//! material array those meshes point into.

pub mod material;

pub use material::{Material, MaterialKey, MaterialProperty, MaterialValue, TextureType};

use crate::error::Result;
use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A complete scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Root of the node hierarchy.
    pub root: Node,
    /// Scene-wide mesh array. `None` marks a slot that resolves to no mesh.
    #[serde(default)]
    pub meshes: Vec<Option<Mesh>>,
    /// Scene-wide material array, indexed by [`Mesh::material_index`].
    #[serde(default)]
    pub materials: Vec<Material>,
}

impl Scene {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            meshes: Vec::new(),
            materials: Vec::new(),
        }
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.meshes.push(Some(mesh));
        self
    }

    /// Append an empty mesh slot.
    pub fn with_missing_mesh(mut self) -> Self {
        self.meshes.push(None);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.push(material);
        self
    }

    /// Look up a mesh slot. Out-of-range indices and empty slots both yield `None`.
    pub fn mesh(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index).and_then(Option::as_ref)
    }

    pub fn material(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    /// Parse a scene from its JSON description.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the scene to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A node in the scene hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub name: String,
    /// Transform relative to the parent node.
    #[serde(default)]
    pub transform: Mat4,
    #[serde(default)]
    pub children: Vec<Node>,
    /// Indices into [`Scene::meshes`].
    #[serde(default)]
    pub meshes: Vec<usize>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            children: Vec::new(),
            meshes: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, index: usize) -> Self {
        self.meshes.push(index);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

/// A polygon, line or point given by indices into the mesh's vertex arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Face {
    pub indices: Vec<u32>,
}

impl Face {
    pub fn new(indices: impl Into<Vec<u32>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }
}

/// Mesh geometry in node-local space.
///
/// Attribute arrays are parallel to `positions`. Only the first texture
/// coordinate and color channel are carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    #[serde(default)]
    pub name: String,
    pub positions: Vec<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normals: Option<Vec<Vec3>>,
    /// Texture coordinates, three components each.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_coords: Option<Vec<Vec3>>,
    /// Vertex colors (RGBA).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<Vec4>>,
    #[serde(default)]
    pub faces: Vec<Face>,
    /// Index into [`Scene::materials`].
    #[serde(default)]
    pub material_index: usize,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_positions(mut self, positions: impl IntoIterator<Item = [f32; 3]>) -> Self {
        self.positions = positions.into_iter().map(Vec3::from_array).collect();
        self
    }

    pub fn with_normals(mut self, normals: impl IntoIterator<Item = [f32; 3]>) -> Self {
        self.normals = Some(normals.into_iter().map(Vec3::from_array).collect());
        self
    }

    pub fn with_texture_coords(mut self, coords: impl IntoIterator<Item = [f32; 3]>) -> Self {
        self.texture_coords = Some(coords.into_iter().map(Vec3::from_array).collect());
        self
    }

    pub fn with_colors(mut self, colors: impl IntoIterator<Item = [f32; 4]>) -> Self {
        self.colors = Some(colors.into_iter().map(Vec4::from_array).collect());
        self
    }

    pub fn with_face(mut self, indices: impl Into<Vec<u32>>) -> Self {
        self.faces.push(Face::new(indices));
        self
    }

    pub fn with_material(mut self, index: usize) -> Self {
        self.material_index = index;
        self
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn has_texture_coords(&self) -> bool {
        self.texture_coords.is_some()
    }

    pub fn has_vertex_colors(&self) -> bool {
        self.colors.is_some()
    }
}
