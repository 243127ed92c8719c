//! # Scene OBJ Exporter
//!
//! A Rust library for writing in-memory 3D scene graphs as Wavefront OBJ
//! geometry plus an MTL material library.
//!
//! ## Overview
//!
//! The exporter walks the node hierarchy, bakes every mesh instance into
//! world space, deduplicates positions, normals and texture coordinates
//! across the whole scene and writes face records against the shared
//! one-based indices.
//!
//! ## Quick Start
//!
//! ```ignore
//! use scene_obj_exporter::{export_obj, ExportConfig, Mesh, Node, Scene};
//!
//! let scene = Scene::new(Node::new("root").with_mesh(0)).with_mesh(
//!     Mesh::new("triangle")
//!         .with_positions([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
//!         .with_face([0, 1, 2]),
//! );
//!
//! let output = export_obj("triangle.obj", &scene, false, &ExportConfig::default())?;
//! println!("{}", output.obj);
//! ```
//!
//! ## Writing Files
//!
//! The file-writing entry points go through an [`IoSystem`], so the same
//! export can target disk or memory:
//!
//! ```ignore
//! use scene_obj_exporter::{export_scene, ExportConfig, FileSystem};
//!
//! export_scene("obj", "out/scene.obj", &mut FileSystem::new(), &scene, &ExportConfig::default())?;
//! ```

pub mod error;
pub mod types;
pub mod scene;
pub mod export;

// Re-export main types for convenience
pub use error::{ExportError, Result};
pub use types::{Vec3Key, VertexKey};
pub use scene::{Face, Material, MaterialKey, MaterialValue, Mesh, Node, Scene, TextureType};
pub use export::{
    export_obj, export_scene, export_scene_obj, export_scene_obj_no_mtl, find_format, formats,
    ExportConfig, ExportSession, FileSystem, IoSystem, MemoryIoSystem, ObjExporter, ObjOutput,
};

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<std::path::Path>>(path: P) -> Result<Scene> {
    let json = std::fs::read_to_string(path)?;
    Scene::from_json(&json)
}

#[cfg(feature = "wasm")]
pub mod wasm;
