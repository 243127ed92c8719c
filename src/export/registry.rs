//! Registered export formats.
//!
//! Each entry ties a format id to its export function, the file extension
//! it produces and the scene preparation it expects the caller to have run.

use super::io::IoSystem;
use super::obj::{export_scene_obj, export_scene_obj_no_mtl};
use super::ExportConfig;
use crate::error::{ExportError, Result};
use crate::scene::Scene;
use std::ops::BitOr;

/// Scene preparation steps, as a bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PostProcessSteps(u32);

impl PostProcessSteps {
    pub const NONE: Self = Self(0);
    pub const TRIANGULATE: Self = Self(1 << 0);
    pub const GEN_NORMALS: Self = Self(1 << 1);
    pub const GEN_SMOOTH_NORMALS: Self = Self(1 << 2);
    pub const PRE_TRANSFORM_VERTICES: Self = Self(1 << 3);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for PostProcessSteps {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Signature shared by all registered exporters.
pub type ExportFn = fn(&str, &mut dyn IoSystem, &Scene, &ExportConfig) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct ExportFormatEntry {
    pub id: &'static str,
    pub description: &'static str,
    /// Extension of the primary output file, without the dot.
    pub file_extension: &'static str,
    pub export: ExportFn,
    /// Steps the scene should have been through before export.
    pub required_steps: PostProcessSteps,
}

static FORMATS: [ExportFormatEntry; 2] = [
    ExportFormatEntry {
        id: "obj",
        description: "Wavefront OBJ format",
        file_extension: "obj",
        export: export_scene_obj,
        required_steps: PostProcessSteps::GEN_SMOOTH_NORMALS,
    },
    ExportFormatEntry {
        id: "objnomtl",
        description: "Wavefront OBJ format without material file",
        file_extension: "obj",
        export: export_scene_obj_no_mtl,
        required_steps: PostProcessSteps::GEN_SMOOTH_NORMALS,
    },
];

/// All registered formats.
pub fn formats() -> &'static [ExportFormatEntry] {
    &FORMATS
}

pub fn find_format(id: &str) -> Option<&'static ExportFormatEntry> {
    FORMATS.iter().find(|f| f.id == id)
}

/// Export `scene` to `path` with the format registered as `id`.
pub fn export_scene(
    id: &str,
    path: &str,
    io: &mut dyn IoSystem,
    scene: &Scene,
    config: &ExportConfig,
) -> Result<()> {
    let format = find_format(id).ok_or_else(|| ExportError::UnknownFormat(id.to_string()))?;
    log::debug!("exporting {} as '{}' ({})", path, format.id, format.description);
    (format.export)(path, io, scene, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::io::MemoryIoSystem;
    use crate::scene::{Mesh, Node};

    fn scene() -> Scene {
        Scene::new(Node::new("root").with_mesh(0)).with_mesh(
            Mesh::new("tri")
                .with_positions([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
                .with_face([0, 1, 2]),
        )
    }

    #[test]
    fn test_registered_ids() {
        let ids: Vec<&str> = formats().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["obj", "objnomtl"]);
        for format in formats() {
            assert_eq!(format.file_extension, "obj");
            assert!(format.required_steps.contains(PostProcessSteps::GEN_SMOOTH_NORMALS));
            assert!(!format.required_steps.contains(PostProcessSteps::TRIANGULATE));
        }
    }

    #[test]
    fn test_step_flags() {
        let steps = PostProcessSteps::TRIANGULATE | PostProcessSteps::GEN_NORMALS;
        assert_eq!(steps.bits(), 0b11);
        assert!(steps.contains(PostProcessSteps::GEN_NORMALS));
        assert!(!steps.contains(PostProcessSteps::PRE_TRANSFORM_VERTICES));
        assert!(PostProcessSteps::NONE.is_empty());
    }

    #[test]
    fn test_dispatch_by_id() {
        let config = ExportConfig::default();

        let mut io = MemoryIoSystem::new();
        export_scene("obj", "a.obj", &mut io, &scene(), &config).unwrap();
        assert_eq!(io.len(), 2);

        let mut io = MemoryIoSystem::new();
        export_scene("objnomtl", "a.obj", &mut io, &scene(), &config).unwrap();
        assert_eq!(io.paths().collect::<Vec<_>>(), vec!["a.obj"]);
    }

    #[test]
    fn test_unknown_format() {
        let mut io = MemoryIoSystem::new();
        let err = export_scene("stl", "a.stl", &mut io, &scene(), &ExportConfig::default()).unwrap_err();
        assert!(matches!(err, ExportError::UnknownFormat(ref id) if id == "stl"));
    }
}
