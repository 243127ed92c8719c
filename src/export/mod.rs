//! Scene export.
//!
//! [`flatten`] turns the scene graph into world-space mesh instances with
//! deduplicated attributes, [`obj`] and [`mtl`] render the text files, and
//! [`registry`] maps format ids to the entry points.

pub mod flatten;
pub mod format;
pub mod intern;
pub mod io;
pub mod mtl;
pub mod obj;
pub mod registry;

pub use flatten::{ExportSession, FaceKind, FaceVertex, MeshInstance, ObjFace};
pub use intern::InternTable;
pub use io::{FileSystem, IoSystem, MemoryIoSystem};
pub use obj::{export_obj, export_scene_obj, export_scene_obj_no_mtl, ObjExporter, ObjOutput};
pub use registry::{export_scene, find_format, formats, ExportFormatEntry, PostProcessSteps};

use glam::Mat4;

/// Export configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Product named in the header comment of both files.
    pub product_name: String,
    /// Short tool name printed next to the version.
    pub short_name: String,
    /// Major, minor, revision.
    pub version: [u32; 3],
    /// Fractional digits for reals. `None` writes the shortest exact form.
    pub precision: Option<usize>,
    /// Largest accepted size of either output text, in bytes.
    pub max_output_bytes: Option<usize>,
    /// Transform applied above the scene's root node.
    pub root_transform: Mat4,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            product_name: "Scene OBJ Exporter".to_string(),
            short_name: env!("CARGO_PKG_NAME").to_string(),
            version: [
                env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
                env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
                env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
            ],
            precision: None,
            max_output_bytes: None,
            root_transform: Mat4::IDENTITY,
        }
    }
}

impl ExportConfig {
    /// Identify a different product in the file headers.
    pub fn with_product(
        mut self,
        product_name: impl Into<String>,
        short_name: impl Into<String>,
        version: [u32; 3],
    ) -> Self {
        self.product_name = product_name.into();
        self.short_name = short_name.into();
        self.version = version;
        self
    }

    pub fn with_precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }

    pub fn with_max_output_bytes(mut self, limit: usize) -> Self {
        self.max_output_bytes = Some(limit);
        self
    }

    pub fn with_root_transform(mut self, transform: Mat4) -> Self {
        self.root_transform = transform;
        self
    }
}
