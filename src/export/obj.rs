//! Wavefront OBJ export.
//!
//! The scene is flattened into world space first: every node's mesh
//! references become mesh instances whose positions, normals and texture
//! coordinates are deduplicated across the whole scene. The geometry file
//! then lists each attribute table once and writes per-instance face
//! records against those global one-based indices. Materials go to a
//! companion MTL file named after the geometry file.

use super::flatten::{ExportSession, FaceKind, ObjFace};
use super::format::{write_header, RealFormat};
use super::io::IoSystem;
use super::mtl::write_materials;
use super::ExportConfig;
use crate::error::{ExportError, Result};
use crate::scene::Scene;
use std::fmt::{self, Write};
use std::io::Write as _;

/// Extension of the companion material library.
pub const MATERIAL_EXTENSION: &str = ".mtl";

/// Path of the material library that accompanies the geometry file at `path`.
///
/// The geometry file's extension is replaced; a path without one simply
/// gets the material extension appended.
pub fn material_lib_file_name(path: &str) -> String {
    let file_start = path.rfind(|c: char| c == '/' || c == '\\').map_or(0, |i| i + 1);
    match path[file_start..].rfind('.') {
        Some(dot) => format!("{}{}", &path[..file_start + dot], MATERIAL_EXTENSION),
        None => format!("{}{}", path, MATERIAL_EXTENSION),
    }
}

/// Bare file name of the material library, as referenced by `mtllib`.
pub fn material_lib_name(path: &str) -> String {
    let lib = material_lib_file_name(path);
    match lib.rfind(|c: char| c == '/' || c == '\\') {
        Some(sep) => lib[sep + 1..].to_string(),
        None => lib,
    }
}

/// Render the geometry file for a flattened session.
///
/// `material_lib` names the library to reference; `None` suppresses both
/// the `mtllib` and the `usemtl` statements.
pub fn write_geometry(
    session: &ExportSession,
    material_lib: Option<&str>,
    config: &ExportConfig,
) -> std::result::Result<String, fmt::Error> {
    let fmt = RealFormat::new(config.precision);

    // Rough pre-size: ~40 bytes per attribute line, ~12 per face corner
    let corners: usize = session
        .meshes()
        .iter()
        .flat_map(|m| &m.faces)
        .map(|f| f.vertices.len() + 1)
        .sum();
    let lines = session.positions().len() + session.normals().len() + session.texture_coords().len();
    let mut out = String::with_capacity(256 + lines * 40 + corners * 12);

    write_header(&mut out, config)?;
    if let Some(lib) = material_lib {
        writeln!(out, "mtllib {}", lib)?;
        writeln!(out)?;
    }

    let positions = session.positions();
    if session.uses_vertex_colors() {
        writeln!(out, "# {} vertex positions and colors", positions.len())?;
        for v in positions {
            let (p, c) = (v.position.vec(), v.color.vec());
            writeln!(out, "v  {} {}", fmt.triple(p.x, p.y, p.z), fmt.triple(c.x, c.y, c.z))?;
        }
    } else {
        writeln!(out, "# {} vertex positions", positions.len())?;
        for v in positions {
            let p = v.position.vec();
            writeln!(out, "v  {}", fmt.triple(p.x, p.y, p.z))?;
        }
    }
    writeln!(out)?;

    writeln!(out, "# {} UV coordinates", session.texture_coords().len())?;
    for t in session.texture_coords() {
        let t = t.vec();
        writeln!(out, "vt {}", fmt.triple(t.x, t.y, t.z))?;
    }
    writeln!(out)?;

    writeln!(out, "# {} vertex normals", session.normals().len())?;
    for n in session.normals() {
        let n = n.vec();
        writeln!(out, "vn {}", fmt.triple(n.x, n.y, n.z))?;
    }
    writeln!(out)?;

    for mesh in session.meshes() {
        writeln!(out, "# Mesh '{}' with {} faces", mesh.name, mesh.faces.len())?;
        if !mesh.name.is_empty() {
            writeln!(out, "g {}", mesh.name)?;
        }
        if material_lib.is_some() {
            writeln!(out, "usemtl {}", mesh.material_name)?;
        }
        for face in &mesh.faces {
            write_face(&mut out, face)?;
        }
        writeln!(out)?;
    }

    Ok(out)
}

/// One `f`, `l` or `p` statement.
///
/// Only polygons carry attribute references: `v/vt/vn`, `v//vn` or `v/vt`
/// depending on which indices exist, and a bare `v` when neither does.
fn write_face(out: &mut String, face: &ObjFace) -> fmt::Result {
    write!(out, "{} ", face.kind.token())?;
    for fv in &face.vertices {
        write!(out, " {}", fv.position)?;
        if face.kind != FaceKind::Polygon || (fv.texture_coord == 0 && fv.normal == 0) {
            continue;
        }
        out.push('/');
        if fv.texture_coord != 0 {
            write!(out, "{}", fv.texture_coord)?;
        }
        if fv.normal != 0 {
            write!(out, "/{}", fv.normal)?;
        }
    }
    writeln!(out)
}

/// Rendered OBJ and MTL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjOutput {
    pub obj: String,
    /// Empty when material output was suppressed.
    pub mtl: String,
}

/// Builds the geometry and material text for one scene.
#[derive(Debug, Clone)]
pub struct ObjExporter {
    path: String,
    geometry: String,
    material: String,
}

impl ObjExporter {
    /// Flatten `scene` and render both files for the geometry destination `path`.
    pub fn new(path: &str, scene: &Scene, no_mtl: bool, config: &ExportConfig) -> Result<Self> {
        let session = ExportSession::flatten(scene, config.root_transform)?;
        let creation_failed = || ExportError::OutputCreation {
            path: path.to_string(),
        };

        let lib = material_lib_name(path);
        let material_lib = if no_mtl { None } else { Some(lib.as_str()) };
        let geometry =
            write_geometry(&session, material_lib, config).map_err(|_| creation_failed())?;
        let material = if no_mtl {
            String::new()
        } else {
            write_materials(scene, config).map_err(|_| creation_failed())?
        };

        if let Some(limit) = config.max_output_bytes {
            if geometry.len() > limit || material.len() > limit {
                return Err(creation_failed());
            }
        }

        Ok(Self {
            path: path.to_string(),
            geometry,
            material,
        })
    }

    pub fn geometry(&self) -> &str {
        &self.geometry
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn material_lib_file_name(&self) -> String {
        material_lib_file_name(&self.path)
    }

    pub fn material_lib_name(&self) -> String {
        material_lib_name(&self.path)
    }

    pub fn into_output(self) -> ObjOutput {
        ObjOutput {
            obj: self.geometry,
            mtl: self.material,
        }
    }
}

/// Render a scene to OBJ (and MTL unless `no_mtl`) text.
pub fn export_obj(path: &str, scene: &Scene, no_mtl: bool, config: &ExportConfig) -> Result<ObjOutput> {
    Ok(ObjExporter::new(path, scene, no_mtl, config)?.into_output())
}

/// Export `scene` to `path` and its material library next to it.
///
/// Nothing is written if the text cannot be produced. A material file
/// failure leaves the already written geometry file in place.
pub fn export_scene_obj(
    path: &str,
    io: &mut dyn IoSystem,
    scene: &Scene,
    config: &ExportConfig,
) -> Result<()> {
    let exporter = ObjExporter::new(path, scene, false, config)?;

    write_destination(io, path, exporter.geometry(), |source| ExportError::OpenGeometry {
        path: path.to_string(),
        source,
    })?;

    let mtl_path = exporter.material_lib_file_name();
    write_destination(io, &mtl_path, exporter.material(), |source| {
        ExportError::OpenMaterial {
            path: mtl_path.clone(),
            source,
        }
    })
}

/// Export `scene` to `path` without a material library.
pub fn export_scene_obj_no_mtl(
    path: &str,
    io: &mut dyn IoSystem,
    scene: &Scene,
    config: &ExportConfig,
) -> Result<()> {
    let exporter = ObjExporter::new(path, scene, true, config)?;

    write_destination(io, path, exporter.geometry(), |source| ExportError::OpenGeometry {
        path: path.to_string(),
        source,
    })
}

fn write_destination(
    io: &mut dyn IoSystem,
    path: &str,
    contents: &str,
    open_error: impl FnOnce(std::io::Error) -> ExportError,
) -> Result<()> {
    let mut out = io.open_write(path).map_err(open_error)?;
    out.write_all(contents.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|source| ExportError::Write {
            path: path.to_string(),
            source,
        })?;
    log::info!("wrote {} bytes to {}", contents.len(), path);
    Ok(())
}
