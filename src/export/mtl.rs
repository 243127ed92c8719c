//! Wavefront MTL material library writer.

use super::format::{write_header, RealFormat};
use super::ExportConfig;
use crate::scene::{Material, MaterialKey, Scene, TextureType};
use std::fmt::{self, Write};

/// Name under which the material at `index` is written and referenced.
///
/// Materials without a stored name get `$Material_<index>`; an index with
/// no material behind it yields an empty name.
pub fn material_name(scene: &Scene, index: usize) -> String {
    match scene.material(index) {
        Some(material) => match material.name() {
            Some(name) => name.to_string(),
            None => format!("$Material_{}", index),
        },
        None => String::new(),
    }
}

/// Render the material library for every material in the scene.
pub fn write_materials(scene: &Scene, config: &ExportConfig) -> Result<String, fmt::Error> {
    let fmt = RealFormat::new(config.precision);
    let mut out = String::with_capacity(128 + scene.materials.len() * 256);

    write_header(&mut out, config)?;

    for (index, material) in scene.materials.iter().enumerate() {
        writeln!(out, "newmtl {}", material_name(scene, index))?;
        write_material(&mut out, material, fmt)?;
        writeln!(out)?;
    }

    Ok(out)
}

fn write_material(out: &mut String, mat: &Material, fmt: RealFormat) -> fmt::Result {
    let colors = [
        (MaterialKey::ColorDiffuse, "Kd"),
        (MaterialKey::ColorAmbient, "Ka"),
        (MaterialKey::ColorSpecular, "Ks"),
        (MaterialKey::ColorEmissive, "Ke"),
        (MaterialKey::ColorTransparent, "Tf"),
    ];
    for (key, token) in colors {
        if let Some(c) = mat.color(key) {
            writeln!(out, "{} {}", token, fmt.triple(c.x, c.y, c.z))?;
        }
    }

    if let Some(opacity) = mat.float(MaterialKey::Opacity) {
        writeln!(out, "d {}", fmt.real(opacity))?;
    }
    if let Some(ior) = mat.float(MaterialKey::RefractiveIndex) {
        writeln!(out, "Ni {}", fmt.real(ior))?;
    }

    let mut illum = 1;
    if let Some(shininess) = mat.float(MaterialKey::Shininess).filter(|s| *s != 0.0) {
        writeln!(out, "Ns {}", fmt.real(shininess))?;
        illum = 2;
    }
    writeln!(out, "illum {}", illum)?;

    let maps = [
        (TextureType::Diffuse, "map_Kd"),
        (TextureType::Ambient, "map_Ka"),
        (TextureType::Specular, "map_Ks"),
        (TextureType::Shininess, "map_Ns"),
        (TextureType::Opacity, "map_d"),
    ];
    for (kind, token) in maps {
        if let Some(path) = mat.texture(kind) {
            writeln!(out, "{} {}", token, path)?;
        }
    }

    // Readers disagree on the bump keyword, so both are written.
    if let Some(path) = mat
        .texture(TextureType::Height)
        .or_else(|| mat.texture(TextureType::Normals))
    {
        writeln!(out, "bump {}", path)?;
        writeln!(out, "map_bump {}", path)?;
    }

    Ok(())
}
