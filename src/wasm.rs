//! WASM bindings for scene-obj-exporter.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// OBJ and MTL text produced by an export.
#[wasm_bindgen]
pub struct ObjExportResult {
    obj: String,
    mtl: String,
}

#[wasm_bindgen]
impl ObjExportResult {
    #[wasm_bindgen(getter)]
    pub fn obj(&self) -> String {
        self.obj.clone()
    }

    /// Empty when materials were suppressed.
    #[wasm_bindgen(getter)]
    pub fn mtl(&self) -> String {
        self.mtl.clone()
    }
}

/// Export a JSON scene description to OBJ text.
///
/// `file_name` is the geometry file name the `mtllib` reference is derived from.
#[wasm_bindgen]
pub fn export_obj_from_json(
    scene_json: &str,
    file_name: &str,
    no_mtl: bool,
) -> Result<ObjExportResult, JsError> {
    let scene = crate::Scene::from_json(scene_json).map_err(|e| JsError::new(&e.to_string()))?;
    let output = crate::export_obj(file_name, &scene, no_mtl, &crate::ExportConfig::default())
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(ObjExportResult {
        obj: output.obj,
        mtl: output.mtl,
    })
}
