//! Material property storage.
//!
//! A material is an ordered bag of key/value properties. Lookups return the
//! first property stored under a key, so earlier entries shadow later ones.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// The role a texture plays in a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureType {
    Diffuse,
    Ambient,
    Specular,
    Shininess,
    Opacity,
    Height,
    Normals,
}

/// Well-known material property keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKey {
    Name,
    ColorDiffuse,
    ColorAmbient,
    ColorSpecular,
    ColorEmissive,
    ColorTransparent,
    Opacity,
    RefractiveIndex,
    Shininess,
    /// File path of the `index`-th texture of the given kind.
    Texture { kind: TextureType, index: u32 },
}

impl MaterialKey {
    pub fn texture(kind: TextureType) -> Self {
        MaterialKey::Texture { kind, index: 0 }
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialValue {
    /// RGBA color.
    Color(Vec4),
    Float(f32),
    Int(i32),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperty {
    pub key: MaterialKey,
    pub value: MaterialValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(default)]
    pub properties: Vec<MaterialProperty>,
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: MaterialKey, value: MaterialValue) -> Self {
        self.properties.push(MaterialProperty { key, value });
        self
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_property(MaterialKey::Name, MaterialValue::String(name.into()))
    }

    pub fn with_color(self, key: MaterialKey, rgba: [f32; 4]) -> Self {
        self.with_property(key, MaterialValue::Color(Vec4::from_array(rgba)))
    }

    pub fn with_float(self, key: MaterialKey, value: f32) -> Self {
        self.with_property(key, MaterialValue::Float(value))
    }

    pub fn with_texture(self, kind: TextureType, path: impl Into<String>) -> Self {
        self.with_property(MaterialKey::texture(kind), MaterialValue::String(path.into()))
    }

    fn get(&self, key: MaterialKey) -> Option<&MaterialValue> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| &p.value)
    }

    /// Color stored under `key`, if that property exists and holds a color.
    pub fn color(&self, key: MaterialKey) -> Option<Vec4> {
        match self.get(key)? {
            MaterialValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Scalar stored under `key`. Integer properties convert to float.
    pub fn float(&self, key: MaterialKey) -> Option<f32> {
        match self.get(key)? {
            MaterialValue::Float(v) => Some(*v),
            MaterialValue::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    pub fn string(&self, key: MaterialKey) -> Option<&str> {
        match self.get(key)? {
            MaterialValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Display name of the material.
    pub fn name(&self) -> Option<&str> {
        self.string(MaterialKey::Name)
    }

    /// Path of the first texture of the given kind.
    pub fn texture(&self, kind: TextureType) -> Option<&str> {
        self.string(MaterialKey::texture(kind))
    }
}
