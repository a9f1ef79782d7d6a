//! Surface materials and colours

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// RGBA colour with components in 0..1
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Colour {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Opaque colour from RGB components
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 3]> for Colour {
    fn from(c: [f32; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }
}

/// A named surface description
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse: Colour,
    pub specular: Colour,
    /// Second colour of a UV checker pattern; `None` for a flat surface
    pub checker: Option<Colour>,
}

impl Material {
    pub fn solid(name: impl Into<String>, diffuse: Colour) -> Self {
        Self {
            name: name.into(),
            diffuse,
            specular: Colour::BLACK,
            checker: None,
        }
    }

    pub fn with_checker(mut self, colour: Colour) -> Self {
        self.checker = Some(colour);
        self
    }

    pub fn with_specular(mut self, colour: Colour) -> Self {
        self.specular = colour;
        self
    }
}

/// Registry of materials by name
#[derive(Clone, Debug)]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
}

impl MaterialLibrary {
    /// Material every lookup falls back to
    pub const DEFAULT: &'static str = "BaseWhite";
    pub const ROCKWALL: &'static str = "Examples/Rockwall";

    /// Library with the built-in materials
    pub fn new() -> Self {
        let mut materials = HashMap::new();
        materials.insert(
            Self::DEFAULT.to_string(),
            Material::solid(Self::DEFAULT, Colour::WHITE),
        );
        materials.insert(
            Self::ROCKWALL.to_string(),
            Material::solid(Self::ROCKWALL, Colour::rgb(0.55, 0.5, 0.45))
                .with_checker(Colour::rgb(0.36, 0.33, 0.3))
                .with_specular(Colour::rgb(0.1, 0.1, 0.1)),
        );
        Self { materials }
    }

    /// Add or replace a material
    pub fn insert(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Name to actually use for `name`: itself if known, otherwise the default
    pub fn resolve_name<'a>(&self, name: &'a str) -> &'a str {
        if self.materials.contains_key(name) {
            name
        } else {
            log::warn!(
                "Material '{}' not found, using '{}'",
                name,
                Self::DEFAULT
            );
            Self::DEFAULT
        }
    }

    /// Look up a material, falling back to the default
    pub fn get_or_default(&self, name: &str) -> &Material {
        self.materials
            .get(name)
            .or_else(|| self.materials.get(Self::DEFAULT))
            .unwrap_or(&FALLBACK)
    }
}

static FALLBACK: Material = Material {
    name: String::new(),
    diffuse: Colour::WHITE,
    specular: Colour::BLACK,
    checker: None,
};

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_materials() {
        let lib = MaterialLibrary::new();
        assert!(lib.contains("BaseWhite"));
        assert!(lib.get("Examples/Rockwall").is_some_and(|m| m.checker.is_some()));
    }

    #[test]
    fn test_unknown_material_falls_back() {
        let lib = MaterialLibrary::new();
        assert_eq!(lib.resolve_name("Examples/Missing"), "BaseWhite");
        assert_eq!(lib.resolve_name("Examples/Rockwall"), "Examples/Rockwall");
        assert_eq!(lib.get_or_default("nope").name, "BaseWhite");
    }
}
