//! Lights attached to scene nodes
//!
//! Position and direction come from the node: a light shines along the
//! node's local -Z axis.

use crate::Colour;

/// What kind of light this is
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Radiates in all directions from the node position
    Point,
    /// Parallel rays along the node direction
    Directional,
    /// Cone along the node direction
    Spotlight {
        /// Inner cone angle in radians (full intensity)
        inner: f32,
        /// Outer cone angle in radians (falls to zero)
        outer: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    pub diffuse: Colour,
    pub specular: Colour,
    pub cast_shadows: bool,
}

impl Light {
    /// White point light
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LightKind::Point,
            diffuse: Colour::WHITE,
            specular: Colour::WHITE,
            cast_shadows: true,
        }
    }

    pub fn with_kind(mut self, kind: LightKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_diffuse(mut self, colour: Colour) -> Self {
        self.diffuse = colour;
        self
    }

    pub fn with_specular(mut self, colour: Colour) -> Self {
        self.specular = colour;
        self
    }

    /// Set the cone for a spotlight; ignored for other kinds
    pub fn set_spotlight_range(&mut self, inner: f32, outer: f32) {
        if let LightKind::Spotlight { .. } = self.kind {
            self.kind = LightKind::Spotlight { inner, outer };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spotlight_range_only_applies_to_spotlights() {
        let mut point = Light::new("p");
        point.set_spotlight_range(0.1, 0.2);
        assert_eq!(point.kind, LightKind::Point);

        let mut spot = Light::new("s").with_kind(LightKind::Spotlight { inner: 0.0, outer: 0.0 });
        spot.set_spotlight_range(0.6, 0.9);
        assert_eq!(spot.kind, LightKind::Spotlight { inner: 0.6, outer: 0.9 });
    }
}
