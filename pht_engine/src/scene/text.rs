/// Text component and text rendering properties.
///
/// A text object renders as up to four queue entries: optional second
/// shadow, shadow and specular passes, then exactly one main pass whose
/// kind follows the gradient options.

use std::fmt;
use std::sync::Arc;
use bitflags::bitflags;
use glam::{Vec2, Vec4};
use crate::renderer::Material;

bitflags! {
    /// Optional effects requested by a text object
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextEffects: u32 {
        /// Drop shadow drawn under the text
        const SHADOW        = 1 << 0;
        /// Second, further offset shadow drawn under the first
        const SECOND_SHADOW = 1 << 1;
        /// Specular highlight pass
        const SPECULAR      = 1 << 2;
        /// Gradient toward the top edge of the glyphs
        const GRADIENT_TOP  = 1 << 3;
        /// Gradient through the middle of the glyphs
        const GRADIENT_MID  = 1 << 4;
    }
}

/// Which pass of a text object a render queue entry draws.
///
/// Declaration order is the sort-key ordinal: under a descending key
/// tie-break one object's passes come out as second shadow, shadow,
/// specular, then the main pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextKind {
    /// Main pass, flat color
    Text,
    /// Main pass, top gradient
    GradientTop,
    /// Main pass, middle gradient
    GradientMid,
    /// Main pass, top and middle gradients
    GradientTopMid,
    /// Specular highlight pass
    Specular,
    /// Shadow pass
    Shadow,
    /// Second shadow pass
    SecondShadow,
}

impl TextKind {
    /// Whether this is the main (glyph color) pass
    pub fn is_main_pass(self) -> bool {
        matches!(
            self,
            TextKind::Text | TextKind::GradientTop | TextKind::GradientMid | TextKind::GradientTopMid
        )
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Text rendering properties
#[derive(Clone)]
pub struct TextProperties {
    /// Font material (glyph atlas + text shader)
    pub font: Arc<dyn Material>,
    /// Glyph height in world units
    pub size: f32,
    /// Main glyph color
    pub color: Vec4,
    pub alignment: TextAlignment,
    pub effects: TextEffects,
    pub shadow_color: Vec4,
    pub shadow_offset: Vec2,
    pub second_shadow_color: Vec4,
    pub second_shadow_offset: Vec2,
    pub specular_color: Vec4,
    pub gradient_top_color: Vec4,
    pub gradient_mid_color: Vec4,
}

impl TextProperties {
    /// White, left-aligned, size 1, no effects
    pub fn new(font: Arc<dyn Material>) -> Self {
        Self {
            font,
            size: 1.0,
            color: Vec4::ONE,
            alignment: TextAlignment::Left,
            effects: TextEffects::empty(),
            shadow_color: Vec4::new(0.0, 0.0, 0.0, 0.5),
            shadow_offset: Vec2::new(0.05, -0.05),
            second_shadow_color: Vec4::new(0.0, 0.0, 0.0, 0.25),
            second_shadow_offset: Vec2::new(0.1, -0.1),
            specular_color: Vec4::ONE,
            gradient_top_color: Vec4::ONE,
            gradient_mid_color: Vec4::ONE,
        }
    }

    /// Kind of the main pass, picked from the gradient options
    pub fn main_pass_kind(&self) -> TextKind {
        let top = self.effects.contains(TextEffects::GRADIENT_TOP);
        let mid = self.effects.contains(TextEffects::GRADIENT_MID);
        match (top, mid) {
            (true, true) => TextKind::GradientTopMid,
            (true, false) => TextKind::GradientTop,
            (false, true) => TextKind::GradientMid,
            (false, false) => TextKind::Text,
        }
    }

    /// Passes this text renders with, in emission order
    pub fn pass_kinds(&self) -> impl Iterator<Item = TextKind> + '_ {
        [
            (TextEffects::SECOND_SHADOW, TextKind::SecondShadow),
            (TextEffects::SHADOW, TextKind::Shadow),
            (TextEffects::SPECULAR, TextKind::Specular),
        ]
        .into_iter()
        .filter(|(effect, _)| self.effects.contains(*effect))
        .map(|(_, kind)| kind)
        .chain(std::iter::once(self.main_pass_kind()))
    }
}

impl fmt::Debug for TextProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextProperties")
            .field("font_material_id", &self.font.material_id())
            .field("size", &self.size)
            .field("color", &self.color)
            .field("alignment", &self.alignment)
            .field("effects", &self.effects)
            .finish_non_exhaustive()
    }
}

/// Text carried by a scene object
#[derive(Debug, Clone)]
pub struct TextComponent {
    text: String,
    properties: TextProperties,
}

impl TextComponent {
    pub fn new(text: &str, properties: TextProperties) -> Self {
        Self {
            text: text.to_string(),
            properties,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    pub fn properties(&self) -> &TextProperties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut TextProperties {
        &mut self.properties
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
