/// Transform - local position/scale/rotation of a scene object.
///
/// Rotation is stored as Euler angles in degrees. Every mutator raises the
/// `has_changed` flag; the scene graph clears it once the owning object's
/// world matrix has been recomputed.

use glam::{Mat3, Mat4, Vec3};

/// Local affine state of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    position: Vec3,
    scale: Vec3,
    /// Euler angles in degrees
    rotation: Vec3,
    has_changed: bool,
}

impl Transform {
    /// Identity transform. Starts flagged as changed so the first
    /// propagation pass computes a world matrix for it.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            has_changed: true,
        }
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Euler angles in degrees
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Whether a mutator ran since the flag was last cleared
    pub fn has_changed(&self) -> bool {
        self.has_changed
    }

    pub(crate) fn clear_changed(&mut self) {
        self.has_changed = false;
    }

    /// Force the next propagation pass to recompute the owner's world matrix
    pub(crate) fn mark_changed(&mut self) {
        self.has_changed = true;
    }

    // ===== ABSOLUTE SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.has_changed = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.has_changed = true;
    }

    /// Set the same scale factor on all three axes
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.set_scale(Vec3::splat(scale));
    }

    /// Set Euler angles in degrees
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.has_changed = true;
    }

    // ===== RELATIVE MUTATORS =====

    /// Add `delta` to the position
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.has_changed = true;
    }

    /// Multiply the scale component-wise by `factor`
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.has_changed = true;
    }

    /// Add `delta` degrees to the Euler angles
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
        self.has_changed = true;
    }

    /// Back to position 0, scale 1, rotation 0
    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        self.scale = Vec3::ONE;
        self.rotation = Vec3::ZERO;
        self.has_changed = true;
    }

    // ===== MATRIX =====

    /// Local matrix: scale, then rotate X, Y, Z, then translate.
    ///
    /// Axes whose angle is exactly zero are skipped. The last row is
    /// always (0, 0, 0, 1).
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = self.rotation_matrix();
        Mat4::from_cols(
            (rotation.x_axis * self.scale.x).extend(0.0),
            (rotation.y_axis * self.scale.y).extend(0.0),
            (rotation.z_axis * self.scale.z).extend(0.0),
            self.position.extend(1.0),
        )
    }

    fn rotation_matrix(&self) -> Mat3 {
        if self.rotation == Vec3::ZERO {
            return Mat3::IDENTITY;
        }

        let mut rotation = Mat3::IDENTITY;
        if self.rotation.x != 0.0 {
            rotation = Mat3::from_rotation_x(self.rotation.x.to_radians());
        }
        if self.rotation.y != 0.0 {
            rotation = Mat3::from_rotation_y(self.rotation.y.to_radians()) * rotation;
        }
        if self.rotation.z != 0.0 {
            rotation = Mat3::from_rotation_z(self.rotation.z.to_radians()) * rotation;
        }
        rotation
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
