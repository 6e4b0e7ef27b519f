//! Decoded joint transform

use glam::{Quat, Vec3};

/// Decoded joint transform
///
/// Rotation is always normalized when produced by the decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointParams {
    /// Unit quaternion
    pub rotation: Quat,
    /// Translation, measured from the origin
    pub translation: Vec3,
    /// Non-uniform scale [x, y, z]
    pub scale: Vec3,
}

impl Default for JointParams {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl JointParams {
    /// Identity transform (no rotation, no translation, unit scale)
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub const fn new(rotation: Quat, translation: Vec3, scale: Vec3) -> Self {
        Self {
            rotation,
            translation,
            scale,
        }
    }

    /// Bring `other` into this transform's space (`self` applied after `other`).
    ///
    /// With `raw_scale` the scale of `other` passes through untouched.
    pub fn transform(&self, other: &JointParams, raw_scale: bool) -> JointParams {
        JointParams {
            rotation: self.rotation * other.rotation,
            translation: self.translation + self.rotation * other.translation,
            scale: if raw_scale {
                other.scale
            } else {
                self.scale * other.scale
            },
        }
    }

    /// Take `other` back out of this transform's space.
    ///
    /// Scale is `self.scale / other.scale`; it passes through untouched with
    /// `raw_scale` or when any axis of `other.scale` is not positive.
    pub fn untransform(&self, other: &JointParams, raw_scale: bool) -> JointParams {
        let divisible = other.scale.cmpgt(Vec3::ZERO).all();
        JointParams {
            rotation: self.rotation.conjugate() * other.rotation,
            translation: self.rotation.conjugate() * (other.translation - self.translation),
            scale: if raw_scale || !divisible {
                other.scale
            } else {
                self.scale / other.scale
            },
        }
    }

    /// Slerp rotation, lerp translation and scale.
    pub fn blend(&self, other: &JointParams, t: f32) -> JointParams {
        JointParams {
            rotation: self.rotation.slerp(other.rotation, t),
            translation: self.translation.lerp(other.translation, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }

    /// Mirror across the YZ plane.
    ///
    /// Negates translation X and maps rotation (x, y, z, w) to (-x, y, z, -w).
    /// This is not a conjugate; it is only a valid mirror with +Y up.
    pub fn mirror_x(&self) -> JointParams {
        let q = self.rotation;
        JointParams {
            rotation: Quat::from_xyzw(-q.x, q.y, q.z, -q.w),
            translation: Vec3::new(-self.translation.x, self.translation.y, self.translation.z),
            scale: self.scale,
        }
    }

    /// Scale translation about the origin, leaving rotation and scale alone.
    pub fn scale_translation(&self, factor: f32) -> JointParams {
        JointParams {
            translation: self.translation * factor,
            ..*self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.rotation.is_finite() && self.translation.is_finite() && self.scale.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    fn approx_quat(a: Quat, b: Quat) -> bool {
        a.dot(b).abs() > 0.99999
    }

    #[test]
    fn test_identity() {
        let id = JointParams::IDENTITY;
        assert_eq!(id.rotation, Quat::IDENTITY);
        assert_eq!(id.translation, Vec3::ZERO);
        assert_eq!(id.scale, Vec3::ONE);
        assert_eq!(JointParams::default(), id);
    }

    #[test]
    fn test_transform_untransform_inverse_with_unit_scale() {
        let align = JointParams::new(
            Quat::from_rotation_y(FRAC_PI_2),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ONE,
        );
        let other = JointParams::new(
            Quat::from_rotation_x(0.3),
            Vec3::new(-0.5, 0.25, 4.0),
            Vec3::ONE,
        );

        let combined = align.transform(&other, false);
        let back = align.untransform(&combined, false);

        assert!(approx_quat(back.rotation, other.rotation));
        assert!(approx_vec(back.translation, other.translation));
        assert!(approx_vec(back.scale, Vec3::ONE));
    }

    #[test]
    fn test_transform_rotates_then_adds() {
        let align = JointParams::new(
            Quat::from_rotation_y(FRAC_PI_2),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::splat(2.0),
        );
        let other = JointParams::new(Quat::IDENTITY, Vec3::new(0.0, 0.0, 1.0), Vec3::splat(3.0));

        let combined = align.transform(&other, false);
        // +Z rotated 90 degrees about Y is +X
        assert!(approx_vec(combined.translation, Vec3::new(11.0, 0.0, 0.0)));
        assert!(approx_vec(combined.scale, Vec3::splat(6.0)));

        let raw = align.transform(&other, true);
        assert!(approx_vec(raw.scale, Vec3::splat(3.0)));
    }

    #[test]
    fn test_untransform_scale_guard() {
        let align = JointParams::new(Quat::IDENTITY, Vec3::ZERO, Vec3::splat(2.0));

        let positive = JointParams::new(Quat::IDENTITY, Vec3::ZERO, Vec3::splat(4.0));
        assert!(approx_vec(
            align.untransform(&positive, false).scale,
            Vec3::splat(0.5)
        ));

        // Any non-positive axis disables the division
        let flat = JointParams::new(Quat::IDENTITY, Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
        assert_eq!(align.untransform(&flat, false).scale, flat.scale);

        // Raw scale always passes through
        assert_eq!(align.untransform(&positive, true).scale, positive.scale);
    }

    #[test]
    fn test_blend_endpoints_and_midpoint() {
        let a = JointParams::new(Quat::IDENTITY, Vec3::ZERO, Vec3::ONE);
        let b = JointParams::new(
            Quat::from_rotation_z(FRAC_PI_2),
            Vec3::new(2.0, 4.0, 6.0),
            Vec3::splat(3.0),
        );

        assert!(approx_quat(a.blend(&b, 0.0).rotation, a.rotation));
        assert!(approx_quat(a.blend(&b, 1.0).rotation, b.rotation));

        let mid = a.blend(&b, 0.5);
        assert!(approx_quat(mid.rotation, Quat::from_rotation_z(FRAC_PI_2 * 0.5)));
        assert!(approx_vec(mid.translation, Vec3::new(1.0, 2.0, 3.0)));
        assert!(approx_vec(mid.scale, Vec3::splat(2.0)));
    }

    #[test]
    fn test_mirror_x() {
        let params = JointParams::new(
            Quat::from_xyzw(0.1, 0.2, 0.3, 0.9),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let mirrored = params.mirror_x();
        assert_eq!(mirrored.rotation, Quat::from_xyzw(-0.1, 0.2, 0.3, -0.9));
        assert_eq!(mirrored.translation, Vec3::new(-1.0, 2.0, 3.0));
        assert_eq!(mirrored.scale, params.scale);

        // Involution, bit exact
        assert_eq!(mirrored.mirror_x(), params);
    }

    #[test]
    fn test_scale_translation() {
        let params = JointParams::new(
            Quat::from_rotation_y(1.0),
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::splat(2.0),
        );
        let scaled = params.scale_translation(2.0);
        assert_eq!(scaled.translation, Vec3::new(2.0, -4.0, 1.0));
        assert_eq!(scaled.rotation, params.rotation);
        assert_eq!(scaled.scale, params.scale);
    }
}
