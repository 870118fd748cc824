//! Rigid transform construction from recorded poses and direction vectors.
//!
//! Transforms compose as translate * rotate * scale, so the effective
//! application order on a local point is scale, then rotate, then translate.

use glam::{Mat4, Quat, Vec3};

/// Tolerance for degenerate-direction and axis-alignment checks.
pub const EPSILON: f32 = 1e-6;

/// Local axis the arrow mesh points along; its length encodes magnitude.
pub const ARROW_AXIS: Vec3 = Vec3::Y;

/// Decompose a quaternion (x, y, z, w) into rotation angle and axis.
///
/// Returns the angle in radians and a unit axis. A zero rotation returns
/// `(0.0, X)`; callers skip the rotate step entirely in that case.
pub fn axis_angle(rotation: Quat) -> (f32, Vec3) {
    let v = Vec3::new(rotation.x, rotation.y, rotation.z);
    let v_len = v.length();
    let angle = 2.0 * v_len.atan2(rotation.w);

    // Zero vector part also covers w = -1, which encodes a full turn.
    if angle == 0.0 || v_len < EPSILON {
        return (0.0, Vec3::X);
    }
    (angle, v / v_len)
}

/// Build a rigid transform from a recorded position and orientation.
pub fn from_pose(position: Vec3, rotation: Quat) -> Mat4 {
    let (angle, axis) = axis_angle(rotation);
    if angle == 0.0 {
        Mat4::from_translation(position)
    } else {
        Mat4::from_translation(position) * Mat4::from_axis_angle(axis, angle)
    }
}

/// Build a pose transform with an explicit local scale applied first.
///
/// Shape extents are baked into the base mesh, so most callers want
/// [`from_pose`]; this exists for descriptors that carry an explicit scale.
pub fn from_pose_scaled(position: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    from_pose(position, rotation) * Mat4::from_scale(scale)
}

/// Build an arrow transform orienting [`ARROW_AXIS`] along `direction`.
///
/// The arrow's long axis is scaled by `|direction|` so its length encodes
/// the vector magnitude. All degenerate inputs (zero vector, direction
/// already aligned with the arrow axis, antiparallel direction) take
/// explicit branches and produce finite matrices.
pub fn from_direction(origin: Vec3, direction: Vec3) -> Mat4 {
    let magnitude = direction.length();
    let scale = Mat4::from_scale(Vec3::new(1.0, magnitude, 1.0));
    let translate = Mat4::from_translation(origin);

    // Zero-length vector: collapse the arrow, skip rotation.
    if magnitude < EPSILON {
        return translate * scale;
    }
    let dir = direction / magnitude;

    let dot = ARROW_AXIS.dot(dir);
    if dot > 1.0 - EPSILON {
        return translate * scale;
    }

    let rot_axis = ARROW_AXIS.cross(dir);
    let (axis, angle) = if rot_axis.length() < EPSILON {
        // Antiparallel: flip 180 degrees about an axis perpendicular to the arrow.
        (Vec3::X, std::f32::consts::PI)
    } else {
        // Clamp the dot product so floating-point overshoot never reaches acos.
        (rot_axis.normalize(), dot.clamp(-1.0, 1.0).acos())
    };

    translate * Mat4::from_axis_angle(axis, angle) * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const TOL: f32 = 1e-5;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert!(
            a.abs_diff_eq(b, TOL),
            "Expected {:?}, got {:?}",
            b,
            a
        );
    }

    #[test]
    fn test_axis_angle_identity() {
        let (angle, _) = axis_angle(Quat::IDENTITY);
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_axis_angle_half_turn_x() {
        let (angle, axis) = axis_angle(Quat::from_xyzw(1.0, 0.0, 0.0, 0.0));
        assert!((angle - PI).abs() < TOL);
        assert_vec3_eq(axis, Vec3::X);
    }

    #[test]
    fn test_axis_angle_quarter_turn_z() {
        let half = FRAC_PI_2 / 2.0;
        let q = Quat::from_xyzw(0.0, 0.0, half.sin(), half.cos());
        let (angle, axis) = axis_angle(q);
        assert!((angle - FRAC_PI_2).abs() < TOL);
        assert_vec3_eq(axis, Vec3::Z);
    }

    #[test]
    fn test_axis_angle_negative_w_identity() {
        // (0,0,0,-1) is the identity traversed the long way round.
        let (angle, _) = axis_angle(Quat::from_xyzw(0.0, 0.0, 0.0, -1.0));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_from_pose_translation_only() {
        let m = from_pose(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        assert_vec3_eq(m.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_pose_rotates_before_translating() {
        // 90 degrees about Z maps local +X to +Y, then the translation applies.
        let half = FRAC_PI_2 / 2.0;
        let q = Quat::from_xyzw(0.0, 0.0, half.sin(), half.cos());
        let m = from_pose(Vec3::new(10.0, 0.0, 0.0), q);

        assert_vec3_eq(m.transform_point3(Vec3::X), Vec3::new(10.0, 1.0, 0.0));
    }

    #[test]
    fn test_from_pose_scaled_order() {
        // Scale doubles local X, then 90 degrees about Z maps it to +Y.
        let half = FRAC_PI_2 / 2.0;
        let q = Quat::from_xyzw(0.0, 0.0, half.sin(), half.cos());
        let m = from_pose_scaled(Vec3::ZERO, q, Vec3::new(2.0, 1.0, 1.0));

        assert_vec3_eq(m.transform_point3(Vec3::X), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_from_direction_zero_vector() {
        let m = from_direction(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO);

        assert!(m.is_finite());
        // Arrow collapses to its origin.
        assert_vec3_eq(m.transform_point3(ARROW_AXIS), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_from_direction_aligned() {
        // Direction along the arrow axis needs no rotation, only length.
        let m = from_direction(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0));
        assert_vec3_eq(m.transform_point3(ARROW_AXIS), Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_from_direction_perpendicular() {
        // cross(Y, Z) = X, 90 degree rotation: the arrow tip lands on +Z.
        let m = from_direction(Vec3::ZERO, Vec3::Z);
        assert_vec3_eq(m.transform_point3(ARROW_AXIS), Vec3::Z);
    }

    #[test]
    fn test_from_direction_antiparallel() {
        let m = from_direction(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        assert_vec3_eq(m.transform_point3(ARROW_AXIS), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_from_direction_magnitude_and_origin() {
        let origin = Vec3::new(5.0, 0.0, 0.0);
        let m = from_direction(origin, Vec3::new(0.0, 0.0, 2.0));

        // Base of the arrow sits at the origin point.
        assert_vec3_eq(m.transform_point3(Vec3::ZERO), origin);
        // Tip reaches origin + direction.
        assert_vec3_eq(m.transform_point3(ARROW_AXIS), Vec3::new(5.0, 0.0, 2.0));
    }

    #[test]
    fn test_from_direction_arbitrary_is_rigid() {
        let direction = Vec3::new(1.0, 2.0, -0.5);
        let m = from_direction(Vec3::ZERO, direction);

        // The scaled arrow tip lands exactly on the direction vector.
        assert_vec3_eq(m.transform_point3(ARROW_AXIS), direction);
    }
}
