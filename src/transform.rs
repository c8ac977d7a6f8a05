//! Model, view and projection matrix builders
//!
//! Conventions match the rasterizer: row-major, applied to column vectors,
//! camera looks down -z. Near and far are positive distances.

use crate::rasterizer::{Mat4, Vec3};

/// Rotation about the Z axis (degrees)
pub fn model_rotation_z(angle: f32) -> Mat4 {
    let (s, c) = angle.to_radians().sin_cos();
    Mat4::from_rows([
        [c, -s, 0.0, 0.0],
        [s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Rotation about an arbitrary axis through the origin (degrees), Rodrigues' formula
pub fn axis_rotation(axis: Vec3, angle: f32) -> Mat4 {
    let n = axis.normalize();
    if n == Vec3::ZERO {
        return Mat4::IDENTITY;
    }
    let (s, c) = angle.to_radians().sin_cos();
    let t = 1.0 - c;

    // c*I + t*(n n^T) + s*[n]x
    Mat4::from_rows([
        [c + t * n.x * n.x, t * n.x * n.y - s * n.z, t * n.x * n.z + s * n.y, 0.0],
        [t * n.y * n.x + s * n.z, c + t * n.y * n.y, t * n.y * n.z - s * n.x, 0.0],
        [t * n.z * n.x - s * n.y, t * n.z * n.y + s * n.x, c + t * n.z * n.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// View matrix for a camera at `eye` looking down -z
pub fn view_from_eye(eye: Vec3) -> Mat4 {
    Mat4::translation(eye * -1.0)
}

/// Perspective projection; `fov` is the vertical field of view in degrees
///
/// Squashes the frustum into a box, then normalizes the box to NDC.
/// A point on the near plane lands at NDC z = +1, the far plane at -1.
pub fn perspective(fov: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
    let n = -z_near;
    let f = -z_far;
    let t = z_near * (fov.to_radians() / 2.0).tan();
    let r = t * aspect;

    let squash = Mat4::from_rows([
        [n, 0.0, 0.0, 0.0],
        [0.0, n, 0.0, 0.0],
        [0.0, 0.0, n + f, -n * f],
        [0.0, 0.0, 1.0, 0.0],
    ]);

    orthographic(-r, r, -t, t, z_near, z_far) * squash
}

/// Orthographic projection of the box `[left, right] x [bottom, top]` between
/// the near and far planes into NDC
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, z_near: f32, z_far: f32) -> Mat4 {
    let n = -z_near;
    let f = -z_far;

    let translate = Mat4::translation(Vec3::new(
        -(right + left) / 2.0,
        -(top + bottom) / 2.0,
        -(n + f) / 2.0,
    ));
    let scale = Mat4::scaling(Vec3::new(
        2.0 / (right - left),
        2.0 / (top - bottom),
        2.0 / (n - f),
    ));

    scale * translate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec4;

    fn apply(m: Mat4, p: Vec3) -> Vec3 {
        let v = m * p.extend(1.0);
        v.xyz() / v.w
    }

    fn assert_near(a: Vec3, b: Vec3) {
        assert!((a - b).len() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let p = apply(model_rotation_z(90.0), Vec3::new(1.0, 0.0, 0.0));
        assert_near(p, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_axis_rotation_matches_z_rotation() {
        let a = axis_rotation(Vec3::new(0.0, 0.0, 2.0), 30.0);
        let b = model_rotation_z(30.0);
        for r in 0..4 {
            for c in 0..4 {
                assert!((a.rows[r][c] - b.rows[r][c]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_axis_rotation_keeps_axis_fixed() {
        let axis = Vec3::new(1.0, 1.0, 0.0);
        let p = apply(axis_rotation(axis, 73.0), axis);
        assert_near(p, axis);
    }

    #[test]
    fn test_axis_rotation_zero_axis_is_identity() {
        assert_eq!(axis_rotation(Vec3::ZERO, 45.0), Mat4::IDENTITY);
    }

    #[test]
    fn test_view_from_eye_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        assert_eq!(view_from_eye(eye) * eye.extend(1.0), Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_perspective_depth_planes() {
        let m = perspective(45.0, 1.0, 0.1, 50.0);
        let near = apply(m, Vec3::new(0.0, 0.0, -0.1));
        let far = apply(m, Vec3::new(0.0, 0.0, -50.0));
        assert!((near.z - 1.0).abs() < 1e-3);
        assert!((far.z + 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_perspective_frustum_edge() {
        // Top edge of the frustum at distance 1 maps to NDC y = 1
        let m = perspective(90.0, 1.0, 0.1, 50.0);
        let p = apply(m, Vec3::new(0.0, 1.0, -1.0));
        assert!((p.y.abs() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_orthographic_box_corners() {
        let m = orthographic(0.0, 4.0, 0.0, 2.0, 1.0, 3.0);
        assert_near(apply(m, Vec3::new(0.0, 0.0, -1.0)), Vec3::new(-1.0, -1.0, 1.0));
        assert_near(apply(m, Vec3::new(4.0, 2.0, -3.0)), Vec3::new(1.0, 1.0, -1.0));
    }
}
