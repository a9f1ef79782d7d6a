//! Conversions between tumblebox math types and the engine's nalgebra types

use rapier3d::na::{Quaternion, Translation3, UnitQuaternion};
use rapier3d::prelude::*;
use tumblebox_math::{Quat, Transform, Vec3};

pub(crate) fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

pub(crate) fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub(crate) fn to_isometry(t: &Transform) -> Isometry<Real> {
    let q = t.orientation;
    let rotation = UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z));
    let p = t.position;
    Isometry::from_parts(Translation3::new(p.x, p.y, p.z), rotation)
}

pub(crate) fn from_isometry(iso: &Isometry<Real>) -> Transform {
    let c = &iso.rotation.coords;
    Transform::from_position_orientation(
        from_vector(&iso.translation.vector),
        Quat::from_xyzw(c[0], c[1], c[2], c[3]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isometry_keeps_pose() {
        let t = Transform::from_position_orientation(
            Vec3::new(0.0, 200.0, 0.0),
            Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), std::f32::consts::FRAC_PI_3),
        );
        let back = from_isometry(&to_isometry(&t));
        assert!(back.position.max_abs_diff(t.position) < 0.0001);
        assert!(back.orientation.angle_to(&t.orientation) < 0.001);
    }
}
