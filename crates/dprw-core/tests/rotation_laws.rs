use std::f64::consts::{FRAC_PI_2, PI};

use dprw_core::{rotate, vec3, Rotation, Vec3};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

fn component() -> impl Strategy<Value = f64> {
    -4.0f64..4.0
}

fn vector() -> impl Strategy<Value = Vec3> {
    (component(), component(), component()).prop_map(|(x, y, z)| vec3(x, y, z))
}

fn close(a: &Vec3, b: &Vec3) -> bool {
    (a - b).amax() < TOL
}

#[test]
fn zero_rotation_vector_is_identity() {
    let v = vec3(0.3, -1.2, 2.0);
    assert_eq!(rotate(&v, &Vec3::zeros()), v);
    assert_eq!(Rotation::from_rotation_vector(&Vec3::zeros()), Rotation::identity());
}

#[test]
fn quarter_turn_about_z() {
    let r = Rotation::from_axis_angle(FRAC_PI_2, &vec3(0.0, 0.0, 1.0));
    assert!(close(&(r * vec3(1.0, 0.0, 0.0)), &vec3(0.0, 1.0, 0.0)));
    assert!(close(&rotate(&vec3(1.0, 0.0, 0.0), &vec3(0.0, 0.0, FRAC_PI_2)), &vec3(0.0, 1.0, 0.0)));
}

#[test]
fn half_turn_flips_perpendicular_components() {
    let phi = vec3(PI, 0.0, 0.0);
    assert!(close(&rotate(&vec3(1.0, 1.0, 1.0), &phi), &vec3(1.0, -1.0, -1.0)));
}

proptest! {
    #[test]
    fn rotation_preserves_norm(v in vector(), phi in vector()) {
        prop_assert!((rotate(&v, &phi).norm() - v.norm()).abs() < TOL);
    }

    #[test]
    fn inverse_undoes_rotation(v in vector(), phi in vector()) {
        let r = Rotation::from_rotation_vector(&phi);
        prop_assert!(close(&(r.inverse() * (r * v)), &v));
        prop_assert!((r * r.inverse()).distance(&Rotation::identity()) < TOL);
    }

    #[test]
    fn composition_applies_right_operand_first(v in vector(), a in vector(), b in vector()) {
        let ra = Rotation::from_rotation_vector(&a);
        let rb = Rotation::from_rotation_vector(&b);
        prop_assert!(close(&((ra * rb) * v), &(ra * (rb * v))));
    }

    #[test]
    fn matrix_form_agrees_with_direct_rotation(v in vector(), phi in vector()) {
        let r = Rotation::from_rotation_vector(&phi);
        prop_assert!(close(&r.apply(&v), &rotate(&v, &phi)));
    }

    #[test]
    fn matrices_are_proper_orthogonal(phi in vector()) {
        let m = *Rotation::from_rotation_vector(&phi).matrix();
        prop_assert!((m * m.transpose() - nalgebra::Matrix3::identity()).amax() < TOL);
        prop_assert!((m.determinant() - 1.0).abs() < TOL);
    }

    #[test]
    fn negated_vector_is_inverse(phi in vector()) {
        let forward = Rotation::from_rotation_vector(&phi);
        let backward = Rotation::from_rotation_vector(&-phi);
        prop_assert!(forward.inverse().distance(&backward) < TOL);
    }
}
