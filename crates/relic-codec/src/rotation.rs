//! Compressed rotation decoding and encoding.
//!
//! The archive stores an orientation as three fixed-point angles of which at
//! least one is zero: a quantized two-angle Euler decomposition rather than a
//! full three-angle or quaternion form. Decoding composes the stored axis
//! rotations; encoding picks which axis to hold at zero for a given matrix
//! and solves for the other two angles.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DMat3, DVec3};

use crate::{CompressedRotation, UNITS_PER_RIGHT_ANGLE};

/// Decode a compressed rotation into an orthonormal 3×3 matrix.
///
/// Each component reads as an angle of `-(component) / 1024 × π/2` radians;
/// the negation matches the archive's left-handed storage convention. The
/// stored Z rotation is applied to a vector first, then Y, then X, so as a
/// column-vector matrix product the result is `Rx · Ry · Rz`.
///
/// Never fails. A value with all three components nonzero cannot come from
/// [`pack_rotation`], but it still decodes to whatever matrix the stored
/// angles compose to.
#[must_use]
pub fn unpack_rotation(rotation: CompressedRotation) -> DMat3 {
    DMat3::from_rotation_x(angle_from_units(rotation.x))
        * DMat3::from_rotation_y(angle_from_units(rotation.y))
        * DMat3::from_rotation_z(angle_from_units(rotation.z))
}

/// Encode a rotation matrix as a two-angle compressed rotation.
///
/// A rotation has three degrees of freedom but the archive stores only two
/// angles, so one axis's angle is held at zero per orientation. The axis
/// whose image under `matrix` moved furthest from its original direction is
/// the one held at zero; the remaining two angles are solved from where that
/// image ended up, since a rotation is pinned down (to the precision this
/// format can hold) by its action on one non-polar unit vector.
///
/// Two behaviours are fixed by the archive format and must not be "improved":
///
/// - The furthest-moved axis is chosen by an ordered comparison (X if
///   strictly smaller than both others, else Y against Z), not a generic
///   minimum, so ties resolve identically to existing archive writers.
/// - Angles convert to fixed-point units by truncation toward zero, never by
///   rounding to nearest.
///
/// The input must be orthonormal. Nothing is validated; a non-rotation
/// matrix yields a meaningless result, though `asin`/`acos` arguments are
/// clamped to their domain so the result is at least finite where the
/// arithmetic allows.
#[must_use]
pub fn pack_rotation(matrix: DMat3) -> CompressedRotation {
    let new_x = matrix * DVec3::X;
    let new_y = matrix * DVec3::Y;
    let new_z = matrix * DVec3::Z;

    let x_dist = new_x.dot(DVec3::X).abs();
    let y_dist = new_y.dot(DVec3::Y).abs();
    let z_dist = new_z.dot(DVec3::Z).abs();

    if x_dist < y_dist && x_dist < z_dist {
        // X moved furthest: hold X at zero, store (0, phi, theta).
        // Solve sin(theta) = -x.y, cos(theta)cos(phi) = x.x.
        let mut theta = safe_asin(-new_x.y);
        if new_x.x < 0.0 {
            theta = PI - theta;
        }

        let mut phi = safe_acos(new_x.x / theta.cos());
        if new_x.z < 0.0 {
            phi = -phi;
        }

        CompressedRotation::new(0, units_from_angle(phi), units_from_angle(theta))
    } else if y_dist < z_dist {
        // Y moved furthest: hold Y at zero, store (phi, 0, theta).
        // Solve sin(theta) = y.x, cos(theta)cos(phi) = y.y.
        let mut theta = safe_asin(new_y.x);
        if new_y.y < 0.0 {
            theta = PI - theta;
        }

        let mut phi = safe_acos(new_y.y / theta.cos());
        if new_y.z > 0.0 {
            phi = -phi;
        }

        CompressedRotation::new(units_from_angle(phi), 0, units_from_angle(theta))
    } else {
        // Z moved furthest: hold Z at zero, store (phi, theta, 0).
        // Solve sin(theta) = z.x, cos(theta)cos(phi) = z.z.
        let mut theta = safe_asin(new_z.x);
        if new_z.z < 0.0 {
            theta = PI - theta;
        }

        let mut phi = safe_acos(new_z.z / theta.cos());
        if new_z.y < 0.0 {
            phi = -phi;
        }

        CompressedRotation::new(units_from_angle(phi), units_from_angle(theta), 0)
    }
}

/// Angle in radians for a stored fixed-point component.
fn angle_from_units(units: i16) -> f64 {
    -f64::from(units) / UNITS_PER_RIGHT_ANGLE * FRAC_PI_2
}

/// Fixed-point units for a recovered angle, truncated toward zero.
#[allow(clippy::cast_possible_truncation)]
fn units_from_angle(angle: f64) -> i16 {
    (angle / PI * 2.0 * UNITS_PER_RIGHT_ANGLE) as i16
}

/// `asin` with its argument clamped to [-1, 1].
///
/// Orthonormal input can land fractionally outside the domain through
/// accumulated rounding; clamping keeps the result finite instead of NaN.
fn safe_asin(value: f64) -> f64 {
    value.clamp(-1.0, 1.0).asin()
}

/// `acos` with its argument clamped to [-1, 1].
fn safe_acos(value: f64) -> f64 {
    value.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Quantization is π/2048 per unit, so a freshly truncated angle is off
    /// by less than a unit; 1e-2 leaves generous headroom over two angles.
    const ROUND_TRIP_TOLERANCE: f64 = 1e-2;

    fn assert_mat_approx(actual: DMat3, expected: DMat3, tolerance: f64) {
        for col in 0..3 {
            let diff = actual.col(col) - expected.col(col);
            for component in [diff.x, diff.y, diff.z] {
                assert!(
                    component.abs() <= tolerance,
                    "matrix mismatch in column {col}: {actual:?} vs {expected:?}"
                );
            }
        }
    }

    #[test]
    fn test_zero_decodes_to_identity() {
        let matrix = unpack_rotation(CompressedRotation::new(0, 0, 0));
        assert_mat_approx(matrix, DMat3::IDENTITY, 1e-12);
    }

    #[test]
    fn test_identity_encodes_to_zero() {
        assert_eq!(
            pack_rotation(DMat3::IDENTITY),
            CompressedRotation::new(0, 0, 0)
        );
    }

    #[test]
    fn test_single_unit_is_sign_flipped_right_angle_fraction() {
        // One stored unit on the Z component is -π/2048 about Z.
        let matrix = unpack_rotation(CompressedRotation::new(0, 0, 1));
        let expected = DMat3::from_rotation_z(-PI / 2048.0);
        assert_mat_approx(matrix, expected, 1e-12);
    }

    #[test]
    fn test_x_rotation_round_trip() {
        let matrix = DMat3::from_rotation_x(0.4);
        let rotation = pack_rotation(matrix);
        // A rotation purely about X leaves X in place, so Z (checked last
        // among the equal candidates) is the axis held at zero.
        assert_eq!(rotation, CompressedRotation::new(-260, 0, 0));
        assert_mat_approx(unpack_rotation(rotation), matrix, ROUND_TRIP_TOLERANCE);
    }

    #[test]
    fn test_z_rotation_round_trip() {
        let matrix = DMat3::from_rotation_z(0.7);
        let rotation = pack_rotation(matrix);
        // A rotation purely about Z moves X and Y equally, so the tie-break
        // holds Y at zero.
        assert_eq!(rotation, CompressedRotation::new(0, 0, -456));
        assert_mat_approx(unpack_rotation(rotation), matrix, ROUND_TRIP_TOLERANCE);
    }

    #[test]
    fn test_x_fixed_two_angle_round_trip() {
        let matrix = unpack_rotation(CompressedRotation::new(0, 300, 200));
        let recoded = pack_rotation(matrix);
        assert_eq!(recoded.x, 0, "X should stay the fixed axis: {recoded:?}");
        assert_mat_approx(unpack_rotation(recoded), matrix, ROUND_TRIP_TOLERANCE);
    }

    #[test]
    fn test_y_fixed_two_angle_round_trip() {
        let matrix = unpack_rotation(CompressedRotation::new(250, 0, 180));
        let recoded = pack_rotation(matrix);
        assert_eq!(recoded.y, 0, "Y should stay the fixed axis: {recoded:?}");
        assert_mat_approx(unpack_rotation(recoded), matrix, ROUND_TRIP_TOLERANCE);
    }

    #[test]
    fn test_units_truncate_toward_zero() {
        // 100.7 units in either direction; rounding to nearest would yield
        // ±101, the archive's truncation yields ±100.
        let angle = 100.7 / UNITS_PER_RIGHT_ANGLE * FRAC_PI_2;

        let rotation = pack_rotation(DMat3::from_rotation_z(angle));
        assert_eq!(rotation, CompressedRotation::new(0, 0, -100));

        let rotation = pack_rotation(DMat3::from_rotation_z(-angle));
        assert_eq!(rotation, CompressedRotation::new(0, 0, 100));
    }

    #[test]
    fn test_decoded_matrices_are_orthonormal() {
        // Includes values no conforming encoder produces (all three axes
        // nonzero); decode composes them anyway.
        for rotation in [
            CompressedRotation::new(0, 300, -200),
            CompressedRotation::new(-512, 0, 512),
            CompressedRotation::new(123, 456, 789),
            CompressedRotation::new(-1024, 2048, 1024),
        ] {
            let matrix = unpack_rotation(rotation);
            for col in 0..3 {
                assert!((matrix.col(col).length_squared() - 1.0).abs() < 1e-9);
            }
            assert!(matrix.col(0).dot(matrix.col(1)).abs() < 1e-9);
            assert!(matrix.col(0).dot(matrix.col(2)).abs() < 1e-9);
            assert!(matrix.col(1).dot(matrix.col(2)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pack_survives_garbage_input() {
        // Not a rotation at all; the clamps keep the trigonometry in-domain
        // and the result is finite garbage rather than a panic.
        let garbage = DMat3::from_cols(
            DVec3::new(2.0, 2.0, 2.0),
            DVec3::new(-3.0, 0.5, 0.0),
            DVec3::new(0.0, 9.0, -1.0),
        );
        let _ = pack_rotation(garbage);
    }
}
