use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("Vector has non-finite components: ({x}, {y}, {z})")]
    NonFinite { x: f64, y: f64, z: f64 },
    #[error("Angle is undefined for a zero-length vector")]
    ZeroLength,
}

fn ensure_finite(v: &Vector3<f64>) -> Result<(), GeometryError> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite {
            x: v.x,
            y: v.y,
            z: v.z,
        })
    }
}

/// Vector pointing from `p1` to `p2`.
pub fn vector(p1: &Point3<f64>, p2: &Point3<f64>) -> Vector3<f64> {
    p2 - p1
}

pub fn length(v: &Vector3<f64>) -> Result<f64, GeometryError> {
    ensure_finite(v)?;
    Ok(v.norm())
}

/// Angle between two vectors in degrees, in `[0, 180]`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroLength`] if either vector has zero length and
/// [`GeometryError::NonFinite`] if either vector contains NaN or infinity.
pub fn angle_between(v1: &Vector3<f64>, v2: &Vector3<f64>) -> Result<f64, GeometryError> {
    let len1 = length(v1)?;
    let len2 = length(v2)?;
    if len1 == 0.0 || len2 == 0.0 {
        return Err(GeometryError::ZeroLength);
    }
    let cos_angle = (v1.dot(v2) / (len1 * len2)).clamp(-1.0, 1.0);
    Ok(cos_angle.acos().to_degrees())
}

pub fn distance(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    (p2 - p1).norm()
}

pub fn centroid(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> Point3<f64> {
    Point3::from((p1.coords + p2.coords + p3.coords) / 3.0)
}

/// Normal of the plane through three points, `(p3 - p1) x (p2 - p1)`.
///
/// The sign follows the argument order, so ring atoms must always be passed
/// in the same order to get comparable normals across frames.
pub fn normal_vector(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> Vector3<f64> {
    (p3 - p1).cross(&(p2 - p1))
}

/// Angle between `normal` and the vector from `center2` to `center1`, folded
/// into `[0, 90]` since plane orientation is unsigned.
pub fn psi_angle(
    center1: &Point3<f64>,
    center2: &Point3<f64>,
    normal: &Vector3<f64>,
) -> Result<f64, GeometryError> {
    let center_to_center = vector(center2, center1);
    let angle = angle_between(normal, &center_to_center)?;
    Ok(angle.abs().min((180.0 - angle).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn vector_points_from_first_to_second() {
        let v = vector(&Point3::new(1.0, 2.0, 3.0), &Point3::new(4.0, 6.0, 3.0));
        assert_eq!(v, Vector3::new(3.0, 4.0, 0.0));
        assert!(approx_eq(length(&v).unwrap(), 5.0));
    }

    #[test]
    fn length_rejects_non_finite_components() {
        let v = Vector3::new(f64::NAN, 0.0, 1.0);
        assert!(matches!(length(&v), Err(GeometryError::NonFinite { .. })));
        let v = Vector3::new(0.0, f64::INFINITY, 1.0);
        assert!(matches!(length(&v), Err(GeometryError::NonFinite { .. })));
    }

    #[test]
    fn angle_between_identical_vectors_is_zero() {
        for v in [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.3, 7.1, 1e-3),
        ] {
            assert!(approx_eq(angle_between(&v, &v).unwrap(), 0.0));
        }
    }

    #[test]
    fn angle_between_handles_orthogonal_and_opposite_vectors() {
        let x = Vector3::x();
        let y = Vector3::y();
        assert!(approx_eq(angle_between(&x, &y).unwrap(), 90.0));
        assert!(approx_eq(angle_between(&x, &-x).unwrap(), 180.0));
    }

    #[test]
    fn angle_between_fails_for_zero_length_vector() {
        let zero = Vector3::zeros();
        assert_eq!(
            angle_between(&zero, &Vector3::x()),
            Err(GeometryError::ZeroLength)
        );
        assert_eq!(
            angle_between(&Vector3::x(), &zero),
            Err(GeometryError::ZeroLength)
        );
    }

    #[test]
    fn distance_to_self_is_zero_and_symmetric() {
        let p = Point3::new(1.5, -2.0, 0.25);
        let q = Point3::new(-1.5, 2.0, 0.25);
        assert_eq!(distance(&p, &p), 0.0);
        assert!(approx_eq(distance(&p, &q), 5.0));
        assert_eq!(distance(&p, &q), distance(&q, &p));
    }

    #[test]
    fn centroid_is_arithmetic_mean() {
        let c = centroid(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(3.0, 0.0, 0.0),
            &Point3::new(0.0, 3.0, 6.0),
        );
        assert_eq!(c, Point3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn normal_vector_sign_depends_on_argument_order() {
        let p1 = Point3::origin();
        let p2 = Point3::new(1.0, 0.0, 0.0);
        let p3 = Point3::new(0.0, 1.0, 0.0);
        let n = normal_vector(&p1, &p2, &p3);
        assert_eq!(n, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(normal_vector(&p1, &p3, &p2), -n);
    }

    #[test]
    fn psi_angle_folds_into_zero_to_ninety() {
        let normal = Vector3::z();
        let below = psi_angle(&Point3::origin(), &Point3::new(0.0, 0.0, 3.5), &normal).unwrap();
        let above = psi_angle(&Point3::new(0.0, 0.0, 3.5), &Point3::origin(), &normal).unwrap();
        assert!(approx_eq(below, 0.0));
        assert!(approx_eq(above, 0.0));

        let tilted =
            psi_angle(&Point3::new(1.0, 0.0, 1.0), &Point3::origin(), &-normal).unwrap();
        assert!(approx_eq(tilted, 45.0));

        let side = psi_angle(&Point3::new(4.0, 0.0, 0.0), &Point3::origin(), &normal).unwrap();
        assert!(approx_eq(side, 90.0));
    }

    #[test]
    fn psi_angle_stays_in_range_for_arbitrary_inputs() {
        let normals = [
            Vector3::new(0.2, -0.7, 0.1),
            Vector3::new(-3.0, 1.0, 2.0),
            Vector3::new(0.0, 0.0, -1.0),
        ];
        let centers = [
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-4.0, 0.5, 2.2),
            Point3::new(0.1, -9.0, 0.0),
        ];
        for n in &normals {
            for c1 in &centers {
                for c2 in &centers {
                    if c1 == c2 {
                        continue;
                    }
                    let psi = psi_angle(c1, c2, n).unwrap();
                    assert!((0.0..=90.0).contains(&psi), "psi out of range: {psi}");
                }
            }
        }
    }

    #[test]
    fn psi_angle_fails_for_coincident_centers() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(
            psi_angle(&p, &p, &Vector3::z()),
            Err(GeometryError::ZeroLength)
        );
    }
}
