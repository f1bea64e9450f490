use crate::core::io::traits::StructureSource;
use crate::core::models::contact::{Contact, InteractionType};
use crate::core::models::label::AtomLabel;
use crate::core::topology::selection::AromaticTriplet;
use crate::core::utils::geometry::{self, GeometryError};
use crate::engine::config::GeometryCriteria;
use crate::engine::error::EngineError;
use nalgebra::{Point3, Vector3};
use tracing::trace;

/// Plane of an aromatic ring: centroid of the ring triplet and its normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub centroid: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl RingGeometry {
    pub fn from_points(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> Self {
        Self {
            centroid: geometry::centroid(p1, p2, p3),
            normal: geometry::normal_vector(p1, p2, p3),
        }
    }

    /// Ring plane of `triplet` in `frame`, looked up through the structure
    /// source.
    pub fn from_triplet(
        source: &impl StructureSource,
        frame: usize,
        triplet: &AromaticTriplet,
    ) -> Result<Self, EngineError> {
        let p1 = source.require_position(frame, &triplet[0])?;
        let p2 = source.require_position(frame, &triplet[1])?;
        let p3 = source.require_position(frame, &triplet[2])?;
        Ok(Self::from_points(&p1, &p2, &p3))
    }

    /// Psi angle of `other`'s centroid measured against this ring's normal.
    pub fn psi_to(&self, other: &Point3<f64>) -> Result<f64, GeometryError> {
        geometry::psi_angle(other, &self.centroid, &self.normal)
    }
}

fn fold_to_acute(angle: f64) -> f64 {
    angle.min(180.0 - angle)
}

/// Decides whether two rings stack face-to-face (`ps`), edge-to-face
/// (`ts`), or not at all.
///
/// Psi is the smaller of the two angles measured against each ring's own
/// normal, so swapping the rings never changes the answer.
pub fn classify_aromatic_pair(
    ring1: &RingGeometry,
    ring2: &RingGeometry,
    criteria: &GeometryCriteria,
) -> Result<Option<InteractionType>, GeometryError> {
    let distance = geometry::distance(&ring1.centroid, &ring2.centroid);
    let normal_angle = fold_to_acute(geometry::angle_between(&ring1.normal, &ring2.normal)?);
    let psi1 = geometry::psi_angle(&ring1.centroid, &ring2.centroid, &ring1.normal)?;
    let psi2 = geometry::psi_angle(&ring2.centroid, &ring1.centroid, &ring2.normal)?;
    let psi = psi1.min(psi2);
    trace!(distance, normal_angle, psi, "Aromatic ring pair geometry.");

    let stack = &criteria.pi_stacking;
    if distance <= stack.max_centroid_distance
        && normal_angle <= stack.max_normal_angle
        && psi <= stack.max_psi_angle
    {
        return Ok(Some(InteractionType::PiStacking));
    }

    let t_shape = &criteria.t_stacking;
    if distance <= t_shape.max_centroid_distance
        && normal_angle >= t_shape.min_normal_angle
        && psi <= t_shape.max_psi_angle
    {
        return Ok(Some(InteractionType::TStacking));
    }
    Ok(None)
}

/// Whether a cation sits over the face of a ring.
pub fn is_pi_cation(
    ring: &RingGeometry,
    cation: &Point3<f64>,
    criteria: &GeometryCriteria,
) -> Result<bool, GeometryError> {
    let distance = geometry::distance(cation, &ring.centroid);
    if distance > criteria.pi_cation.max_distance {
        return Ok(false);
    }
    Ok(ring.psi_to(cation)? <= criteria.pi_cation.max_psi_angle)
}

/// Stacking contact between two aromatic residues in `frame`, reported
/// between their ring-CG handles.
pub fn detect_aromatic_stacking(
    source: &impl StructureSource,
    frame: usize,
    triplet1: &AromaticTriplet,
    triplet2: &AromaticTriplet,
    criteria: &GeometryCriteria,
) -> Result<Option<Contact>, EngineError> {
    let ring1 = RingGeometry::from_triplet(source, frame, triplet1)?;
    let ring2 = RingGeometry::from_triplet(source, frame, triplet2)?;
    let kind = classify_aromatic_pair(&ring1, &ring2, criteria)?;
    Ok(kind.map(|itype| {
        Contact::new(
            frame,
            triplet1[0].to_ring_cg(),
            triplet2[0].to_ring_cg(),
            itype,
        )
    }))
}

/// Pi-cation contact between a cation atom and an aromatic residue in
/// `frame`. The aromatic side is reported by its ring-CG handle.
pub fn detect_pi_cation(
    source: &impl StructureSource,
    frame: usize,
    cation: &AtomLabel,
    triplet: &AromaticTriplet,
    criteria: &GeometryCriteria,
) -> Result<Option<Contact>, EngineError> {
    let ring = RingGeometry::from_triplet(source, frame, triplet)?;
    let cation_position = source.require_position(frame, cation)?;
    if is_pi_cation(&ring, &cation_position, criteria)? {
        Ok(Some(Contact::new(
            frame,
            cation.clone(),
            triplet[0].to_ring_cg(),
            InteractionType::PiCation,
        )))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::InMemoryStructure;
    use crate::core::topology::selection::{aromatic_triplets, cation_atoms};

    fn label(s: &str) -> AtomLabel {
        s.parse().unwrap()
    }

    // Ring triplet in the plane z = `z`, centred on (cx, cy, z).
    fn flat_ring(cx: f64, cy: f64, z: f64) -> [Point3<f64>; 3] {
        [
            Point3::new(cx + 1.4, cy, z),
            Point3::new(cx - 0.7, cy + 1.212, z),
            Point3::new(cx - 0.7, cy - 1.212, z),
        ]
    }

    // Ring triplet in the plane x = `x`, centred on (x, cy, cz).
    fn upright_ring(x: f64, cy: f64, cz: f64) -> [Point3<f64>; 3] {
        [
            Point3::new(x, cy + 1.4, cz),
            Point3::new(x, cy - 0.7, cz + 1.212),
            Point3::new(x, cy - 0.7, cz - 1.212),
        ]
    }

    fn ring(points: [Point3<f64>; 3]) -> RingGeometry {
        RingGeometry::from_points(&points[0], &points[1], &points[2])
    }

    #[test]
    fn ring_geometry_centroid_and_normal() {
        let r = ring(flat_ring(1.0, 2.0, 3.0));
        assert!((r.centroid - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-9);
        assert!(r.normal.x.abs() < 1e-9 && r.normal.y.abs() < 1e-9);
        assert!(r.normal.z.abs() > 0.0);
    }

    #[test]
    fn parallel_rings_on_top_of_each_other_pi_stack() {
        let criteria = GeometryCriteria::default();
        let r1 = ring(flat_ring(0.0, 0.0, 0.0));
        let r2 = ring(flat_ring(0.5, 0.0, 3.8));
        assert_eq!(
            classify_aromatic_pair(&r1, &r2, &criteria).unwrap(),
            Some(InteractionType::PiStacking)
        );
    }

    #[test]
    fn perpendicular_close_rings_t_stack() {
        let criteria = GeometryCriteria::default();
        let r1 = ring(flat_ring(0.0, 0.0, 0.0));
        let r2 = ring(upright_ring(0.0, 0.0, 4.5));
        assert_eq!(
            classify_aromatic_pair(&r1, &r2, &criteria).unwrap(),
            Some(InteractionType::TStacking)
        );
    }

    #[test]
    fn distant_or_side_by_side_rings_do_not_stack() {
        let criteria = GeometryCriteria::default();
        let r1 = ring(flat_ring(0.0, 0.0, 0.0));
        assert_eq!(
            classify_aromatic_pair(&r1, &ring(flat_ring(0.0, 0.0, 9.0)), &criteria).unwrap(),
            None
        );
        assert_eq!(
            classify_aromatic_pair(&r1, &ring(flat_ring(5.0, 0.0, 0.0)), &criteria).unwrap(),
            None
        );
    }

    #[test]
    fn classification_does_not_depend_on_ring_order() {
        let criteria = GeometryCriteria::default();
        let flat = ring(flat_ring(0.0, 0.0, 0.0));
        let cases = [
            (ring(flat_ring(0.5, 0.0, 3.8)), Some(InteractionType::PiStacking)),
            (ring(upright_ring(0.0, 0.0, 4.5)), Some(InteractionType::TStacking)),
            (ring(flat_ring(0.0, 0.0, 9.0)), None),
            (ring(flat_ring(5.0, 0.0, 0.0)), None),
        ];
        for (other, expected) in cases {
            let forward = classify_aromatic_pair(&flat, &other, &criteria).unwrap();
            let backward = classify_aromatic_pair(&other, &flat, &criteria).unwrap();
            assert_eq!(forward, expected);
            assert_eq!(backward, expected);
        }
    }

    #[test]
    fn coincident_ring_centroids_are_degenerate() {
        let criteria = GeometryCriteria::default();
        let r1 = ring(flat_ring(0.0, 0.0, 0.0));
        assert_eq!(
            classify_aromatic_pair(&r1, &r1, &criteria),
            Err(GeometryError::ZeroLength)
        );
    }

    #[test]
    fn cation_above_ring_face_is_pi_cation() {
        let criteria = GeometryCriteria::default();
        let r = ring(flat_ring(0.0, 0.0, 0.0));
        assert!(is_pi_cation(&r, &Point3::new(0.3, 0.2, 4.0), &criteria).unwrap());
        assert!(!is_pi_cation(&r, &Point3::new(4.0, 0.0, 0.5), &criteria).unwrap());
        assert!(!is_pi_cation(&r, &Point3::new(0.0, 0.0, 6.5), &criteria).unwrap());
    }

    fn phe_lys_phe_structure() -> InMemoryStructure {
        let atoms: Vec<AtomLabel> = [
            "A:PHE:10:CG:1",
            "A:PHE:10:CE1:2",
            "A:PHE:10:CE2:3",
            "A:LYS:20:NZ:4",
            "A:PHE:30:CG:5",
            "A:PHE:30:CE1:6",
            "A:PHE:30:CE2:7",
        ]
        .into_iter()
        .map(label)
        .collect();
        let mut structure = InMemoryStructure::new(atoms);
        let ring1 = flat_ring(0.0, 0.0, 0.0);
        let ring2 = flat_ring(0.4, 0.0, 3.7);
        let mut positions = ring1.to_vec();
        positions.push(Point3::new(0.0, 0.0, -4.0));
        positions.extend(ring2);
        structure.push_frame(positions).unwrap();
        structure
    }

    #[test]
    fn detect_aromatic_stacking_reports_ring_cg_handles() {
        let structure = phe_lys_phe_structure();
        let triplets = aromatic_triplets(&structure, None);
        assert_eq!(triplets.len(), 2);
        let contact = detect_aromatic_stacking(
            &structure,
            0,
            &triplets[0],
            &triplets[1],
            &GeometryCriteria::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(contact.interaction, InteractionType::PiStacking);
        assert_eq!(contact.atom1, label("A:PHE:10:CG:vmd_idx"));
        assert_eq!(contact.atom2, label("A:PHE:30:CG:vmd_idx"));
    }

    #[test]
    fn detect_pi_cation_uses_cation_selection() {
        let structure = phe_lys_phe_structure();
        let triplets = aromatic_triplets(&structure, None);
        let cations = cation_atoms(&structure, None);
        assert_eq!(cations, vec![label("A:LYS:20:NZ:4")]);

        let criteria = GeometryCriteria::default();
        let near = detect_pi_cation(&structure, 0, &cations[0], &triplets[0], &criteria)
            .unwrap()
            .unwrap();
        assert_eq!(near.interaction, InteractionType::PiCation);
        assert_eq!(near.atom1, cations[0]);
        assert_eq!(near.atom2, label("A:PHE:10:CG:vmd_idx"));

        let far = detect_pi_cation(&structure, 0, &cations[0], &triplets[1], &criteria).unwrap();
        assert!(far.is_none());
    }

    #[test]
    fn missing_frame_is_a_structure_error() {
        let structure = phe_lys_phe_structure();
        let triplets = aromatic_triplets(&structure, None);
        let err = RingGeometry::from_triplet(&structure, 3, &triplets[0]).unwrap_err();
        assert!(matches!(err, EngineError::Structure(_)));
    }
}
