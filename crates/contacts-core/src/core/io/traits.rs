use crate::core::models::label::AtomLabel;
use crate::core::utils::geometry::{self, GeometryError};
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructureError {
    #[error("No position for atom '{atom}' in frame {frame}")]
    MissingPosition { frame: usize, atom: String },
    #[error("Frame has {found} coordinates but the structure has {expected} atoms")]
    FrameSize { expected: usize, found: usize },
    #[error("Degenerate geometry: {0}")]
    Geometry(#[from] GeometryError),
}

/// Declarative atom selection, resolved by a [`StructureSource`].
///
/// An empty name list places no restriction on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomQuery {
    pub residue_names: Vec<String>,
    pub atom_names: Vec<String>,
    pub chain: Option<String>,
}

impl AtomQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn residues(mut self, names: &[&str]) -> Self {
        self.residue_names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn atoms(mut self, names: &[&str]) -> Self {
        self.atom_names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn chain(mut self, chain: Option<&str>) -> Self {
        self.chain = chain.map(str::to_string);
        self
    }

    pub fn matches(&self, atom: &AtomLabel) -> bool {
        let residue_ok = self.residue_names.is_empty()
            || self.residue_names.iter().any(|n| n == atom.residue_name());
        let atom_ok =
            self.atom_names.is_empty() || self.atom_names.iter().any(|n| n == atom.atom_name());
        let chain_ok = self.chain.as_deref().is_none_or(|c| c == atom.chain());
        residue_ok && atom_ok && chain_ok
    }
}

/// The structure engine seen from the contact core: atom selection plus a
/// frame-indexed coordinate lookup.
///
/// Measurement is derived from positions; implementors only override
/// [`StructureSource::distance`] or [`StructureSource::angle`] when the
/// engine measures more cheaply itself.
pub trait StructureSource {
    /// Returns matching atoms in the engine's atom order.
    fn select(&self, query: &AtomQuery) -> Vec<AtomLabel>;

    fn position(&self, frame: usize, atom: &AtomLabel) -> Option<Point3<f64>>;

    fn require_position(
        &self,
        frame: usize,
        atom: &AtomLabel,
    ) -> Result<Point3<f64>, StructureError> {
        self.position(frame, atom)
            .ok_or_else(|| StructureError::MissingPosition {
                frame,
                atom: atom.to_string(),
            })
    }

    fn distance(
        &self,
        frame: usize,
        atom1: &AtomLabel,
        atom2: &AtomLabel,
    ) -> Result<f64, StructureError> {
        let p1 = self.require_position(frame, atom1)?;
        let p2 = self.require_position(frame, atom2)?;
        Ok(geometry::distance(&p1, &p2))
    }

    /// Angle in degrees at `vertex` formed with `atom1` and `atom3`.
    fn angle(
        &self,
        frame: usize,
        atom1: &AtomLabel,
        vertex: &AtomLabel,
        atom3: &AtomLabel,
    ) -> Result<f64, StructureError> {
        let p1 = self.require_position(frame, atom1)?;
        let p2 = self.require_position(frame, vertex)?;
        let p3 = self.require_position(frame, atom3)?;
        let angle = geometry::angle_between(
            &geometry::vector(&p2, &p1),
            &geometry::vector(&p2, &p3),
        )?;
        Ok(angle)
    }
}
