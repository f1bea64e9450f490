use super::label::AtomLabel;
use crate::core::io::traits::{AtomQuery, StructureError, StructureSource};
use nalgebra::Point3;
use std::collections::HashMap;

/// A fully materialized trajectory held in memory.
///
/// Atoms keep their insertion order, which is the order selections return
/// them in. Every frame stores one position per atom.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStructure {
    atoms: Vec<AtomLabel>,
    atom_slots: HashMap<AtomLabel, usize>,
    frames: Vec<Vec<Point3<f64>>>,
}

impl InMemoryStructure {
    pub fn new(atoms: Vec<AtomLabel>) -> Self {
        let atom_slots = atoms
            .iter()
            .enumerate()
            .map(|(slot, atom)| (atom.clone(), slot))
            .collect();
        Self {
            atoms,
            atom_slots,
            frames: Vec::new(),
        }
    }

    /// Appends a frame and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::FrameSize`] if `positions` does not hold
    /// exactly one point per atom.
    pub fn push_frame(&mut self, positions: Vec<Point3<f64>>) -> Result<usize, StructureError> {
        if positions.len() != self.atoms.len() {
            return Err(StructureError::FrameSize {
                expected: self.atoms.len(),
                found: positions.len(),
            });
        }
        self.frames.push(positions);
        Ok(self.frames.len() - 1)
    }

    pub fn atoms(&self) -> &[AtomLabel] {
        &self.atoms
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }
}

impl StructureSource for InMemoryStructure {
    fn select(&self, query: &AtomQuery) -> Vec<AtomLabel> {
        self.atoms
            .iter()
            .filter(|atom| query.matches(atom))
            .cloned()
            .collect()
    }

    fn position(&self, frame: usize, atom: &AtomLabel) -> Option<Point3<f64>> {
        let slot = *self.atom_slots.get(atom)?;
        self.frames.get(frame).map(|positions| positions[slot])
    }
}
