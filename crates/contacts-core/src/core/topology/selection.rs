use super::chemistry::{
    ANION_GROUPS, AtomGroup, CATION_GROUPS, aromatic_residue_names, aromatic_ring_triplet,
};
use crate::core::io::traits::{AtomQuery, StructureSource};
use crate::core::models::label::AtomLabel;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

/// Three ring atoms of one aromatic residue, in ring-triplet order.
pub type AromaticTriplet = [AtomLabel; 3];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Atom index '{0}' is not an integer")]
    NonNumericIndex(String),
    #[error("Duplicate atom index {0} in structure")]
    DuplicateIndex(usize),
    #[error("Atom index {0} is not present in the structure")]
    UnknownIndex(usize),
}

fn select_groups(
    source: &impl StructureSource,
    groups: &[AtomGroup],
    chain: Option<&str>,
) -> Vec<AtomLabel> {
    groups
        .iter()
        .flat_map(|group| {
            source.select(
                &AtomQuery::new()
                    .residues(group.residue_names)
                    .atoms(group.atom_names)
                    .chain(chain),
            )
        })
        .collect()
}

/// Carboxylate oxygens of ASP and GLU, optionally restricted to one chain.
pub fn anion_atoms(source: &impl StructureSource, chain: Option<&str>) -> Vec<AtomLabel> {
    select_groups(source, ANION_GROUPS, chain)
}

/// Charged nitrogens of LYS, ARG and the histidine variants.
pub fn cation_atoms(source: &impl StructureSource, chain: Option<&str>) -> Vec<AtomLabel> {
    select_groups(source, CATION_GROUPS, chain)
}

/// Ring triplets of every PHE, TYR and TRP residue.
///
/// Triplets come back in the order each residue is first seen and their
/// atoms always follow the ring-triplet order, so ring normals built from
/// them have a reproducible sign. Residues missing a ring atom are skipped.
pub fn aromatic_triplets(
    source: &impl StructureSource,
    chain: Option<&str>,
) -> Vec<AromaticTriplet> {
    let residue_names = aromatic_residue_names();
    let mut ring_atom_names: Vec<&str> = residue_names
        .iter()
        .filter_map(|name| aromatic_ring_triplet(name))
        .flat_map(|triplet| triplet.iter().copied())
        .collect();
    ring_atom_names.sort_unstable();
    ring_atom_names.dedup();

    let atoms = source.select(
        &AtomQuery::new()
            .residues(&residue_names)
            .atoms(&ring_atom_names)
            .chain(chain),
    );

    let mut residue_order: Vec<(String, String, String)> = Vec::new();
    let mut by_residue: HashMap<(String, String, String), Vec<AtomLabel>> = HashMap::new();
    for atom in atoms {
        let (c, resname, resid) = atom.residue_key();
        let key = (c.to_string(), resname.to_string(), resid.to_string());
        by_residue
            .entry(key.clone())
            .or_insert_with(|| {
                residue_order.push(key);
                Vec::new()
            })
            .push(atom);
    }

    residue_order
        .into_iter()
        .filter_map(|key| {
            let ring_atoms = by_residue.remove(&key)?;
            let order = aromatic_ring_triplet(&key.1)?;
            let pick = |name: &str| ring_atoms.iter().find(|a| a.atom_name() == name).cloned();
            match (pick(order[0]), pick(order[1]), pick(order[2])) {
                (Some(a), Some(b), Some(c)) => Some([a, b, c]),
                _ => {
                    warn!(
                        chain = %key.0,
                        residue = %key.1,
                        resid = %key.2,
                        "Skipping aromatic residue with incomplete ring."
                    );
                    None
                }
            }
        })
        .collect()
}

/// Lookup from engine atom index to atom label.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    labels: HashMap<usize, AtomLabel>,
}

impl LabelIndex {
    /// Indexes every atom the source returns for an unrestricted selection.
    pub fn from_source(source: &impl StructureSource) -> Result<Self, SelectionError> {
        Self::from_labels(source.select(&AtomQuery::new()))
    }

    pub fn from_labels(
        labels: impl IntoIterator<Item = AtomLabel>,
    ) -> Result<Self, SelectionError> {
        let mut index = HashMap::new();
        for label in labels {
            let key: usize = label
                .index()
                .parse()
                .map_err(|_| SelectionError::NonNumericIndex(label.index().to_string()))?;
            if index.insert(key, label).is_some() {
                return Err(SelectionError::DuplicateIndex(key));
            }
        }
        Ok(Self { labels: index })
    }

    pub fn get(&self, index: usize) -> Option<&AtomLabel> {
        self.labels.get(&index)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Maps engine index pairs to label pairs.
    pub fn resolve_pairs(
        &self,
        pairs: &[(usize, usize)],
    ) -> Result<Vec<(AtomLabel, AtomLabel)>, SelectionError> {
        pairs
            .iter()
            .map(|&(i, j)| {
                let a = self.get(i).ok_or(SelectionError::UnknownIndex(i))?;
                let b = self.get(j).ok_or(SelectionError::UnknownIndex(j))?;
                Ok((a.clone(), b.clone()))
            })
            .collect()
    }
}
