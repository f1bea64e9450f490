use phf::{Map, phf_map};

/// Atoms of interest on a family of residue names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomGroup {
    pub residue_names: &'static [&'static str],
    pub atom_names: &'static [&'static str],
}

/// Carboxylate oxygens that can take part in salt bridges.
pub static ANION_GROUPS: &[AtomGroup] = &[
    AtomGroup {
        residue_names: &["ASP"],
        atom_names: &["OD1", "OD2"],
    },
    AtomGroup {
        residue_names: &["GLU"],
        atom_names: &["OE1", "OE2"],
    },
];

/// Charged nitrogens that can take part in salt bridges or pi-cation contacts.
pub static CATION_GROUPS: &[AtomGroup] = &[
    AtomGroup {
        residue_names: &["LYS"],
        atom_names: &["NZ"],
    },
    AtomGroup {
        residue_names: &["ARG"],
        atom_names: &["NH1", "NH2"],
    },
    AtomGroup {
        residue_names: &["HIS", "HSD", "HSE", "HSP", "HIE", "HIP", "HID"],
        atom_names: &["ND1", "NE2"],
    },
];

// Three alternating atoms of the six-membered ring, in the order used to
// build the ring normal.
static AROMATIC_RING_TRIPLETS: Map<&'static str, [&'static str; 3]> = phf_map! {
    "PHE" => ["CG", "CE1", "CE2"],
    "TYR" => ["CG", "CE1", "CE2"],
    "TRP" => ["CD2", "CZ2", "CZ3"],
};

pub fn aromatic_ring_triplet(residue_name: &str) -> Option<&'static [&'static str; 3]> {
    AROMATIC_RING_TRIPLETS.get(residue_name)
}

/// Aromatic residue names in sorted order.
pub fn aromatic_residue_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = AROMATIC_RING_TRIPLETS.keys().copied().collect();
    names.sort_unstable();
    names
}
