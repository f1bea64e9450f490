use phf::{Set, phf_set};

/// Backbone atoms that take part in hydrogen bonds: the amide nitrogen and
/// the carbonyl oxygen.
static HBOND_BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! { "N", "O" };

/// Default residue name token used to recognize water molecules.
pub const DEFAULT_SOLVENT_RESN: &str = "TIP3";

pub const RING_CG_ATOM_NAME: &str = "CG";
pub const RING_INDEX_PLACEHOLDER: &str = "vmd_idx";

pub fn default_hbond_backbone_atoms() -> Vec<String> {
    let mut names: Vec<String> = HBOND_BACKBONE_ATOM_NAMES
        .iter()
        .map(|name| name.to_string())
        .collect();
    names.sort();
    names
}

/// Substring match on the residue name; `"TIP"` matches every TIP water model.
pub fn is_solvent_residue(residue_name: &str, solvent_resn: &str) -> bool {
    residue_name.contains(solvent_resn)
}
