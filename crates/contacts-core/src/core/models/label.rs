use crate::core::utils::identifiers::{
    RING_CG_ATOM_NAME, RING_INDEX_PLACEHOLDER, is_solvent_residue,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

const FIELD_SEPARATOR: char = ':';
const FIELD_COUNT: usize = 5;

/// Identifies one field of an atom label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelField {
    Chain,
    ResidueName,
    ResidueId,
    AtomName,
    Index,
}

impl LabelField {
    fn position(self) -> usize {
        match self {
            LabelField::Chain => 0,
            LabelField::ResidueName => 1,
            LabelField::ResidueId => 2,
            LabelField::AtomName => 3,
            LabelField::Index => 4,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelParseError {
    #[error("Atom label '{label}' has {found} colon-delimited fields, expected 5")]
    FieldCount { label: String, found: usize },
    #[error("Atom label field {field:?} must not contain ':' (value: '{value}')")]
    InvalidField { field: LabelField, value: String },
}

/// Canonical identity of an atom within one loaded structure.
///
/// Equality, hashing and ordering all go through the canonical string
/// `chain:resname:resid:name:index`, so sorting labels gives the same order
/// as sorting their serialized forms.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AtomLabel {
    chain: String,
    residue_name: String,
    residue_id: String,
    atom_name: String,
    index: String,
    canonical: String,
}

impl AtomLabel {
    /// Builds a label from the five fields reported by the structure engine.
    ///
    /// # Errors
    ///
    /// Returns [`LabelParseError::InvalidField`] if any field contains the
    /// `:` separator, since such a label could not be parsed back.
    pub fn new(
        chain: &str,
        residue_name: &str,
        residue_id: &str,
        atom_name: &str,
        index: &str,
    ) -> Result<Self, LabelParseError> {
        let fields = [
            (LabelField::Chain, chain),
            (LabelField::ResidueName, residue_name),
            (LabelField::ResidueId, residue_id),
            (LabelField::AtomName, atom_name),
            (LabelField::Index, index),
        ];
        if let Some((field, value)) = fields.iter().find(|(_, v)| v.contains(FIELD_SEPARATOR)) {
            return Err(LabelParseError::InvalidField {
                field: *field,
                value: value.to_string(),
            });
        }
        Ok(Self {
            chain: chain.to_string(),
            residue_name: residue_name.to_string(),
            residue_id: residue_id.to_string(),
            atom_name: atom_name.to_string(),
            index: index.to_string(),
            canonical: format!("{chain}:{residue_name}:{residue_id}:{atom_name}:{index}"),
        })
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn residue_name(&self) -> &str {
        &self.residue_name
    }

    pub fn residue_id(&self) -> &str {
        &self.residue_id
    }

    pub fn atom_name(&self) -> &str {
        &self.atom_name
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn field(&self, field: LabelField) -> &str {
        match field {
            LabelField::Chain => &self.chain,
            LabelField::ResidueName => &self.residue_name,
            LabelField::ResidueId => &self.residue_id,
            LabelField::AtomName => &self.atom_name,
            LabelField::Index => &self.index,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// `(chain, residue name, residue id)` of the owning residue.
    pub fn residue_key(&self) -> (&str, &str, &str) {
        (&self.chain, &self.residue_name, &self.residue_id)
    }

    pub fn is_solvent(&self, solvent_resn: &str) -> bool {
        is_solvent_residue(&self.residue_name, solvent_resn)
    }

    /// Per-residue handle for an aromatic ring: the atom name becomes `CG`
    /// and the index a fixed placeholder, so every ring atom of the same
    /// residue maps to the same label.
    pub fn to_ring_cg(&self) -> AtomLabel {
        Self {
            chain: self.chain.clone(),
            residue_name: self.residue_name.clone(),
            residue_id: self.residue_id.clone(),
            atom_name: RING_CG_ATOM_NAME.to_string(),
            index: RING_INDEX_PLACEHOLDER.to_string(),
            canonical: format!(
                "{}:{}:{}:{}:{}",
                self.chain,
                self.residue_name,
                self.residue_id,
                RING_CG_ATOM_NAME,
                RING_INDEX_PLACEHOLDER
            ),
        }
    }
}

/// Extracts a single field from a canonical label string without building
/// an [`AtomLabel`].
pub fn label_field(label: &str, field: LabelField) -> Result<&str, LabelParseError> {
    let parts: Vec<&str> = label.split(FIELD_SEPARATOR).collect();
    if parts.len() != FIELD_COUNT {
        return Err(LabelParseError::FieldCount {
            label: label.to_string(),
            found: parts.len(),
        });
    }
    Ok(parts[field.position()])
}

impl FromStr for AtomLabel {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(FIELD_SEPARATOR).collect();
        match parts.as_slice() {
            [chain, resname, resid, name, index] => {
                AtomLabel::new(chain, resname, resid, name, index)
            }
            _ => Err(LabelParseError::FieldCount {
                label: s.to_string(),
                found: parts.len(),
            }),
        }
    }
}

impl TryFrom<String> for AtomLabel {
    type Error = LabelParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AtomLabel> for String {
    fn from(label: AtomLabel) -> Self {
        label.canonical
    }
}

impl fmt::Display for AtomLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl fmt::Debug for AtomLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AtomLabel({})", self.canonical)
    }
}

impl PartialEq for AtomLabel {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for AtomLabel {}

impl Hash for AtomLabel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for AtomLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AtomLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}
