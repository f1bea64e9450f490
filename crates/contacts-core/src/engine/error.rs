use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::traits::StructureError;
use crate::core::models::label::LabelParseError;
use crate::core::utils::geometry::GeometryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Degenerate geometry: {0}")]
    Domain(#[from] GeometryError),

    #[error("Invalid atom label: {0}")]
    Parse(#[from] LabelParseError),

    #[error("Structure lookup failed: {0}")]
    Structure(#[from] StructureError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "Solvent residue name '{solvent_resn}' can't be resolved for contact {atom1} -- {atom2} in frame {frame}"
    )]
    UnresolvedSolvent {
        frame: usize,
        atom1: String,
        atom2: String,
        solvent_resn: String,
    },

    #[error("Contacts span several frames ({first} and {other}); expected a single frame")]
    MixedFrames { first: usize, other: usize },

    #[error("Expected a hydrogen bond but got '{interaction}' contact {atom1} -- {atom2}")]
    NotHydrogenBond {
        interaction: String,
        atom1: String,
        atom2: String,
    },
}

impl EngineError {
    /// True for contract violations in the contact batch, as opposed to bad
    /// geometry, labels or configuration.
    pub fn is_logic_error(&self) -> bool {
        matches!(
            self,
            EngineError::UnresolvedSolvent { .. }
                | EngineError::MixedFrames { .. }
                | EngineError::NotHydrogenBond { .. }
        )
    }
}
