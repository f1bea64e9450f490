use super::label::AtomLabel;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Interaction tag carried by a contact.
///
/// Upstream detectors emit coarse tags (`hb`, `sb`, `pc`, ...); the
/// hydrogen-bond stratifier refines `hb` into one of the five hydrogen-bond
/// subtypes. Tags this crate does not know are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InteractionType {
    HydrogenBond,
    SidechainSidechain,
    SidechainBackbone,
    BackboneBackbone,
    WaterBridge,
    ExtendedWaterBridge,
    SaltBridge,
    PiCation,
    PiStacking,
    TStacking,
    VanDerWaals,
    Other(String),
}

impl InteractionType {
    pub fn code(&self) -> &str {
        match self {
            InteractionType::HydrogenBond => "hb",
            InteractionType::SidechainSidechain => "hbss",
            InteractionType::SidechainBackbone => "hbsb",
            InteractionType::BackboneBackbone => "hbbb",
            InteractionType::WaterBridge => "wb",
            InteractionType::ExtendedWaterBridge => "wb2",
            InteractionType::SaltBridge => "sb",
            InteractionType::PiCation => "pc",
            InteractionType::PiStacking => "ps",
            InteractionType::TStacking => "ts",
            InteractionType::VanDerWaals => "vdw",
            InteractionType::Other(code) => code,
        }
    }

    pub fn is_hydrogen_bond_subtype(&self) -> bool {
        matches!(
            self,
            InteractionType::SidechainSidechain
                | InteractionType::SidechainBackbone
                | InteractionType::BackboneBackbone
                | InteractionType::WaterBridge
                | InteractionType::ExtendedWaterBridge
        )
    }
}

impl FromStr for InteractionType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "hb" => InteractionType::HydrogenBond,
            "hbss" => InteractionType::SidechainSidechain,
            "hbsb" => InteractionType::SidechainBackbone,
            "hbbb" => InteractionType::BackboneBackbone,
            "wb" => InteractionType::WaterBridge,
            "wb2" => InteractionType::ExtendedWaterBridge,
            "sb" => InteractionType::SaltBridge,
            "pc" => InteractionType::PiCation,
            "ps" => InteractionType::PiStacking,
            "ts" => InteractionType::TStacking,
            "vdw" => InteractionType::VanDerWaals,
            other => InteractionType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A raw per-frame observation of two atoms in contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contact {
    pub frame: usize,
    pub atom1: AtomLabel,
    pub atom2: AtomLabel,
    pub interaction: InteractionType,
}

impl Contact {
    pub fn new(
        frame: usize,
        atom1: AtomLabel,
        atom2: AtomLabel,
        interaction: InteractionType,
    ) -> Self {
        Self {
            frame,
            atom1,
            atom2,
            interaction,
        }
    }

    pub fn hbond(frame: usize, atom1: AtomLabel, atom2: AtomLabel) -> Self {
        Self::new(frame, atom1, atom2, InteractionType::HydrogenBond)
    }

    /// Returns a copy of this contact carrying a different tag.
    pub fn with_interaction(&self, interaction: InteractionType) -> Self {
        Self {
            interaction,
            ..self.clone()
        }
    }
}

/// A contact after classification, optionally mediated by one or two waters.
///
/// Field order is also the sort order: frame, tag, the two end atoms, then
/// the bridging waters along the path from `atom1` to `atom2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassifiedContact {
    pub frame: usize,
    pub interaction: InteractionType,
    pub atom1: AtomLabel,
    pub atom2: AtomLabel,
    pub bridging_waters: Vec<AtomLabel>,
}

impl ClassifiedContact {
    pub fn direct(
        frame: usize,
        interaction: InteractionType,
        atom1: AtomLabel,
        atom2: AtomLabel,
    ) -> Self {
        Self {
            frame,
            interaction,
            atom1,
            atom2,
            bridging_waters: Vec::new(),
        }
    }

    pub fn water_bridge(frame: usize, atom1: AtomLabel, atom2: AtomLabel, water: AtomLabel) -> Self {
        Self {
            frame,
            interaction: InteractionType::WaterBridge,
            atom1,
            atom2,
            bridging_waters: vec![water],
        }
    }

    pub fn extended_water_bridge(
        frame: usize,
        atom1: AtomLabel,
        water1: AtomLabel,
        water2: AtomLabel,
        atom2: AtomLabel,
    ) -> Self {
        Self {
            frame,
            interaction: InteractionType::ExtendedWaterBridge,
            atom1,
            atom2,
            bridging_waters: vec![water1, water2],
        }
    }
}

impl From<Contact> for ClassifiedContact {
    fn from(contact: Contact) -> Self {
        Self::direct(
            contact.frame,
            contact.interaction,
            contact.atom1,
            contact.atom2,
        )
    }
}

impl fmt::Display for ClassifiedContact {
    /// Tab-separated row: `frame  itype  atom1  [water1  [water2]]  atom2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.frame, self.interaction, self.atom1)?;
        for water in &self.bridging_waters {
            write!(f, "\t{}", water)?;
        }
        write!(f, "\t{}", self.atom2)
    }
}
