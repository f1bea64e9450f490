use crate::core::models::contact::{ClassifiedContact, Contact, InteractionType};
use crate::engine::config::StratifyConfig;
use crate::engine::error::EngineError;
use crate::engine::water_graph::{WaterGraph, build_water_graph};
use itertools::Itertools;
use tracing::{debug, instrument};

/// Hydrogen bonds of one batch, binned by subtype.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HbondStrata {
    pub sidechain_sidechain: Vec<ClassifiedContact>,
    pub sidechain_backbone: Vec<ClassifiedContact>,
    pub backbone_backbone: Vec<ClassifiedContact>,
    pub water_bridges: Vec<ClassifiedContact>,
    pub extended_water_bridges: Vec<ClassifiedContact>,
}

impl HbondStrata {
    pub fn len(&self) -> usize {
        self.sidechain_sidechain.len()
            + self.sidechain_backbone.len()
            + self.backbone_backbone.len()
            + self.water_bridges.len()
            + self.extended_water_bridges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates the bins in output order: `hbss`, `hbsb`, `hbbb`, `wb`,
    /// `wb2`.
    pub fn into_ordered(self) -> Vec<ClassifiedContact> {
        let mut ordered = Vec::with_capacity(self.len());
        ordered.extend(self.sidechain_sidechain);
        ordered.extend(self.sidechain_backbone);
        ordered.extend(self.backbone_backbone);
        ordered.extend(self.water_bridges);
        ordered.extend(self.extended_water_bridges);
        ordered
    }
}

/// Splits hydrogen bonds into residue-residue bonds and bonds touching
/// solvent on either side.
pub fn split_residue_and_water_hbonds<'a>(
    hbonds: &'a [Contact],
    solvent_resn: &str,
) -> (Vec<&'a Contact>, Vec<&'a Contact>) {
    hbonds.iter().partition(|contact| {
        !contact.atom1.is_solvent(solvent_resn) && !contact.atom2.is_solvent(solvent_resn)
    })
}

/// Subtype of a residue-residue hydrogen bond. Independent of atom order.
pub fn classify_residue_hbond(contact: &Contact, config: &StratifyConfig) -> InteractionType {
    let backbone1 = config.is_backbone_atom(contact.atom1.atom_name());
    let backbone2 = config.is_backbone_atom(contact.atom2.atom_name());
    match (backbone1, backbone2) {
        (false, false) => InteractionType::SidechainSidechain,
        (true, true) => InteractionType::BackboneBackbone,
        _ => InteractionType::SidechainBackbone,
    }
}

fn stratify_residue_hbonds<'a>(
    residue_hbonds: impl IntoIterator<Item = &'a Contact>,
    config: &StratifyConfig,
    strata: &mut HbondStrata,
) {
    for contact in residue_hbonds {
        let subtype = classify_residue_hbond(contact, config);
        let bin = match subtype {
            InteractionType::SidechainSidechain => &mut strata.sidechain_sidechain,
            InteractionType::BackboneBackbone => &mut strata.backbone_backbone,
            _ => &mut strata.sidechain_backbone,
        };
        bin.push(ClassifiedContact::direct(
            contact.frame,
            subtype,
            contact.atom1.clone(),
            contact.atom2.clone(),
        ));
    }
}

/// Residue pairs sharing a water: `res1 -- water -- res2`.
///
/// A water bonded to `k` distinct protein atoms gives `k choose 2` rows.
pub fn direct_water_bridges(graph: &WaterGraph) -> Vec<ClassifiedContact> {
    let mut bridges: Vec<ClassifiedContact> = graph
        .water_to_residues
        .iter()
        .flat_map(|(water, partners)| {
            // Partners are a set, so a pair never repeats an atom.
            partners.iter().tuple_combinations().map(move |(a, b)| {
                ClassifiedContact::water_bridge(graph.frame, a.clone(), b.clone(), water.clone())
            })
        })
        .collect();
    bridges.sort();
    bridges
}

/// Residue pairs joined through two hydrogen-bonded waters:
/// `res1 -- water1 -- water2 -- res2`.
///
/// Only solvent bridges where both waters have at least one protein partner
/// contribute.
pub fn extended_water_bridges(graph: &WaterGraph) -> Vec<ClassifiedContact> {
    let mut bridges = Vec::new();
    for bridge in &graph.solvent_bridges {
        let (Some(partners1), Some(partners2)) =
            (graph.partners(&bridge.water1), graph.partners(&bridge.water2))
        else {
            continue;
        };
        for (atom1, atom2) in partners1.iter().cartesian_product(partners2.iter()) {
            bridges.push(ClassifiedContact::extended_water_bridge(
                graph.frame,
                atom1.clone(),
                bridge.water1.clone(),
                bridge.water2.clone(),
                atom2.clone(),
            ));
        }
    }
    bridges.sort();
    bridges
}

/// Stratifies one frame's hydrogen bonds into subtype bins.
///
/// # Errors
///
/// * [`EngineError::MixedFrames`] if the contacts do not all share a frame.
/// * [`EngineError::NotHydrogenBond`] if a contact is not tagged `hb`.
/// * Errors of [`build_water_graph`] for the solvent-touching subset.
#[instrument(skip_all, name = "hbond_stratification")]
pub fn stratify_into_strata(
    hbonds: &[Contact],
    config: &StratifyConfig,
) -> Result<HbondStrata, EngineError> {
    if let Some(first) = hbonds.first() {
        if let Some(other) = hbonds.iter().find(|c| c.frame != first.frame) {
            return Err(EngineError::MixedFrames {
                first: first.frame,
                other: other.frame,
            });
        }
    }
    if let Some(contact) = hbonds
        .iter()
        .find(|c| c.interaction != InteractionType::HydrogenBond)
    {
        return Err(EngineError::NotHydrogenBond {
            interaction: contact.interaction.to_string(),
            atom1: contact.atom1.to_string(),
            atom2: contact.atom2.to_string(),
        });
    }

    let (residue_hbonds, water_hbonds) =
        split_residue_and_water_hbonds(hbonds, &config.solvent_resn);

    let mut strata = HbondStrata::default();
    stratify_residue_hbonds(residue_hbonds, config, &mut strata);

    let graph = build_water_graph(water_hbonds, &config.solvent_resn)?;
    strata.water_bridges = direct_water_bridges(&graph);
    strata.extended_water_bridges = extended_water_bridges(&graph);

    debug!(
        hbss = strata.sidechain_sidechain.len(),
        hbsb = strata.sidechain_backbone.len(),
        hbbb = strata.backbone_backbone.len(),
        wb = strata.water_bridges.len(),
        wb2 = strata.extended_water_bridges.len(),
        "Hydrogen bonds stratified."
    );
    Ok(strata)
}

/// Stratifies one frame's hydrogen bonds into a flat list ordered `hbss`,
/// `hbsb`, `hbbb`, `wb`, `wb2`.
pub fn stratify(
    hbonds: &[Contact],
    config: &StratifyConfig,
) -> Result<Vec<ClassifiedContact>, EngineError> {
    stratify_into_strata(hbonds, config).map(HbondStrata::into_ordered)
}
