use crate::core::models::contact::Contact;
use crate::core::models::label::AtomLabel;
use crate::engine::error::EngineError;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{instrument, trace};

/// Water atom to the distinct protein atoms it hydrogen-bonds with.
pub type WaterToResidueMap = BTreeMap<AtomLabel, BTreeSet<AtomLabel>>;

/// An unordered water-water hydrogen bond. The lexicographically smaller
/// label is always `water1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolventBridge {
    pub water1: AtomLabel,
    pub water2: AtomLabel,
}

impl SolventBridge {
    pub fn new(a: AtomLabel, b: AtomLabel) -> Self {
        if a <= b {
            Self {
                water1: a,
                water2: b,
            }
        } else {
            Self {
                water1: b,
                water2: a,
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaterGraph {
    /// Frame the batch belongs to; 0 when the batch was empty.
    pub frame: usize,
    pub water_to_residues: WaterToResidueMap,
    /// Canonical, sorted and free of duplicates.
    pub solvent_bridges: Vec<SolventBridge>,
}

impl WaterGraph {
    pub fn partners(&self, water: &AtomLabel) -> Option<&BTreeSet<AtomLabel>> {
        self.water_to_residues.get(water)
    }
}

/// Builds the per-frame water adjacency from hydrogen bonds that involve
/// solvent.
///
/// # Errors
///
/// * [`EngineError::UnresolvedSolvent`] if a contact has no solvent atom on
///   either side; the batch must be filtered beforehand.
/// * [`EngineError::MixedFrames`] if the contacts do not all share a frame.
#[instrument(skip_all, name = "water_graph")]
pub fn build_water_graph<'a>(
    water_hbonds: impl IntoIterator<Item = &'a Contact>,
    solvent_resn: &str,
) -> Result<WaterGraph, EngineError> {
    let mut frame: Option<usize> = None;
    let mut water_to_residues = WaterToResidueMap::new();
    let mut solvent_bridges = BTreeSet::new();

    for contact in water_hbonds {
        match frame {
            None => frame = Some(contact.frame),
            Some(first) if first != contact.frame => {
                return Err(EngineError::MixedFrames {
                    first,
                    other: contact.frame,
                });
            }
            Some(_) => {}
        }

        let solvent1 = contact.atom1.is_solvent(solvent_resn);
        let solvent2 = contact.atom2.is_solvent(solvent_resn);
        let (water, protein) = match (solvent1, solvent2) {
            (true, true) => {
                solvent_bridges.insert(SolventBridge::new(
                    contact.atom1.clone(),
                    contact.atom2.clone(),
                ));
                continue;
            }
            (true, false) => (&contact.atom1, &contact.atom2),
            (false, true) => (&contact.atom2, &contact.atom1),
            (false, false) => {
                return Err(EngineError::UnresolvedSolvent {
                    frame: contact.frame,
                    atom1: contact.atom1.to_string(),
                    atom2: contact.atom2.to_string(),
                    solvent_resn: solvent_resn.to_string(),
                });
            }
        };
        water_to_residues
            .entry(water.clone())
            .or_default()
            .insert(protein.clone());
    }

    trace!(
        waters = water_to_residues.len(),
        solvent_bridges = solvent_bridges.len(),
        "Water graph built."
    );

    Ok(WaterGraph {
        frame: frame.unwrap_or(0),
        water_to_residues,
        solvent_bridges: solvent_bridges.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> AtomLabel {
        s.parse().unwrap()
    }

    fn hb(frame: usize, a: &str, b: &str) -> Contact {
        Contact::hbond(frame, label(a), label(b))
    }

    #[test]
    fn empty_batch_yields_sentinel_frame_and_empty_graph() {
        let graph = build_water_graph(&[] as &[Contact], "TIP3").unwrap();
        assert_eq!(graph, WaterGraph::default());
        assert_eq!(graph.frame, 0);
    }

    #[test]
    fn water_protein_pairs_accumulate_with_either_orientation() {
        let contacts = vec![
            hb(7, "W:TIP3:1:OH2:900", "A:SER:4:OG:30"),
            hb(7, "A:ASN:9:ND2:80", "W:TIP3:1:OH2:900"),
            hb(7, "W:TIP3:1:OH2:900", "A:SER:4:OG:30"),
        ];
        let graph = build_water_graph(&contacts, "TIP3").unwrap();
        assert_eq!(graph.frame, 7);
        let partners = graph.partners(&label("W:TIP3:1:OH2:900")).unwrap();
        assert_eq!(
            partners.iter().collect::<Vec<_>>(),
            vec![&label("A:ASN:9:ND2:80"), &label("A:SER:4:OG:30")]
        );
        assert!(graph.solvent_bridges.is_empty());
    }

    #[test]
    fn symmetric_solvent_bridges_collapse_to_one_canonical_entry() {
        let contacts = vec![
            hb(1, "W:TIP3:8719:OH2:29279", "W:TIP3:757:OH2:2312"),
            hb(1, "W:TIP3:757:OH2:2312", "W:TIP3:8719:OH2:29279"),
        ];
        let graph = build_water_graph(&contacts, "TIP3").unwrap();
        assert_eq!(
            graph.solvent_bridges,
            vec![SolventBridge {
                water1: label("W:TIP3:757:OH2:2312"),
                water2: label("W:TIP3:8719:OH2:29279"),
            }]
        );
        assert!(graph.water_to_residues.is_empty());
    }

    #[test]
    fn solvent_bridges_are_sorted() {
        let contacts = vec![
            hb(0, "W:TIP3:9:OH2:9", "W:TIP3:3:OH2:3"),
            hb(0, "W:TIP3:2:OH2:2", "W:TIP3:5:OH2:5"),
        ];
        let graph = build_water_graph(&contacts, "TIP3").unwrap();
        let firsts: Vec<_> = graph
            .solvent_bridges
            .iter()
            .map(|b| b.water1.as_str())
            .collect();
        assert_eq!(firsts, vec!["W:TIP3:2:OH2:2", "W:TIP3:3:OH2:3"]);
    }

    #[test]
    fn contact_without_solvent_is_a_logic_error() {
        let contacts = vec![hb(2, "A:SER:4:OG:30", "A:ASN:9:ND2:80")];
        let err = build_water_graph(&contacts, "TIP3").unwrap_err();
        assert!(err.is_logic_error());
        assert!(matches!(
            err,
            EngineError::UnresolvedSolvent { frame: 2, .. }
        ));
    }

    #[test]
    fn contacts_from_several_frames_are_rejected() {
        let contacts = vec![
            hb(0, "W:TIP3:1:OH2:900", "A:SER:4:OG:30"),
            hb(1, "W:TIP3:1:OH2:900", "A:SER:4:OG:30"),
        ];
        assert!(matches!(
            build_water_graph(&contacts, "TIP3"),
            Err(EngineError::MixedFrames { first: 0, other: 1 })
        ));
    }

    #[test]
    fn solvent_token_matches_residue_name_only() {
        // Chain "TIP3" must not make a protein atom look like water.
        let contacts = vec![hb(0, "TIP3:SER:4:OG:30", "A:ASN:9:ND2:80")];
        assert!(build_water_graph(&contacts, "TIP3").is_err());
    }

    #[test]
    fn solvent_bridge_new_orders_pair() {
        let a = label("W:TIP3:1:OH2:1");
        let b = label("W:TIP3:2:OH2:2");
        assert_eq!(
            SolventBridge::new(b.clone(), a.clone()),
            SolventBridge::new(a, b)
        );
    }
}
