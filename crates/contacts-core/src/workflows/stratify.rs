use crate::core::models::contact::{ClassifiedContact, Contact, InteractionType};
use crate::engine::config::StratifyConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::stratify::stratify;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Default)]
struct FrameBatch {
    hbonds: Vec<Contact>,
    passthrough: Vec<Contact>,
}

fn group_by_frame(contacts: Vec<Contact>) -> BTreeMap<usize, FrameBatch> {
    let mut frames: BTreeMap<usize, FrameBatch> = BTreeMap::new();
    for contact in contacts {
        let batch = frames.entry(contact.frame).or_default();
        if contact.interaction == InteractionType::HydrogenBond {
            batch.hbonds.push(contact);
        } else {
            batch.passthrough.push(contact);
        }
    }
    frames
}

fn classify_frame(
    frame: usize,
    batch: &FrameBatch,
    config: &StratifyConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ClassifiedContact>, EngineError> {
    let mut classified = stratify(&batch.hbonds, config)?;
    classified.extend(batch.passthrough.iter().cloned().map(ClassifiedContact::from));
    debug!(frame, rows = classified.len(), "Frame classified.");
    reporter.report(Progress::FrameDone {
        frame,
        classified: classified.len(),
    });
    Ok(classified)
}

/// Classifies a whole trajectory's contact table.
///
/// Hydrogen bonds of each frame are stratified into `hbss`, `hbsb`, `hbbb`,
/// `wb` and `wb2`; all other contact types are forwarded unchanged after
/// them. Frames appear in ascending order regardless of input order.
#[instrument(skip_all, name = "stratification_workflow")]
pub fn run(
    contacts: Vec<Contact>,
    config: &StratifyConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ClassifiedContact>, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Grouping",
    });
    let input_rows = contacts.len();
    let frames: Vec<(usize, FrameBatch)> = group_by_frame(contacts).into_iter().collect();
    info!(
        rows = input_rows,
        frames = frames.len(),
        solvent = %config.solvent_resn,
        "Starting contact stratification."
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Stratification",
    });
    reporter.report(Progress::FramesStart {
        total_frames: frames.len() as u64,
    });

    let iterator = frames.iter();

    #[cfg(feature = "parallel")]
    let iterator = frames.par_iter();

    let per_frame: Vec<Vec<ClassifiedContact>> = iterator
        .map(|(frame, batch)| classify_frame(*frame, batch, config, reporter))
        .collect::<Result<_, _>>()?;

    reporter.report(Progress::FramesFinish);
    reporter.report(Progress::PhaseFinish);

    let classified: Vec<ClassifiedContact> = per_frame.into_iter().flatten().collect();
    info!(rows = classified.len(), "Contact stratification complete.");
    Ok(classified)
}
