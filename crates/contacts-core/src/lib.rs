//! # MD Contacts Core Library
//!
//! Classification of pairwise atom contacts detected along a molecular-dynamics
//! trajectory. Raw hydrogen bonds are stratified into residue and water-mediated
//! subtypes, and aromatic rings are tested for stacking and pi-cation geometry.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Atom labels, contact records, the structure
//!   source abstraction, residue chemistry tables, contact table I/O and pure
//!   geometry helpers.
//!
//! - **[`engine`]: The Logic Core.** Per-frame algorithms: the water graph,
//!   hydrogen-bond stratification, aromatic ring geometry, plus configuration,
//!   errors and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Drives the engine over a whole trajectory,
//!   grouping contacts by frame and emitting classified rows in frame order.

pub mod core;
pub mod engine;
pub mod workflows;
