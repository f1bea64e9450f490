//! # Engine Module
//!
//! Per-frame contact classification.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Solvent token, backbone atom names and aromatic geometry criteria
//! - **Water Graph** ([`water_graph`]) - Water-to-residue adjacency and water-water bonds of one frame
//! - **Stratification** ([`stratify`]) - Splits hydrogen bonds into `hbss`, `hbsb`, `hbbb`, `wb` and `wb2`
//! - **Aromatic Geometry** ([`aromatic`]) - Ring planes, stacking and pi-cation tests
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine error type

pub mod aromatic;
pub mod config;
pub mod error;
pub mod progress;
pub mod stratify;
pub mod water_graph;
