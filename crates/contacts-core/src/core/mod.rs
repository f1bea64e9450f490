//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - **Contact Representation** ([`models`]) - Atom labels, raw and classified contacts,
//!   and an in-memory structure source
//! - **Contact I/O** ([`io`]) - Tab-separated contact tables and the structure source trait
//! - **Residue Chemistry** ([`topology`]) - Charged and aromatic atom tables and selections
//! - **Utilities** ([`utils`]) - Vector geometry and atom-name conventions

pub mod io;
pub mod models;
pub mod topology;
pub mod utils;
