//! # Topology Module
//!
//! Residue chemistry needed to find charged and aromatic groups.
//!
//! - [`chemistry`] - Static tables of anion, cation and aromatic ring atoms
//! - [`selection`] - Selections over a structure source and index-to-label lookup

pub mod chemistry;
pub mod selection;
